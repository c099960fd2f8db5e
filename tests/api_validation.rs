//! Handler-level tests for the request-validation paths. These never reach
//! MongoDB: the driver connects lazily, and every request below is rejected
//! (or answered) before a store operation is issued.

use actix_web::{test, web, App};
use serde_json::{json, Value};

use emp_monitor::monitor::mongo_db_handler::MongoDBHandler;
use emp_monitor::monitor::notifier::RoomRegistry;
use emp_monitor::monitor::web_api::handlers;

async fn spawn_app() -> (web::Data<MongoDBHandler>, web::Data<RoomRegistry>) {
    let db = MongoDBHandler::new("mongodb://localhost:27017", "emp_monitor_test")
        .await
        .expect("client construction does not require a running server");
    (web::Data::new(db), web::Data::new(RoomRegistry::new()))
}

macro_rules! init_app {
    () => {{
        let (db, rooms) = spawn_app().await;
        test::init_service(
            App::new()
                .app_data(db)
                .app_data(rooms)
                .configure(handlers::routes),
        )
        .await
    }};
}

#[actix_web::test]
async fn root_route_identifies_the_service() {
    let app = init_app!();
    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Employee Monitoring System API");
}

#[actix_web::test]
async fn login_rejects_empty_fields() {
    let app = init_app!();
    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": "", "password": "admin123", "role": "admin" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 400);
}

#[actix_web::test]
async fn login_rejects_missing_fields() {
    let app = init_app!();
    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": "admin" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 400);
}

#[actix_web::test]
async fn signup_rejects_missing_fields() {
    let app = init_app!();
    let req = test::TestRequest::post()
        .uri("/api/signup")
        .set_json(json!({ "firstName": "Jane", "lastName": "Doe" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 400);
}

#[actix_web::test]
async fn malformed_employee_ids_are_bad_requests() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/activity/not-an-object-id")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 400);

    let req = test::TestRequest::post()
        .uri("/api/activity")
        .set_json(json!({
            "employeeId": "not-an-object-id",
            "screenTime": 10,
            "idleTime": 2,
            "activeTime": 8,
            "applications": []
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 400);

    let req = test::TestRequest::post()
        .uri("/api/app-install")
        .set_json(json!({
            "employeeId": "nope",
            "appName": "slack",
            "systemInfo": { "os": "linux" }
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 400);

    let req = test::TestRequest::get()
        .uri("/api/tl/nope/employees")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 400);
}

#[actix_web::test]
async fn validation_errors_carry_a_message_body() {
    let app = init_app!();
    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": "", "password": "", "role": "" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 400);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "All fields are required");
}
