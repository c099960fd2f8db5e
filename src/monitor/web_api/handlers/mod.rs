pub mod activity_handler;
pub mod auth_handler;
pub mod install_handler;
pub mod user_handler;
pub mod ws_handler;

use actix_web::{get, web, HttpResponse, Responder};
use mongodb::bson::oid::ObjectId;
use serde_json::json;

use super::error::ApiError;

/// Registers every route the service exposes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(auth_handler::login)
            .service(auth_handler::signup)
            .service(user_handler::users_by_role)
            .service(user_handler::team_lead_employees)
            .service(activity_handler::submit_activity)
            .service(activity_handler::employee_activity)
            .service(install_handler::report_install)
            .service(install_handler::list_installs),
    );
    cfg.service(index);
    cfg.service(ws_handler::ws_connect);
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "Employee Monitoring System API" }))
}

/// Path/body ids arrive as hex strings; a malformed one is a 400.
pub(crate) fn parse_object_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw)
        .map_err(|_| ApiError::Validation(String::from("Invalid ObjectId format")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_id_parsing_rejects_garbage() {
        assert!(parse_object_id("not-an-id").is_err());
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex()).unwrap(), id);
    }
}
