use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::parse_object_id;
use crate::monitor::mongo_db_handler::MongoDBHandler;
use crate::monitor::notifier::{RoomRegistry, ACTIVITY_UPDATE_EVENT};
use crate::monitor::web_api::error::ApiError;
use crate::monitor::web_api::models::activity_record::{
    ActivityRecord, ActivityResponse, AppUsage,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppUsageEntry {
    name: String,
    #[serde(default)]
    time_spent: f64,
    #[serde(default)]
    install_time: Option<chrono::DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitActivityRequest {
    employee_id: String,
    #[serde(default)]
    screen_time: f64,
    #[serde(default)]
    idle_time: f64,
    #[serde(default)]
    active_time: f64,
    #[serde(default)]
    applications: Vec<AppUsageEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActivityEvent {
    employee_id: String,
    activity: ActivityResponse,
}

/// Persists a telemetry report and pushes it to the admin and team-lead
/// dashboards. The employee id is not checked against the users collection,
/// so unknown reporters create orphan records, as in the original system.
#[post("/activity")]
pub async fn submit_activity(
    db: web::Data<MongoDBHandler>,
    rooms: web::Data<RoomRegistry>,
    body: web::Json<SubmitActivityRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let employee_id = parse_object_id(&body.employee_id)?;

    let applications = body
        .applications
        .into_iter()
        .map(|app| AppUsage {
            name: app.name,
            time_spent: app.time_spent,
            install_time: app.install_time.map(DateTime::from_chrono),
        })
        .collect();

    let activity = ActivityRecord::new(
        employee_id,
        body.screen_time,
        body.idle_time,
        body.active_time,
        applications,
    );
    db.insert_activity(&activity).await?;

    rooms.notify_dashboards(
        ACTIVITY_UPDATE_EVENT,
        &ActivityEvent {
            employee_id: employee_id.to_hex(),
            activity: ActivityResponse::from(&activity),
        },
    );

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[get("/activity/{employee_id}")]
pub async fn employee_activity(
    db: web::Data<MongoDBHandler>,
    employee_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = parse_object_id(&employee_id)?;
    let activities = db.activities_for_employee(employee_id).await?;
    let responses: Vec<ActivityResponse> =
        activities.iter().map(ActivityResponse::from).collect();
    Ok(HttpResponse::Ok().json(responses))
}
