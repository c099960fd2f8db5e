use std::collections::HashMap;

use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::parse_object_id;
use crate::monitor::mongo_db_handler::MongoDBHandler;
use crate::monitor::notifier::{RoomRegistry, APP_INSTALLED_EVENT};
use crate::monitor::web_api::error::ApiError;
use crate::monitor::web_api::models::install_record::{
    InstallRecord, InstallResponse, SystemInfo,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInstallRequest {
    employee_id: String,
    app_name: String,
    #[serde(default)]
    system_info: SystemInfo,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InstallEvent {
    employee_id: String,
    employee_name: String,
    app_name: String,
    install_time: chrono::DateTime<Utc>,
    system_info: SystemInfo,
}

/// Persists the install event, then resolves the employee for the
/// notification's display name. The two store operations are not atomic:
/// the record stays behind even when the lookup fails, and an unknown
/// employee id is reported as a server error rather than crashing the
/// notification path.
#[post("/app-install")]
pub async fn report_install(
    db: web::Data<MongoDBHandler>,
    rooms: web::Data<RoomRegistry>,
    body: web::Json<ReportInstallRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let employee_id = parse_object_id(&body.employee_id)?;

    let install = InstallRecord::new(employee_id, &body.app_name, body.system_info);
    db.insert_install(&install).await?;

    let employee = db
        .find_user_by_id(employee_id)
        .await?
        .ok_or(ApiError::UnknownEmployee(employee_id))?;

    rooms.notify_dashboards(
        APP_INSTALLED_EVENT,
        &InstallEvent {
            employee_id: employee_id.to_hex(),
            employee_name: employee.username,
            app_name: install.app_name.clone(),
            install_time: install.install_time.to_chrono(),
            system_info: install.system_info.clone(),
        },
    );

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[get("/app-installs")]
pub async fn list_installs(
    db: web::Data<MongoDBHandler>,
) -> Result<HttpResponse, ApiError> {
    let installs = db.all_installs().await?;

    // One batched lookup instead of a query per install.
    let ids: Vec<_> = installs.iter().map(|i| i.employee_id).collect();
    let names: HashMap<_, _> = db
        .users_by_ids(&ids)
        .await?
        .into_iter()
        .map(|user| (user.id, user.username))
        .collect();

    let responses: Vec<InstallResponse> = installs
        .iter()
        .map(|install| {
            InstallResponse::from_record(install, names.get(&install.employee_id).cloned())
        })
        .collect();

    Ok(HttpResponse::Ok().json(responses))
}
