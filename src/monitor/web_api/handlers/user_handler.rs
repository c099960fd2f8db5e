use actix_web::{get, web, HttpResponse};

use super::parse_object_id;
use crate::monitor::mongo_db_handler::MongoDBHandler;
use crate::monitor::web_api::error::ApiError;
use crate::monitor::web_api::models::user_record::UserSummary;

// These listings are unauthenticated at the server boundary; access control
// lives in the dashboard route guards only, matching the original system.

#[get("/users/{role}")]
pub async fn users_by_role(
    db: web::Data<MongoDBHandler>,
    role: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let users = db.users_by_role(&role).await?;
    let summaries: Vec<UserSummary> = users.iter().map(UserSummary::from).collect();
    Ok(HttpResponse::Ok().json(summaries))
}

#[get("/tl/{tl_id}/employees")]
pub async fn team_lead_employees(
    db: web::Data<MongoDBHandler>,
    tl_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let tl_id = parse_object_id(&tl_id)?;
    let employees = db.employees_of_team_lead(tl_id).await?;
    let summaries: Vec<UserSummary> = employees.iter().map(UserSummary::from).collect();
    Ok(HttpResponse::Ok().json(summaries))
}
