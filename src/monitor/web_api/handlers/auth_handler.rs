use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::monitor::mongo_db_handler::MongoDBHandler;
use crate::monitor::web_api::error::ApiError;
use crate::monitor::web_api::models::user_record::{Role, UserRecord};

/// Email domain whose signups become team-leads. Everyone else signs up as
/// an employee; admins are only ever created by the startup seeding.
const TEAM_LEAD_DOMAIN: &str = "@tlcompany.com";

#[derive(Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
    role: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionUser {
    id: String,
    username: String,
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    tl_id: Option<String>,
}

#[derive(Serialize)]
struct LoginResponse {
    success: bool,
    user: SessionUser,
}

#[post("/login")]
pub async fn login(
    db: web::Data<MongoDBHandler>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    if body.username.is_empty() || body.password.is_empty() || body.role.is_empty() {
        return Err(ApiError::missing_fields());
    }

    // The store hands back the full record, password included; only the
    // session fields below ever reach the client.
    let user = db
        .find_login(&body.username, &body.password, &body.role)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        user: SessionUser {
            id: user.id.to_hex(),
            username: user.username,
            role: user.role,
            tl_id: user.tl_id.map(|id| id.to_hex()),
        },
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
}

#[derive(Serialize)]
struct SignupUser {
    id: String,
    username: String,
    role: Role,
}

#[derive(Serialize)]
struct SignupResponse {
    success: bool,
    message: String,
    user: SignupUser,
}

fn role_for_email(email: &str) -> Role {
    if email.ends_with(TEAM_LEAD_DOMAIN) {
        Role::Tl
    } else {
        Role::Employee
    }
}

#[post("/signup")]
pub async fn signup(
    db: web::Data<MongoDBHandler>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError> {
    if body.first_name.is_empty()
        || body.last_name.is_empty()
        || body.email.is_empty()
        || body.password.is_empty()
    {
        return Err(ApiError::missing_fields());
    }

    if db.find_user_by_username(&body.email).await?.is_some() {
        return Err(ApiError::Conflict(String::from("User already exists")));
    }

    let user = UserRecord::new(&body.email, &body.password, role_for_email(&body.email))
        .with_name(&body.first_name, &body.last_name);
    db.insert_user(&user).await?;
    log::info!("new {} account registered: {}", user.role.as_str(), user.username);

    Ok(HttpResponse::Ok().json(SignupResponse {
        success: true,
        message: String::from("User registered successfully"),
        user: SignupUser {
            id: user.id.to_hex(),
            username: user.username,
            role: user.role,
        },
    }))
}
