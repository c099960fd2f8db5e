use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use mongodb::bson::oid::ObjectId;
use serde_json::json;
use thiserror::Error;

/// Request failure taxonomy. Server-side causes are logged but every 5xx
/// reaches the client as the same generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    Conflict(String),
    #[error("Server error")]
    Store(#[from] mongodb::error::Error),
    #[error("Server error")]
    UnknownEmployee(ObjectId),
}

impl ApiError {
    pub fn missing_fields() -> Self {
        ApiError::Validation(String::from("All fields are required"))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Store(_) | ApiError::UnknownEmployee(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Store(e) => log::error!("store operation failed: {}", e),
            ApiError::UnknownEmployee(id) => {
                log::error!("no user found for employeeId {}", id.to_hex())
            }
            _ => {}
        }
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
