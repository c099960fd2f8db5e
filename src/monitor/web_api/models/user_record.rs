use chrono::Utc;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Tl,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Tl => "tl",
            Role::Employee => "employee",
        }
    }

    pub fn from_str(role_str: &str) -> Option<Self> {
        match role_str {
            "admin" => Some(Role::Admin),
            "tl" => Some(Role::Tl),
            "employee" => Some(Role::Employee),
            _ => None,
        }
    }
}

/// A user document as stored in the `users` collection. Field names stay
/// camelCase so databases written by earlier deployments remain readable.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub password: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tl_id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub created_at: DateTime,
}

impl UserRecord {
    pub fn new(username: &str, password: &str, role: Role) -> Self {
        UserRecord {
            id: ObjectId::new(),
            username: username.to_string(),
            password: password.to_string(),
            role,
            tl_id: None,
            first_name: None,
            last_name: None,
            created_at: DateTime::now(),
        }
    }

    pub fn with_team_lead(mut self, tl_id: ObjectId) -> Self {
        self.tl_id = Some(tl_id);
        self
    }

    pub fn with_name(mut self, first_name: &str, last_name: &str) -> Self {
        self.first_name = Some(first_name.to_string());
        self.last_name = Some(last_name.to_string());
        self
    }
}

/// Response shape for user listings: everything except the password.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tl_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub created_at: chrono::DateTime<Utc>,
}

impl From<&UserRecord> for UserSummary {
    fn from(user: &UserRecord) -> Self {
        UserSummary {
            id: user.id.to_hex(),
            username: user.username.clone(),
            role: user.role,
            tl_id: user.tl_id.map(|id| id.to_hex()),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at: user.created_at.to_chrono(),
        }
    }
}
