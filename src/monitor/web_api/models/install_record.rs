use chrono::Utc;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SystemInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

/// An application-install event in the `app_installs` collection.
/// `notified` is written but never read back; it is kept so documents stay
/// byte-compatible with the original deployment.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InstallRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub employee_id: ObjectId,
    pub app_name: String,
    pub install_time: DateTime,
    #[serde(default)]
    pub system_info: SystemInfo,
    #[serde(default)]
    pub notified: bool,
}

impl InstallRecord {
    pub fn new(employee_id: ObjectId, app_name: &str, system_info: SystemInfo) -> Self {
        InstallRecord {
            id: ObjectId::new(),
            employee_id,
            app_name: app_name.to_string(),
            install_time: DateTime::now(),
            system_info,
            notified: false,
        }
    }
}

/// Install listing entry, enriched with the owning user's name. A dangling
/// `employeeId` reference yields a null name, as the original populate did.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallResponse {
    pub id: String,
    pub employee_id: String,
    pub employee_name: Option<String>,
    pub app_name: String,
    pub install_time: chrono::DateTime<Utc>,
    pub system_info: SystemInfo,
    pub notified: bool,
}

impl InstallResponse {
    pub fn from_record(record: &InstallRecord, employee_name: Option<String>) -> Self {
        InstallResponse {
            id: record.id.to_hex(),
            employee_id: record.employee_id.to_hex(),
            employee_name,
            app_name: record.app_name.clone(),
            install_time: record.install_time.to_chrono(),
            system_info: record.system_info.clone(),
            notified: record.notified,
        }
    }
}
