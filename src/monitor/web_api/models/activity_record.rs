use chrono::Utc;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Per-application usage entry embedded in an activity document.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AppUsage {
    pub name: String,
    #[serde(default)]
    pub time_spent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_time: Option<DateTime>,
}

/// An activity telemetry document in the `activities` collection.
/// Screen, idle and active time are independently reported by the client;
/// nothing ties screen time to idle + active.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub employee_id: ObjectId,
    #[serde(default)]
    pub screen_time: f64,
    #[serde(default)]
    pub idle_time: f64,
    #[serde(default)]
    pub active_time: f64,
    pub date: DateTime,
    #[serde(default)]
    pub applications: Vec<AppUsage>,
}

impl ActivityRecord {
    /// Builds a new record dated now. The reported `employee_id` is not
    /// checked against the users collection, matching the original system.
    pub fn new(
        employee_id: ObjectId,
        screen_time: f64,
        idle_time: f64,
        active_time: f64,
        applications: Vec<AppUsage>,
    ) -> Self {
        ActivityRecord {
            id: ObjectId::new(),
            employee_id,
            screen_time,
            idle_time,
            active_time,
            date: DateTime::now(),
            applications,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppUsageResponse {
    pub name: String,
    pub time_spent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_time: Option<chrono::DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: String,
    pub employee_id: String,
    pub screen_time: f64,
    pub idle_time: f64,
    pub active_time: f64,
    pub date: chrono::DateTime<Utc>,
    pub applications: Vec<AppUsageResponse>,
}

impl From<&ActivityRecord> for ActivityResponse {
    fn from(record: &ActivityRecord) -> Self {
        ActivityResponse {
            id: record.id.to_hex(),
            employee_id: record.employee_id.to_hex(),
            screen_time: record.screen_time,
            idle_time: record.idle_time,
            active_time: record.active_time,
            date: record.date.to_chrono(),
            applications: record
                .applications
                .iter()
                .map(|app| AppUsageResponse {
                    name: app.name.clone(),
                    time_spent: app.time_spent,
                    install_time: app.install_time.map(|t| t.to_chrono()),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_keeps_application_order() {
        let apps = vec![
            AppUsage {
                name: "editor".into(),
                time_spent: 90.0,
                install_time: None,
            },
            AppUsage {
                name: "browser".into(),
                time_spent: 30.0,
                install_time: Some(DateTime::now()),
            },
        ];
        let record = ActivityRecord::new(ObjectId::new(), 120.0, 10.0, 110.0, apps);
        let response = ActivityResponse::from(&record);

        assert_eq!(response.applications.len(), 2);
        assert_eq!(response.applications[0].name, "editor");
        assert_eq!(response.applications[1].name, "browser");

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("screenTime").is_some());
        assert!(json.get("employeeId").is_some());
    }
}
