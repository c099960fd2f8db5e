use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::FindOptions;
use mongodb::{Client, Collection, Database};

use crate::monitor::web_api::models::activity_record::ActivityRecord;
use crate::monitor::web_api::models::install_record::InstallRecord;
use crate::monitor::web_api::models::user_record::{Role, UserRecord};

const USERS: &str = "users";
const ACTIVITIES: &str = "activities";
const APP_INSTALLS: &str = "app_installs";

/// Typed access to the three collections backing the service. Cloning is
/// cheap; the driver multiplexes connections internally.
#[derive(Clone)]
pub struct MongoDBHandler {
    db: Database,
}

impl MongoDBHandler {
    pub async fn new(uri: &str, db_name: &str) -> mongodb::error::Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(db_name);
        Ok(MongoDBHandler { db })
    }

    fn users(&self) -> Collection<UserRecord> {
        self.db.collection::<UserRecord>(USERS)
    }

    fn activities(&self) -> Collection<ActivityRecord> {
        self.db.collection::<ActivityRecord>(ACTIVITIES)
    }

    fn installs(&self) -> Collection<InstallRecord> {
        self.db.collection::<InstallRecord>(APP_INSTALLS)
    }

    /// Exact three-field credential match, plaintext as in the original
    /// system. Returns the full record; callers filter the password out of
    /// anything client-facing.
    pub async fn find_login(
        &self,
        username: &str,
        password: &str,
        role: &str,
    ) -> mongodb::error::Result<Option<UserRecord>> {
        let filter = doc! { "username": username, "password": password, "role": role };
        self.users().find_one(filter, None).await
    }

    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> mongodb::error::Result<Option<UserRecord>> {
        self.users().find_one(doc! { "username": username }, None).await
    }

    pub async fn find_user_by_id(
        &self,
        id: ObjectId,
    ) -> mongodb::error::Result<Option<UserRecord>> {
        self.users().find_one(doc! { "_id": id }, None).await
    }

    /// First user of the given role, if any. Used by the startup seeding.
    pub async fn find_user_by_role(
        &self,
        role: Role,
    ) -> mongodb::error::Result<Option<UserRecord>> {
        self.users()
            .find_one(doc! { "role": role.as_str() }, None)
            .await
    }

    pub async fn insert_user(&self, user: &UserRecord) -> mongodb::error::Result<()> {
        self.users().insert_one(user, None).await?;
        Ok(())
    }

    /// Every user carrying the given role string. An unknown role matches
    /// nothing and yields an empty list.
    pub async fn users_by_role(&self, role: &str) -> mongodb::error::Result<Vec<UserRecord>> {
        let cursor = self.users().find(doc! { "role": role }, None).await?;
        cursor.try_collect().await
    }

    pub async fn employees_of_team_lead(
        &self,
        tl_id: ObjectId,
    ) -> mongodb::error::Result<Vec<UserRecord>> {
        let filter = doc! { "tlId": tl_id, "role": Role::Employee.as_str() };
        let cursor = self.users().find(filter, None).await?;
        cursor.try_collect().await
    }

    pub async fn users_by_ids(
        &self,
        ids: &[ObjectId],
    ) -> mongodb::error::Result<Vec<UserRecord>> {
        let filter = doc! { "_id": { "$in": ids.to_vec() } };
        let cursor = self.users().find(filter, None).await?;
        cursor.try_collect().await
    }

    pub async fn insert_activity(
        &self,
        activity: &ActivityRecord,
    ) -> mongodb::error::Result<()> {
        self.activities().insert_one(activity, None).await?;
        Ok(())
    }

    /// All activity for one employee, most recent first.
    pub async fn activities_for_employee(
        &self,
        employee_id: ObjectId,
    ) -> mongodb::error::Result<Vec<ActivityRecord>> {
        let options = FindOptions::builder().sort(doc! { "date": -1 }).build();
        let cursor = self
            .activities()
            .find(doc! { "employeeId": employee_id }, options)
            .await?;
        cursor.try_collect().await
    }

    pub async fn insert_install(&self, install: &InstallRecord) -> mongodb::error::Result<()> {
        self.installs().insert_one(install, None).await?;
        Ok(())
    }

    /// Every install event, most recent first.
    pub async fn all_installs(&self) -> mongodb::error::Result<Vec<InstallRecord>> {
        let options = FindOptions::builder()
            .sort(doc! { "installTime": -1 })
            .build();
        let cursor = self.installs().find(None, options).await?;
        cursor.try_collect().await
    }
}
