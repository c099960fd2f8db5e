use crate::monitor::mongo_db_handler::MongoDBHandler;
use crate::monitor::web_api::models::user_record::{Role, UserRecord};

/// Ensures one account per role exists, creating hardcoded defaults only
/// when a role has no user at all. Safe to run on every startup. The
/// team-lead check runs before the employee check so the default employee
/// always has a team-lead to attach to.
pub async fn create_default_users(db: &MongoDBHandler) -> mongodb::error::Result<()> {
    if db.find_user_by_role(Role::Admin).await?.is_none() {
        db.insert_user(&UserRecord::new("admin", "admin123", Role::Admin))
            .await?;
        log::info!("Default admin created");
    }

    if db.find_user_by_role(Role::Tl).await?.is_none() {
        db.insert_user(&UserRecord::new("tl1", "tl123", Role::Tl))
            .await?;
        log::info!("Default TL created");
    }

    if db.find_user_by_role(Role::Employee).await?.is_none() {
        match db.find_user_by_role(Role::Tl).await? {
            Some(tl) => {
                let employee =
                    UserRecord::new("employee1", "emp123", Role::Employee).with_team_lead(tl.id);
                db.insert_user(&employee).await?;
                log::info!("Default employee created");
            }
            // Unreachable after the branch above unless another writer
            // removed the team-lead in between.
            None => log::error!("no team-lead available for the default employee"),
        }
    }

    Ok(())
}
