pub mod activity_record;
pub mod install_record;
pub mod user_record;
