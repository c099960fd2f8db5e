pub mod config;
pub mod mongo_db_handler;
pub mod notifier;
pub mod seed;
pub mod web_api;
