pub mod app_config;
pub mod backup;
pub mod coordinator;
pub mod io_manager;
pub mod schedule;
pub mod store;
pub mod system;
