pub mod core;
pub mod file_system;
