pub mod constants;
pub mod file_system;
