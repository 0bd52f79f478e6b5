pub mod file_lock;
pub mod logging;
