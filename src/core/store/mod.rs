pub mod json_file;
pub mod record_store;
pub mod task_store;
