pub mod backup_result;
pub mod config;
pub mod diff_report;
pub mod entry;
pub mod error;
pub mod event;
pub mod log;
pub mod schedule;
pub mod task;
