pub mod backup;
pub mod schedule;
pub mod system;
pub mod task;
