pub mod schedule_registry;
pub mod schedule_timer;
