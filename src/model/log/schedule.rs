use macros::loggable;

loggable! {
    ScheduleLog {
        #[error("Task {name} scheduled: {schedule}")]
        JobRegistered { name: String, schedule: String } => tracing::Level::INFO,

        #[error("Task {name} is set to run once")]
        OnceNotRegistered { name: String } => tracing::Level::DEBUG,

        #[error("Task {name} unscheduled")]
        JobRemoved { name: String } => tracing::Level::INFO,

        #[error("Running scheduled backup for task: {name}")]
        JobFired { name: String } => tracing::Level::INFO,

        #[error("Restored {count} scheduled task(s)")]
        SchedulesRestored { count: usize } => tracing::Level::INFO,

        #[error("Scheduler stopped")]
        SchedulerStopped => tracing::Level::INFO,
    }
}
