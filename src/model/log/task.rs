use macros::loggable;

loggable! {
    TaskLog {
        #[error("Loaded {count} task(s)")]
        TasksLoaded { count: usize } => tracing::Level::INFO,

        #[error("Task {name} has been saved")]
        TaskSaved { name: String } => tracing::Level::INFO,

        #[error("Task {from} has been renamed to {to}")]
        TaskRenamed { from: String, to: String } => tracing::Level::INFO,

        #[error("Task {name} has been deleted")]
        TaskDeleted { name: String } => tracing::Level::INFO,
    }
}
