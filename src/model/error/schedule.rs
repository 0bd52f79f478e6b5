use macros::traceable;

traceable! {
    ScheduleError {
        #[no_source]
        #[error("Weekly schedules require a day")]
        MissingWeekday => tracing::Level::WARN,

        #[no_source]
        #[error("Unknown frequency {value}, expected Once, Daily or Weekly")]
        UnknownFrequency { value: String } => tracing::Level::WARN,

        #[no_source]
        #[error("Unknown day {value}")]
        UnknownDay { value: String } => tracing::Level::WARN,

        #[error("Invalid schedule time {value}: {err}")]
        InvalidTime { value: String } => tracing::Level::WARN,

        #[error("Error scheduling task {name}: {err}")]
        ScheduleKeyError { name: String } => tracing::Level::ERROR,
    }
}
