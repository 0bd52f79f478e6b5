use crate::model::config::Config;
use crate::model::error::system::SystemError;
use crate::platform::constants::LOG_FILE_PREFIX;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

pub struct Logging;

impl Logging {
    /// Installs the global subscriber. The returned guard flushes the file writer
    /// when dropped and must be held until exit.
    pub fn initialize(config: &Config) -> Result<WorkerGuard, SystemError> {
        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX)
            .build(&config.log_directory)
            .map_err(SystemError::logging_init_failed)?;
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(env_filter) => env_filter,
            Err(_) => EnvFilter::try_new(&config.log_level).map_err(SystemError::logging_init_failed)?,
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .with(fmt::layer().with_writer(file_writer).with_ansi(false))
            .try_init()
            .map_err(SystemError::logging_init_failed)?;

        log_panics::init();
        Ok(guard)
    }
}
