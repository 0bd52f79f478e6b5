pub mod backup;
pub mod io;
pub mod misc;
pub mod schedule;
pub mod system;
pub mod task;

use crate::model::error::backup::BackupError;
use crate::model::error::io::IOError;
use crate::model::error::misc::MiscError;
use crate::model::error::schedule::ScheduleError;
use crate::model::error::system::SystemError;
use crate::model::error::task::TaskError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum Error {
    #[error(transparent)]
    Backup(BackupError),
    #[error(transparent)]
    IO(IOError),
    #[error(transparent)]
    Misc(MiscError),
    #[error(transparent)]
    Schedule(ScheduleError),
    #[error(transparent)]
    System(SystemError),
    #[error(transparent)]
    Task(TaskError),
}

impl Error {
    pub fn level(&self) -> tracing::Level {
        match self {
            Error::Backup(error) => error.level(),
            Error::IO(error) => error.level(),
            Error::Misc(error) => error.level(),
            Error::Schedule(error) => error.level(),
            Error::System(error) => error.level(),
            Error::Task(error) => error.level(),
        }
    }
}

impl From<BackupError> for Error {
    fn from(error: BackupError) -> Self {
        Self::Backup(error)
    }
}

impl From<IOError> for Error {
    fn from(error: IOError) -> Self {
        Self::IO(error)
    }
}

impl From<MiscError> for Error {
    fn from(error: MiscError) -> Self {
        Self::Misc(error)
    }
}

impl From<ScheduleError> for Error {
    fn from(error: ScheduleError) -> Self {
        Self::Schedule(error)
    }
}

impl From<SystemError> for Error {
    fn from(error: SystemError) -> Self {
        Self::System(error)
    }
}

impl From<TaskError> for Error {
    fn from(error: TaskError) -> Self {
        Self::Task(error)
    }
}
