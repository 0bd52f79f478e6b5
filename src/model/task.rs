use crate::model::schedule::Schedule;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Value stored under a task's name in `tasks.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinition {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub schedule: Schedule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupTask {
    pub name: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub schedule: Schedule,
}

impl BackupTask {
    pub fn new(
        name: impl Into<String>,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        schedule: Schedule,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            destination: destination.into(),
            schedule,
        }
    }

    pub fn from_definition(name: impl Into<String>, definition: TaskDefinition) -> Self {
        Self {
            name: name.into(),
            source: definition.source,
            destination: definition.destination,
            schedule: definition.schedule,
        }
    }

    pub fn to_definition(&self) -> TaskDefinition {
        TaskDefinition {
            source: self.source.clone(),
            destination: self.destination.clone(),
            schedule: self.schedule,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} - Source: {} - Destination: {} - Schedule: {}",
            self.name,
            self.source.display(),
            self.destination.display(),
            self.schedule
        )
    }
}
