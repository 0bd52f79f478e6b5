use crate::core::store::json_file::JsonFile;
use crate::model::error::Error;
use crate::model::error::backup::BackupError;
use crate::model::error::schedule::ScheduleError;
use crate::model::error::task::TaskError;
use crate::model::log::task::TaskLog;
use crate::model::task::{BackupTask, TaskDefinition};
use macros::log;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Task definitions keyed by name, persisted to `tasks.json` on every mutation.
pub struct TaskStore {
    file: JsonFile,
    tasks: Mutex<BTreeMap<String, TaskDefinition>>,
}

impl TaskStore {
    /// Entries that fail to parse are logged and left out; the rest load.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let file = JsonFile::new(path);
        let raw: BTreeMap<String, Value> = file.read().await?;

        let mut tasks = BTreeMap::new();
        for (name, value) in raw {
            let definition = serde_json::from_value::<TaskDefinition>(value)
                .map_err(|err| ScheduleError::schedule_key_error(name.as_str(), err))
                .and_then(|definition| {
                    let schedule = definition
                        .schedule
                        .normalized()
                        .map_err(|err| ScheduleError::schedule_key_error(name.as_str(), err))?;
                    Ok(TaskDefinition {
                        schedule,
                        ..definition
                    })
                });
            match definition {
                Ok(definition) => {
                    tasks.insert(name, definition);
                }
                Err(err) => log!(err),
            }
        }
        log!(TaskLog::TasksLoaded { count: tasks.len() });

        Ok(Self {
            file,
            tasks: Mutex::new(tasks),
        })
    }

    pub async fn get(&self, name: &str) -> Option<BackupTask> {
        self.tasks
            .lock()
            .await
            .get(name)
            .map(|definition| BackupTask::from_definition(name, definition.clone()))
    }

    pub async fn tasks(&self) -> Vec<BackupTask> {
        self.tasks
            .lock()
            .await
            .iter()
            .map(|(name, definition)| BackupTask::from_definition(name.as_str(), definition.clone()))
            .collect()
    }

    /// Inserts or replaces the task. Saving a new name with a definition already
    /// stored under another name is a rename: the old entry is removed and its
    /// name returned. Saving an existing name only replaces that entry.
    pub async fn save(&self, task: BackupTask) -> Result<(BackupTask, Option<String>), Error> {
        let name = task.name.trim().to_string();
        if name.is_empty() {
            return Err(TaskError::EmptyTaskName.into());
        }
        if task.source.as_os_str().is_empty() || task.destination.as_os_str().is_empty() {
            return Err(BackupError::MissingPath.into());
        }
        let task = BackupTask {
            name,
            schedule: task.schedule.normalized()?,
            ..task
        };
        let definition = task.to_definition();

        let mut tasks = self.tasks.lock().await;
        let snapshot = tasks.clone();
        let renamed_from = if tasks.contains_key(&task.name) {
            None
        } else {
            tasks
                .iter()
                .find(|(_, stored)| **stored == definition)
                .map(|(existing, _)| existing.clone())
        };
        if let Some(old_name) = &renamed_from {
            tasks.remove(old_name);
        }
        tasks.insert(task.name.clone(), definition);

        if let Err(err) = self.file.write(&*tasks).await {
            *tasks = snapshot;
            return Err(err);
        }
        drop(tasks);

        match &renamed_from {
            Some(old_name) => log!(TaskLog::TaskRenamed {
                from: old_name.clone(),
                to: task.name.clone(),
            }),
            None => log!(TaskLog::TaskSaved {
                name: task.name.clone()
            }),
        }
        Ok((task, renamed_from))
    }

    pub async fn delete(&self, name: &str) -> Result<BackupTask, Error> {
        let mut tasks = self.tasks.lock().await;
        let definition = tasks
            .remove(name)
            .ok_or_else(|| TaskError::task_not_found(name))?;

        if let Err(err) = self.file.write(&*tasks).await {
            tasks.insert(name.to_string(), definition);
            return Err(err);
        }
        drop(tasks);

        log!(TaskLog::TaskDeleted {
            name: name.to_string()
        });
        Ok(BackupTask::from_definition(name, definition))
    }
}
