use crate::core::app_config::AppConfig;
use crate::core::backup::backup_executor::BackupExecutor;
use crate::core::backup::tree_differ::TreeDiffer;
use crate::core::io_manager::IOManager;
use crate::core::schedule::schedule_registry::ScheduleRegistry;
use crate::core::store::record_store::RecordStore;
use crate::core::store::task_store::TaskStore;
use crate::interface::core::dispatcher::JobDispatcher;
use crate::interface::file_system::FileSystemTrait;
use crate::model::backup_result::BackupResult;
use crate::model::diff_report::DiffReport;
use crate::model::error::Error;
use crate::model::error::backup::BackupError;
use crate::model::error::task::TaskError;
use crate::model::event::BackupEvent;
use crate::model::log::backup::BackupLog;
use crate::model::log::schedule::ScheduleLog;
use crate::model::task::BackupTask;
use crate::platform::constants::{HISTORY_FILE, LOG_FILE, TASKS_FILE};
use chrono::Local;
use dashmap::DashMap;
use macros::log;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tokio::task::JoinHandle;
use uuid::Uuid;

#[derive(Debug, Default, Clone)]
struct Selection {
    source: Option<PathBuf>,
    destination: Option<PathBuf>,
}

pub struct RunHandle {
    pub run_id: Uuid,
    handle: JoinHandle<Option<BackupResult>>,
}

impl RunHandle {
    /// Waits for the worker. `None` means the run failed; the failure was already reported.
    pub async fn wait(self) -> Result<Option<BackupResult>, BackupError> {
        self.handle.await.map_err(BackupError::worker_panic)
    }
}

pub enum RunOutcome {
    NoChanges { run_id: Uuid },
    Started(RunHandle),
}

impl RunOutcome {
    pub fn run_id(&self) -> Uuid {
        match self {
            RunOutcome::NoChanges { run_id } => *run_id,
            RunOutcome::Started(handle) => handle.run_id,
        }
    }
}

/// Owns tasks, history and log, and runs backups one destination at a time.
pub struct BackupCoordinator {
    io_manager: Arc<IOManager>,
    tree_differ: TreeDiffer,
    executor: BackupExecutor,
    task_store: TaskStore,
    history_store: RecordStore,
    log_store: RecordStore,
    registry: Arc<ScheduleRegistry>,
    destination_locks: DashMap<PathBuf, Arc<Mutex<()>>>,
    selection: RwLock<Selection>,
    event_tx: UnboundedSender<BackupEvent>,
}

impl BackupCoordinator {
    pub async fn new(
        app_config: Arc<AppConfig>,
        io_manager: Arc<IOManager>,
    ) -> Result<(Self, UnboundedReceiver<BackupEvent>), Error> {
        let state_directory = app_config.state_directory.clone();
        io_manager.create_directory(&state_directory).await?;

        let task_store = TaskStore::open(state_directory.join(TASKS_FILE)).await?;
        let history_store = RecordStore::history(state_directory.join(HISTORY_FILE)).await?;
        let log_store = RecordStore::log(state_directory.join(LOG_FILE)).await?;
        let (event_tx, event_rx) = unbounded_channel();

        let coordinator = Self {
            tree_differ: TreeDiffer::new(io_manager.clone()),
            executor: BackupExecutor::new(io_manager.clone(), app_config.copy_policy),
            io_manager,
            task_store,
            history_store,
            log_store,
            registry: Arc::new(ScheduleRegistry::new()),
            destination_locks: DashMap::new(),
            selection: RwLock::new(Selection::default()),
            event_tx,
        };
        Ok((coordinator, event_rx))
    }

    pub fn registry(&self) -> Arc<ScheduleRegistry> {
        self.registry.clone()
    }

    pub async fn set_source(&self, source: impl Into<PathBuf>) {
        self.selection.write().await.source = Some(source.into());
    }

    pub async fn set_destination(&self, destination: impl Into<PathBuf>) {
        self.selection.write().await.destination = Some(destination.into());
    }

    async fn selected_paths(&self) -> Result<(PathBuf, PathBuf), BackupError> {
        let selection = self.selection.read().await;
        match (&selection.source, &selection.destination) {
            (Some(source), Some(destination))
                if !source.as_os_str().is_empty() && !destination.as_os_str().is_empty() =>
            {
                Ok((source.clone(), destination.clone()))
            }
            _ => Err(BackupError::MissingPath),
        }
    }

    pub async fn start_backup(self: &Arc<Self>) -> Result<RunOutcome, Error> {
        let (source, destination) = match self.selected_paths().await {
            Ok(paths) => paths,
            Err(err) => return Err(self.fail(Uuid::new_v4(), err.into())),
        };
        self.run_manual(&source, &destination).await
    }

    pub async fn preview_changes(&self) -> Result<DiffReport, Error> {
        let (source, destination) = self.selected_paths().await?;
        let report = self.tree_differ.diff(&source, &destination).await?;
        Ok(report)
    }

    /// Rejects the run with `RunInProgress` while another backup writes into `destination`.
    pub async fn run_manual(self: &Arc<Self>, source: &Path, destination: &Path) -> Result<RunOutcome, Error> {
        let run_id = Uuid::new_v4();
        if source.as_os_str().is_empty() || destination.as_os_str().is_empty() {
            return Err(self.fail(run_id, BackupError::MissingPath.into()));
        }
        let guard = match self.destination_lock(destination).await.try_lock_owned() {
            Ok(guard) => guard,
            Err(_) => return Err(self.fail(run_id, BackupError::run_in_progress(destination).into())),
        };
        self.start_run(run_id, source, destination, guard).await
    }

    /// Resolves the task at fire time; a task deleted in the meantime is logged and skipped.
    /// Waits for any backup already writing into the same destination.
    pub async fn run_scheduled(self: &Arc<Self>, task_name: &str) -> Result<Option<RunOutcome>, Error> {
        let Some(task) = self.task_store.get(task_name).await else {
            log!(TaskError::task_not_found(task_name));
            return Ok(None);
        };

        let lock = self.destination_lock(&task.destination).await;
        let guard = match lock.clone().try_lock_owned() {
            Ok(guard) => guard,
            Err(_) => {
                log!(BackupLog::WaitingForDestination {
                    path: task.destination.clone()
                });
                lock.lock_owned().await
            }
        };
        let outcome = self
            .start_run(Uuid::new_v4(), &task.source, &task.destination, guard)
            .await?;
        Ok(Some(outcome))
    }

    pub async fn run_task(self: &Arc<Self>, task_name: &str) -> Result<RunOutcome, Error> {
        let task = self
            .task_store
            .get(task_name)
            .await
            .ok_or_else(|| TaskError::task_not_found(task_name))?;
        self.run_manual(&task.source, &task.destination).await
    }

    async fn start_run(
        self: &Arc<Self>,
        run_id: Uuid,
        source: &Path,
        destination: &Path,
        guard: OwnedMutexGuard<()>,
    ) -> Result<RunOutcome, Error> {
        if !self.io_manager.is_directory(destination).await {
            return Err(self.fail(run_id, BackupError::destination_unreachable(destination).into()));
        }
        let report = match self.tree_differ.diff(source, destination).await {
            Ok(report) => report,
            Err(err) => return Err(self.fail(run_id, err.into())),
        };
        if !report.has_changes() {
            log!(BackupLog::NoChanges);
            self.emit(BackupEvent::NoChanges {
                run_id,
                source: source.to_path_buf(),
                destination: destination.to_path_buf(),
            });
            return Ok(RunOutcome::NoChanges { run_id });
        }

        log!(BackupLog::RunStarted {
            src: source.to_path_buf(),
            dst: destination.to_path_buf(),
        });
        let coordinator = self.clone();
        let source = source.to_path_buf();
        let destination = destination.to_path_buf();
        let handle = tokio::spawn(async move {
            let _guard = guard;
            coordinator.execute_run(run_id, &source, &destination).await
        });
        Ok(RunOutcome::Started(RunHandle { run_id, handle }))
    }

    async fn execute_run(&self, run_id: Uuid, source: &Path, destination: &Path) -> Option<BackupResult> {
        let event_tx = self.event_tx.clone();
        let on_progress = move |percent| {
            let _ = event_tx.send(BackupEvent::Progress { run_id, percent });
        };

        let result = match self.executor.execute(source, destination, on_progress).await {
            Ok(result) => result,
            Err(err) => {
                self.fail(run_id, err.into());
                return None;
            }
        };

        if let Err(err) = self.persist(&result).await {
            self.fail(run_id, err);
            return None;
        }
        if result.has_errors() {
            log!(BackupLog::CompletedWithErrors {
                count: result.errors.len()
            });
        }
        if result.has_changes() {
            log!(BackupLog::Completed);
        } else {
            log!(BackupLog::NoChanges);
        }
        self.emit(BackupEvent::Completed {
            run_id,
            result: result.clone(),
        });
        Some(result)
    }

    /// A run only counts as completed once its record is on disk.
    async fn persist(&self, result: &BackupResult) -> Result<(), Error> {
        self.history_store.append(result).await?;
        self.log_store.append(result).await?;
        Ok(())
    }

    /// Returns once no backup holds a destination.
    pub async fn wait_idle(&self) {
        let locks: Vec<_> = self
            .destination_locks
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        for lock in locks {
            drop(lock.lock().await);
        }
    }

    /// Keyed by the canonical path so aliases of one directory share a lock.
    /// Locks nobody holds or waits on are dropped from the map.
    async fn destination_lock(&self, destination: &Path) -> Arc<Mutex<()>> {
        let key = self.io_manager.canonical_path(destination).await;
        self.destination_locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        self.destination_locks
            .entry(key)
            .or_default()
            .clone()
    }

    fn emit(&self, event: BackupEvent) {
        // The receiver may be gone during shutdown
        let _ = self.event_tx.send(event);
    }

    fn fail(&self, run_id: Uuid, err: Error) -> Error {
        log!(err);
        self.emit(BackupEvent::Failed {
            run_id,
            errors: vec![err.to_string()],
        });
        err
    }

    pub async fn save_task(&self, task: BackupTask) -> Result<BackupTask, Error> {
        let (task, renamed_from) = self.task_store.save(task).await?;
        if let Some(old_name) = renamed_from {
            self.registry.unregister(&old_name);
        }
        self.registry
            .register(&task.name, &task.schedule, Local::now().naive_local());
        Ok(task)
    }

    pub async fn delete_task(&self, task_name: &str) -> Result<BackupTask, Error> {
        let task = self.task_store.delete(task_name).await?;
        self.registry.unregister(task_name);
        Ok(task)
    }

    /// Registers every recurring task. Returns the number of registered jobs.
    pub async fn restore_schedules(&self) -> usize {
        let now = Local::now().naive_local();
        let count = self
            .task_store
            .tasks()
            .await
            .iter()
            .filter(|task| self.registry.register(&task.name, &task.schedule, now))
            .count();
        log!(ScheduleLog::SchedulesRestored { count });
        count
    }

    pub async fn tasks(&self) -> Vec<BackupTask> {
        self.task_store.tasks().await
    }

    pub async fn history(&self) -> Vec<BackupResult> {
        self.history_store.records().await
    }

    pub async fn log(&self) -> Vec<BackupResult> {
        self.log_store.records().await
    }

    pub async fn history_record(&self, date: &str) -> Option<BackupResult> {
        self.history_store.record_by_date(date).await
    }

    pub async fn log_record(&self, date: &str) -> Option<BackupResult> {
        self.log_store.record_by_date(date).await
    }
}

impl JobDispatcher for BackupCoordinator {
    fn dispatch(self: Arc<Self>, task_name: String) {
        tokio::spawn(async move {
            match self.run_scheduled(&task_name).await {
                Ok(Some(RunOutcome::Started(handle))) => {
                    if let Err(err) = handle.wait().await {
                        log!(err);
                    }
                }
                Ok(_) => {}
                Err(err) => log!(err),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::Config;
    use crate::model::schedule::{Schedule, ScheduleDay, ScheduleTime};
    use std::fs;
    use tempfile::{TempDir, tempdir};

    async fn coordinator(state: &TempDir) -> (Arc<BackupCoordinator>, UnboundedReceiver<BackupEvent>) {
        let config = Config {
            state_directory: state.path().to_path_buf(),
            ..Config::default()
        };
        let app_config = Arc::new(AppConfig::from_config(config).unwrap());
        let io_manager = Arc::new(IOManager::new(&app_config));
        let (coordinator, events) = BackupCoordinator::new(app_config, io_manager).await.unwrap();
        (Arc::new(coordinator), events)
    }

    fn drain(events: &mut UnboundedReceiver<BackupEvent>) -> Vec<BackupEvent> {
        let mut drained = Vec::new();
        while let Ok(event) = events.try_recv() {
            drained.push(event);
        }
        drained
    }

    #[tokio::test]
    async fn completed_run_is_recorded_in_history() {
        let state = tempdir().unwrap();
        let source = tempdir().unwrap();
        let destination = tempdir().unwrap();
        fs::write(source.path().join("a.txt"), "a").unwrap();
        fs::write(source.path().join("b.txt"), "b").unwrap();
        let (coordinator, mut events) = coordinator(&state).await;

        let outcome = coordinator
            .run_manual(source.path(), destination.path())
            .await
            .unwrap();
        let RunOutcome::Started(handle) = outcome else {
            panic!("expected a started run");
        };
        let run_id = handle.run_id;
        let result = handle.wait().await.unwrap().unwrap();
        assert_eq!(result.copied_files, 2);

        let events = drain(&mut events);
        assert_eq!(
            events,
            vec![
                BackupEvent::Progress { run_id, percent: 50 },
                BackupEvent::Progress { run_id, percent: 100 },
                BackupEvent::Completed {
                    run_id,
                    result: result.clone()
                },
            ]
        );
        assert_eq!(coordinator.history().await, vec![result.clone()]);
        assert!(coordinator.log().await.is_empty());
        assert_eq!(
            coordinator.history_record(&result.date_label()).await,
            Some(result)
        );
        assert!(state.path().join(HISTORY_FILE).exists());
    }

    #[tokio::test]
    async fn unchanged_tree_reports_no_changes() {
        let state = tempdir().unwrap();
        let source = tempdir().unwrap();
        let destination = tempdir().unwrap();
        fs::write(source.path().join("a.txt"), "a").unwrap();
        let (coordinator, mut events) = coordinator(&state).await;

        if let RunOutcome::Started(handle) = coordinator
            .run_manual(source.path(), destination.path())
            .await
            .unwrap()
        {
            handle.wait().await.unwrap();
        }
        drain(&mut events);

        let outcome = coordinator
            .run_manual(source.path(), destination.path())
            .await
            .unwrap();
        assert!(matches!(outcome, RunOutcome::NoChanges { .. }));
        assert!(matches!(
            drain(&mut events).as_slice(),
            [BackupEvent::NoChanges { .. }]
        ));
        assert_eq!(coordinator.history().await.len(), 1);
    }

    #[tokio::test]
    async fn failed_files_are_written_to_log() {
        let state = tempdir().unwrap();
        let source = tempdir().unwrap();
        let destination = tempdir().unwrap();
        fs::write(source.path().join("ok.txt"), "ok").unwrap();
        fs::write(source.path().join("blocked.txt"), "blocked").unwrap();
        fs::create_dir(destination.path().join("blocked.txt")).unwrap();
        let (coordinator, _events) = coordinator(&state).await;

        let RunOutcome::Started(handle) = coordinator
            .run_manual(source.path(), destination.path())
            .await
            .unwrap()
        else {
            panic!("expected a started run");
        };
        let result = handle.wait().await.unwrap().unwrap();

        let log = coordinator.log().await;
        assert_eq!(log, vec![result.clone()]);
        assert_eq!(log[0].errors.len(), 1);
        assert_eq!(coordinator.log_record(&result.date_label()).await, Some(result));
    }

    #[tokio::test]
    async fn busy_destination_rejects_manual_run() {
        let state = tempdir().unwrap();
        let source = tempdir().unwrap();
        let destination = tempdir().unwrap();
        fs::write(source.path().join("a.txt"), "a").unwrap();
        let (coordinator, mut events) = coordinator(&state).await;

        let _guard = coordinator
            .destination_lock(destination.path())
            .await
            .try_lock_owned()
            .unwrap();
        let err = coordinator
            .run_manual(source.path(), destination.path())
            .await
            .err()
            .unwrap();
        assert_eq!(
            err,
            Error::Backup(BackupError::run_in_progress(destination.path()))
        );
        assert!(matches!(
            drain(&mut events).as_slice(),
            [BackupEvent::Failed { .. }]
        ));
    }

    #[tokio::test]
    async fn unreachable_destination_fails_before_copying() {
        let state = tempdir().unwrap();
        let source = tempdir().unwrap();
        let destination = tempdir().unwrap();
        fs::write(source.path().join("a.txt"), "a").unwrap();
        let (coordinator, mut events) = coordinator(&state).await;
        let missing = destination.path().join("unplugged");

        let err = coordinator
            .run_manual(source.path(), &missing)
            .await
            .err()
            .unwrap();
        assert_eq!(err, Error::Backup(BackupError::destination_unreachable(&missing)));
        match drain(&mut events).as_slice() {
            [BackupEvent::Failed { errors, .. }] => assert_eq!(errors, &vec![err.to_string()]),
            other => panic!("unexpected events: {other:?}"),
        }
        assert!(!missing.exists());
    }

    #[tokio::test]
    async fn start_backup_and_preview_need_both_paths() {
        let state = tempdir().unwrap();
        let source = tempdir().unwrap();
        let destination = tempdir().unwrap();
        fs::write(source.path().join("a.txt"), "abc").unwrap();
        let (coordinator, _events) = coordinator(&state).await;

        coordinator.set_source(source.path()).await;
        assert_eq!(
            coordinator.preview_changes().await.unwrap_err(),
            Error::Backup(BackupError::MissingPath)
        );
        assert!(coordinator.start_backup().await.is_err());

        coordinator.set_destination(destination.path()).await;
        let report = coordinator.preview_changes().await.unwrap();
        assert_eq!(report.total_bytes, 3);
        assert_eq!(report.new_entries().len(), 1);
    }

    #[tokio::test]
    async fn saved_tasks_drive_the_registry() {
        let state = tempdir().unwrap();
        let (coordinator, _events) = coordinator(&state).await;
        let registry = coordinator.registry();
        let time = ScheduleTime::from_hm(9, 0).unwrap();

        coordinator
            .save_task(BackupTask::new(
                "weekly",
                "/src",
                "/dst",
                Schedule::weekly(ScheduleDay::Monday, time),
            ))
            .await
            .unwrap();
        coordinator
            .save_task(BackupTask::new("preset", "/src", "/other", Schedule::once(time)))
            .await
            .unwrap();
        assert!(registry.contains("weekly"));
        assert!(!registry.contains("preset"));

        coordinator
            .save_task(BackupTask::new(
                "renamed",
                "/src",
                "/dst",
                Schedule::weekly(ScheduleDay::Monday, time),
            ))
            .await
            .unwrap();
        assert!(!registry.contains("weekly"));
        assert!(registry.contains("renamed"));

        coordinator.delete_task("renamed").await.unwrap();
        assert!(!registry.contains("renamed"));
        assert_eq!(
            coordinator.delete_task("renamed").await.unwrap_err(),
            Error::Task(TaskError::task_not_found("renamed"))
        );
    }

    #[tokio::test]
    async fn restore_registers_recurring_tasks_only() {
        let state = tempdir().unwrap();
        let time = ScheduleTime::from_hm(22, 45).unwrap();
        {
            let (coordinator, _events) = coordinator(&state).await;
            coordinator
                .save_task(BackupTask::new("daily", "/a", "/b", Schedule::daily(time)))
                .await
                .unwrap();
            coordinator
                .save_task(BackupTask::new("once", "/a", "/c", Schedule::once(time)))
                .await
                .unwrap();
        }

        let (coordinator, _events) = coordinator(&state).await;
        assert_eq!(coordinator.restore_schedules().await, 1);
        assert!(coordinator.registry().contains("daily"));
        assert_eq!(coordinator.tasks().await.len(), 2);
    }

    #[tokio::test]
    async fn scheduled_run_of_deleted_task_is_skipped() {
        let state = tempdir().unwrap();
        let (coordinator, mut events) = coordinator(&state).await;
        assert!(coordinator.run_scheduled("gone").await.unwrap().is_none());
        assert!(drain(&mut events).is_empty());
    }

    #[tokio::test]
    async fn scheduled_run_waits_for_busy_destination() {
        let state = tempdir().unwrap();
        let source = tempdir().unwrap();
        let destination = tempdir().unwrap();
        fs::write(source.path().join("a.txt"), "a").unwrap();
        let (coordinator, _events) = coordinator(&state).await;
        coordinator
            .save_task(BackupTask::new(
                "nightly",
                source.path(),
                destination.path(),
                Schedule::daily(ScheduleTime::from_hm(1, 0).unwrap()),
            ))
            .await
            .unwrap();

        let guard = coordinator
            .destination_lock(destination.path())
            .await
            .try_lock_owned()
            .unwrap();
        let scheduled = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.run_scheduled("nightly").await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!scheduled.is_finished());

        drop(guard);
        let outcome = scheduled.await.unwrap().unwrap().unwrap();
        let RunOutcome::Started(handle) = outcome else {
            panic!("expected a started run");
        };
        assert_eq!(handle.wait().await.unwrap().unwrap().copied_files, 1);
    }

    #[tokio::test]
    async fn history_write_failure_is_reported_as_failed() {
        let state = tempdir().unwrap();
        let source = tempdir().unwrap();
        let destination = tempdir().unwrap();
        fs::write(source.path().join("a.txt"), "a").unwrap();
        let (coordinator, mut events) = coordinator(&state).await;
        fs::create_dir(state.path().join(format!("{HISTORY_FILE}.tmp"))).unwrap();

        let RunOutcome::Started(handle) = coordinator
            .run_manual(source.path(), destination.path())
            .await
            .unwrap()
        else {
            panic!("expected a started run");
        };
        assert_eq!(handle.wait().await.unwrap(), None);

        let events = drain(&mut events);
        assert!(matches!(events.last(), Some(BackupEvent::Failed { .. })));
        assert!(!events.iter().any(|event| matches!(event, BackupEvent::Completed { .. })));
        assert!(coordinator.history().await.is_empty());
        assert!(coordinator.log().await.is_empty());
    }

    #[tokio::test]
    async fn fatal_worker_error_emits_failed_without_history() {
        let state = tempdir().unwrap();
        let source = tempdir().unwrap();
        let destination = tempdir().unwrap();
        fs::write(source.path().join("a.txt"), "a").unwrap();
        fs::create_dir(source.path().join("sub")).unwrap();
        fs::write(source.path().join("sub").join("b.txt"), "b").unwrap();
        // A file where the folder must go stops the run after it was started
        fs::write(destination.path().join("sub"), "not a folder").unwrap();
        let (coordinator, mut events) = coordinator(&state).await;

        let RunOutcome::Started(handle) = coordinator
            .run_manual(source.path(), destination.path())
            .await
            .unwrap()
        else {
            panic!("expected a started run");
        };
        let run_id = handle.run_id;
        assert_eq!(handle.wait().await.unwrap(), None);

        let events = drain(&mut events);
        match events.last() {
            Some(BackupEvent::Failed { run_id: failed, errors }) => {
                assert_eq!(*failed, run_id);
                assert_eq!(errors.len(), 1);
            }
            other => panic!("unexpected last event: {other:?}"),
        }
        assert!(!events.iter().any(|event| matches!(event, BackupEvent::Completed { .. })));
        assert!(coordinator.history().await.is_empty());
        assert!(coordinator.log().await.is_empty());
    }

    #[tokio::test]
    async fn aliased_destination_shares_the_lock() {
        let state = tempdir().unwrap();
        let source = tempdir().unwrap();
        let destination = tempdir().unwrap();
        fs::write(source.path().join("a.txt"), "a").unwrap();
        fs::create_dir(destination.path().join("sub")).unwrap();
        let (coordinator, _events) = coordinator(&state).await;

        let alias = destination.path().join("sub").join("..");
        let guard = coordinator
            .destination_lock(&alias)
            .await
            .try_lock_owned()
            .unwrap();
        let err = coordinator
            .run_manual(source.path(), destination.path())
            .await
            .err()
            .unwrap();
        assert_eq!(
            err,
            Error::Backup(BackupError::run_in_progress(destination.path()))
        );

        drop(guard);
        let _other = coordinator.destination_lock(source.path()).await;
        assert_eq!(coordinator.destination_locks.len(), 1);
    }
}
