use crate::core::app_config::AppConfig;
use crate::core::coordinator::BackupCoordinator;
use crate::core::io_manager::IOManager;
use crate::core::schedule::schedule_timer::ScheduleTimer;
use crate::interface::core::runnable::Runnable;
use crate::interface::file_system::FileSystemTrait;
use crate::model::error::Error;
use crate::model::error::system::SystemError;
use crate::model::event::BackupEvent;
use crate::model::log::system::SystemLog;
use crate::platform::constants::STATE_LOCK_FILE;
use crate::utils::file_lock::FileLock;
use macros::log;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub struct System {
    app_config: Arc<AppConfig>,
    io_manager: Arc<IOManager>,
    coordinator: Arc<BackupCoordinator>,
    events: Option<UnboundedReceiver<BackupEvent>>,
    scheduler: Option<(oneshot::Sender<()>, JoinHandle<()>)>,
    _state_lock: FileLock,
}

impl System {
    pub async fn initialize(app_config: Arc<AppConfig>) -> Result<Self, Error> {
        log!(SystemLog::Initializing);
        if app_config.is_defaulted() {
            log!(SystemLog::ConfigDefaulted {
                path: app_config.path().to_path_buf()
            });
        }

        let io_manager = Arc::new(IOManager::new(&app_config));
        io_manager
            .create_directory(&app_config.state_directory)
            .await?;
        let state_lock = FileLock::acquire(app_config.state_directory.join(STATE_LOCK_FILE)).await?;
        let (coordinator, events) = BackupCoordinator::new(app_config.clone(), io_manager.clone()).await?;

        log!(SystemLog::InitializeComplete);
        Ok(Self {
            app_config,
            io_manager,
            coordinator: Arc::new(coordinator),
            events: Some(events),
            scheduler: None,
            _state_lock: state_lock,
        })
    }

    /// Registers persisted recurring tasks and starts polling. Returns the job count.
    pub async fn start_scheduler(&mut self) -> usize {
        let count = self.coordinator.restore_schedules().await;
        if self.scheduler.is_none() {
            let timer = Arc::new(ScheduleTimer::new(
                self.app_config.clone(),
                self.coordinator.registry(),
                self.coordinator.clone(),
            ));
            self.scheduler = Some(timer.run());
        }
        log!(SystemLog::Online);
        count
    }

    pub fn coordinator(&self) -> Arc<BackupCoordinator> {
        self.coordinator.clone()
    }

    pub fn take_events(&mut self) -> Option<UnboundedReceiver<BackupEvent>> {
        self.events.take()
    }

    /// Stops the scheduler, lets running backups finish, then closes file operations.
    pub async fn terminate(mut self) -> Result<(), Error> {
        log!(SystemLog::Terminating);
        if let Some((shutdown_tx, handle)) = self.scheduler.take() {
            shutdown_tx
                .send(())
                .map_err(|_| SystemError::ShutdownSignalFailed)?;
            handle.await.map_err(SystemError::thread_panic)?;
        }
        self.coordinator.wait_idle().await;
        self.io_manager.terminate();
        log!(SystemLog::TerminateComplete);
        Ok(())
    }
}
