use crate::model::backup_result::BackupResult;
use std::path::PathBuf;
use uuid::Uuid;

/// Messages delivered from backup workers to the controlling side, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum BackupEvent {
    Progress {
        run_id: Uuid,
        percent: u8,
    },
    Completed {
        run_id: Uuid,
        result: BackupResult,
    },
    Failed {
        run_id: Uuid,
        errors: Vec<String>,
    },
    NoChanges {
        run_id: Uuid,
        source: PathBuf,
        destination: PathBuf,
    },
}

impl BackupEvent {
    pub fn run_id(&self) -> Uuid {
        match self {
            BackupEvent::Progress { run_id, .. }
            | BackupEvent::Completed { run_id, .. }
            | BackupEvent::Failed { run_id, .. }
            | BackupEvent::NoChanges { run_id, .. } => *run_id,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, BackupEvent::Progress { .. })
    }
}
