use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    NewFolder,
    NewFile,
    ModifiedFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub kind: DiffKind,
    pub destination: PathBuf,
    pub size: u64,
}

/// Pending changes between a source tree and its destination, in walk order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffReport {
    pub entries: Vec<DiffEntry>,
    pub total_bytes: u64,
}

impl DiffReport {
    pub fn push(&mut self, kind: DiffKind, destination: PathBuf, size: u64) {
        if kind != DiffKind::NewFolder {
            self.total_bytes += size;
        }
        self.entries.push(DiffEntry {
            kind,
            destination,
            size,
        });
    }

    pub fn has_changes(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn count(&self, kind: DiffKind) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }

    /// New folders and new files as shown in a preview, folders prefixed with `New folder: `.
    pub fn new_entries(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|entry| match entry.kind {
                DiffKind::NewFolder => Some(format!("New folder: {}", entry.destination.display())),
                DiffKind::NewFile => Some(entry.destination.display().to_string()),
                DiffKind::ModifiedFile => None,
            })
            .collect()
    }

    pub fn modified_entries(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.kind == DiffKind::ModifiedFile)
            .map(|entry| entry.destination.display().to_string())
            .collect()
    }

    pub fn total_kilobytes(&self) -> f64 {
        self.total_bytes as f64 / 1024.0
    }
}
