use std::io;
use std::path::PathBuf;

/// Files found under the scan root, split by verdict in traversal order.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub good: Vec<PathBuf>,
    pub junk: Vec<PathBuf>,
}

impl ScanResult {
    pub fn total(&self) -> usize {
        self.good.len() + self.junk.len()
    }
}

/// A path that could not be removed.
#[derive(Debug)]
pub struct DeletionFailure {
    pub path: PathBuf,
    pub error: io::Error,
}

/// Outcome of a best-effort batch deletion.
#[derive(Debug, Default)]
pub struct DeletionReport {
    pub deleted: Vec<PathBuf>,
    pub failures: Vec<DeletionFailure>,
    pub bytes_freed: u64,
}

impl DeletionReport {
    pub fn deleted_count(&self) -> usize {
        self.deleted.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
