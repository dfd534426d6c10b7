use std::path::PathBuf;

use crate::error::FetchError;

/// How a single code's fetch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// A non-empty file was already present; no request was made.
    Cached,
    /// Downloaded, validated and renamed into place.
    Fetched,
    Failed,
}

/// Result of one `ArtifactFetcher::fetch` call.
#[derive(Debug)]
pub struct FetchOutcome {
    pub code: String,
    pub destination: PathBuf,
    pub status: FetchStatus,
    /// Requests issued (0 when cached).
    pub attempts_used: u32,
    pub last_error: Option<FetchError>,
}

impl FetchOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self.status, FetchStatus::Cached | FetchStatus::Fetched)
    }

    /// One-line human-readable description.
    pub fn message(&self) -> String {
        let dest = self.destination.display();
        match self.status {
            FetchStatus::Cached => format!("OK (already exists): {}", dest),
            FetchStatus::Fetched => format!("OK: {}", dest),
            FetchStatus::Failed => match &self.last_error {
                Some(FetchError::Transport(e)) => format!(
                    "ERROR: download of {} failed after {} attempt(s). Last error: {}",
                    self.code, self.attempts_used, e
                ),
                Some(e) => format!("ERROR: {} ({})", e, self.code),
                None => format!("ERROR: download of {} failed", self.code),
            },
        }
    }
}
