use std::fmt;
use std::io;

/// Error taxonomy for one sync run.
///
/// Every variant is caught at the task boundary it originates in and reported
/// there; nothing is retried and no failure aborts sibling tasks.
#[derive(Debug)]
pub enum SyncError {
    /// The project checklist upstream is not complete; no task may run.
    NotReady,
    /// A request failed or the server answered with a non-success status.
    Network(String),
    /// Directory creation, file write or archive extraction failed.
    FileSystem(io::Error),
    /// The snapshot carries no grid entries to render.
    EmptyGrid,
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::NotReady => write!(
                f,
                "project not finished: complete all four token categories before syncing"
            ),
            SyncError::Network(msg) => write!(f, "network error: {msg}"),
            SyncError::FileSystem(e) => write!(f, "filesystem error: {e}"),
            SyncError::EmptyGrid => write!(f, "no grid entries to render"),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::FileSystem(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SyncError {
    fn from(e: io::Error) -> Self {
        SyncError::FileSystem(e)
    }
}
