use std::path::PathBuf;

/// Failure reading the permission store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database could not be opened read-only.
    #[error("cannot open permission store at {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The `access` table or one of its expected columns is missing.
    #[error("cannot query permission store at {}: {source}", path.display())]
    QueryPreparation {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A row could not be fetched after the query started.
    #[error("failed reading rows from permission store at {}: {source}", path.display())]
    Query {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
}

/// Failure producing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to serialize report as JSON: {0}")]
    Json(#[from] serde_json::Error),
}
