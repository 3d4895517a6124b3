use thiserror::Error;

use crate::task::TaskId;

/// Failures loading or persisting the list. Validation problems are not errors; see [`crate::Skip`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("snapshot is not a valid task list: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("no task ids left after {0}")]
    IdsExhausted(TaskId),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
