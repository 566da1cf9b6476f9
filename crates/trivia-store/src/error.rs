//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

use trivia_core::model::{CategoryId, QuestionId};

/// Errors raised by the bundled catalog stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Two questions share an id.
    #[error("duplicate question id {0}")]
    DuplicateQuestion(QuestionId),

    /// Two categories share an id.
    #[error("duplicate category id {0}")]
    DuplicateCategory(CategoryId),

    /// A category label was blank.
    #[error("category type must not be empty")]
    EmptyCategoryLabel,

    /// The store's lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,

    /// Writing the catalog file failed.
    #[error("failed to persist catalog to {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
