//! Catalog error types.
//!
//! Every failure the query and quiz operations can produce, distinguishable by
//! kind. Normal "nothing here" outcomes (`EmptyResult`, `NoQuestionAvailable`,
//! `NotFound`) are kept apart from real faults so callers never have to guess
//! from a catch-all.

use thiserror::Error;

use crate::model::QuestionId;

/// Errors produced by the catalog core.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The caller supplied missing or malformed input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A page window or filtered set has no elements.
    #[error("no matching questions")]
    EmptyResult,

    /// The referenced question does not exist.
    #[error("question {0} not found")]
    NotFound(QuestionId),

    /// Every eligible quiz question has already been served.
    #[error("no question available")]
    NoQuestionAvailable,

    /// The store contradicted itself between two reads.
    #[error("store inconsistency: {0}")]
    StoreInconsistency(String),

    /// The catalog store failed.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl CatalogError {
    /// Status code following the trivia API conventions.
    pub fn status(&self) -> u16 {
        match self {
            CatalogError::EmptyResult
            | CatalogError::NotFound(_)
            | CatalogError::NoQuestionAvailable => 404,
            CatalogError::InvalidInput(_)
            | CatalogError::StoreInconsistency(_)
            | CatalogError::Store(_) => 422,
        }
    }

    /// Short public message for the status code.
    pub fn message(&self) -> &'static str {
        match self.status() {
            404 => "resource not found",
            _ => "unprocessable",
        }
    }

    /// Returns `true` for expected outcomes that are not faults.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CatalogError::EmptyResult
                | CatalogError::NotFound(_)
                | CatalogError::NoQuestionAvailable
        )
    }
}

/// Result alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
