//! trivia-core — Question model, catalog queries, and quiz selection.
//!
//! This crate defines the data model, the `CatalogStore` trait, and the three
//! engines the trivia service is built on: pagination, search, and the quiz
//! selector.

pub mod catalog;
pub mod error;
pub mod model;
pub mod pagination;
pub mod query;
pub mod quiz;
pub mod response;
pub mod search;
pub mod service;
pub mod traits;

#[cfg(test)]
mod testing;

pub use error::{CatalogError, CatalogResult};
pub use model::{Category, CategoryId, FormattedQuestion, NewQuestion, Question, QuestionId};
pub use pagination::{paginate, PageNumber, PAGE_SIZE};
pub use quiz::{next_quiz_question, QuizDraw, QuizRequest};
pub use search::{search, SearchTerm};
pub use service::CatalogService;
pub use traits::CatalogStore;
