//! Core trait definition for catalog stores.
//!
//! The query engine and quiz selector only talk to persistence through this
//! trait. Implementations live in `trivia-store`.

use async_trait::async_trait;

use crate::model::{Category, CategoryId, NewQuestion, Question, QuestionId};
use crate::query::{QuestionFilter, QuestionQuery};

// ---------------------------------------------------------------------------
// Catalog Store trait
// ---------------------------------------------------------------------------

/// Durable storage of questions and categories.
///
/// Every read reflects the store's current state; callers never cache ids
/// across calls. Retries and timeouts, if any, are the implementation's
/// business.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Human-readable backend name (e.g. "memory").
    fn name(&self) -> &str;

    /// Questions matching `query.filter`, ascending by id, restricted to
    /// `query.window` when given. Only the window is materialized.
    async fn questions(&self, query: &QuestionQuery) -> anyhow::Result<Vec<Question>>;

    /// Number of questions matching `filter`.
    async fn count_questions(&self, filter: &QuestionFilter) -> anyhow::Result<usize>;

    /// Ids of the questions matching `filter`, ascending.
    async fn question_ids(&self, filter: &QuestionFilter) -> anyhow::Result<Vec<QuestionId>>;

    /// A single question by id.
    async fn question(&self, id: QuestionId) -> anyhow::Result<Option<Question>>;

    /// Store a new question and return it with its assigned id.
    async fn insert_question(&self, question: NewQuestion) -> anyhow::Result<Question>;

    /// Delete a question. Returns `false` if it did not exist.
    async fn delete_question(&self, id: QuestionId) -> anyhow::Result<bool>;

    /// All categories, ordered by label.
    async fn categories(&self) -> anyhow::Result<Vec<Category>>;

    /// Store a new category and return it with its assigned id.
    async fn insert_category(&self, label: &str) -> anyhow::Result<Category>;

    /// A single category by id.
    async fn category(&self, id: CategoryId) -> anyhow::Result<Option<Category>> {
        Ok(self.categories().await?.into_iter().find(|c| c.id == id))
    }
}
