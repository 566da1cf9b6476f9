//! Core data model types for trivia.
//!
//! Questions and categories as the catalog stores them, plus the flat
//! `FormattedQuestion` record every operation hands back to callers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned question identifier. Ascending order is the catalog order.
pub type QuestionId = i64;

/// Category identifier. `0` is a legal id.
pub type CategoryId = i64;

/// A stored trivia question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier, immutable after creation.
    pub id: QuestionId,
    /// The question text.
    pub question: String,
    /// The expected answer.
    pub answer: String,
    /// Weak reference to `Category::id`.
    pub category: CategoryId,
    /// Difficulty score, at least 1.
    pub difficulty: u32,
}

impl Question {
    /// Flatten into the record returned to callers.
    pub fn format(&self) -> FormattedQuestion {
        FormattedQuestion {
            id: self.id,
            question: self.question.clone(),
            answer: self.answer.clone(),
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// The flat `{id, question, answer, category, difficulty}` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedQuestion {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: u32,
}

impl From<&Question> for FormattedQuestion {
    fn from(q: &Question) -> Self {
        q.format()
    }
}

/// A question that has passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: u32,
}

impl NewQuestion {
    /// Attach a store-assigned id.
    pub fn with_id(self, id: QuestionId) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// A question category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: CategoryId,
    /// Display label, also the sort key for category listings.
    #[serde(rename = "type")]
    pub kind: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.id)
    }
}

/// Sort categories the way listings present them: by label, then id.
pub fn sort_categories(categories: &mut [Category]) {
    categories.sort_by(|a, b| a.kind.cmp(&b.kind).then(a.id.cmp(&b.id)));
}
