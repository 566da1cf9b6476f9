//! Response envelopes returned by `CatalogService`.
//!
//! Field names follow the trivia API: every body carries `success`, question
//! lists carry `total_questions` and `current_category`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::CatalogError;
use crate::model::{Category, CategoryId, FormattedQuestion, QuestionId};

/// Categories rendered as an `{id: type}` object, preserving listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap(pub Vec<Category>);

impl Serialize for CategoryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for category in &self.0 {
            map.serialize_entry(&category.id.to_string(), &category.kind)?;
        }
        map.end()
    }
}

/// GET /categories
#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
}

/// GET /questions
#[derive(Debug, Clone, Serialize)]
pub struct QuestionPageResponse {
    pub success: bool,
    pub questions: Vec<FormattedQuestion>,
    pub total_questions: usize,
    pub categories: CategoryMap,
    pub current_category: Option<CategoryId>,
}

/// Category listing and search results.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<FormattedQuestion>,
    pub total_questions: usize,
    pub current_category: Option<CategoryId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: QuestionId,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: QuestionId,
}

/// POST /quizzes. `question` is null once the pool is exhausted.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<FormattedQuestion>,
}

/// Failure body: `{"success": false, "error": 404, "message": "resource not found"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl From<&CatalogError> for ErrorResponse {
    fn from(err: &CatalogError) -> Self {
        Self {
            success: false,
            error: err.status(),
            message: err.message().to_string(),
        }
    }
}
