//! Catalog service orchestrator.
//!
//! Ties the pagination, search, and quiz engines to a `CatalogStore` and shapes
//! their results into response envelopes. Every operation validates its input
//! struct before touching the store.

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::model::{CategoryId, NewQuestion, Question, QuestionId};
use crate::pagination::PageNumber;
use crate::query::{QuestionFilter, QuestionQuery};
use crate::quiz::{next_quiz_question, QuizRequest};
use crate::response::{
    CategoriesResponse, CategoryMap, CreatedResponse, DeletedResponse, QuestionListResponse,
    QuestionPageResponse, QuizResponse,
};
use crate::search::SearchTerm;
use crate::traits::CatalogStore;

/// Body of a search request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default, rename = "searchTerm", alias = "search_term")]
    pub search_term: Option<String>,
}

impl SearchRequest {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
        }
    }
}

/// Body of a create-question request. Numbers may arrive as strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewQuestionRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub category: Option<CategoryId>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub difficulty: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Text(String),
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IntOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IntOrString::Int(n)) => Ok(Some(n)),
        Some(IntOrString::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected an integer, got {s:?}"))),
    }
}

impl NewQuestionRequest {
    /// Check that every field is present and non-empty.
    pub fn validate(self) -> CatalogResult<NewQuestion> {
        let question = non_blank(self.question, "question")?;
        let answer = non_blank(self.answer, "answer")?;
        let category = self
            .category
            .ok_or_else(|| CatalogError::InvalidInput("category is missing".into()))?;
        let difficulty = self
            .difficulty
            .ok_or_else(|| CatalogError::InvalidInput("difficulty is missing".into()))?;
        let difficulty = u32::try_from(difficulty)
            .ok()
            .filter(|d| *d >= 1)
            .ok_or_else(|| {
                CatalogError::InvalidInput(format!(
                    "difficulty must be a positive integer, got {difficulty}"
                ))
            })?;

        Ok(NewQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

fn non_blank(value: Option<String>, field: &str) -> CatalogResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CatalogError::InvalidInput(format!("{field} is missing"))),
    }
}

/// The catalog service.
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    rng: Mutex<StdRng>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Service with a fixed quiz seed, for reproducible draws.
    pub fn with_seed(store: Arc<dyn CatalogStore>, seed: u64) -> Self {
        Self {
            store,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn store(&self) -> &dyn CatalogStore {
        self.store.as_ref()
    }

    /// All categories, ordered by label.
    pub async fn list_categories(&self) -> CatalogResult<CategoriesResponse> {
        let categories = self.store.categories().await?;
        if categories.is_empty() {
            return Err(CatalogError::EmptyResult);
        }
        Ok(CategoriesResponse {
            success: true,
            categories: CategoryMap(categories),
        })
    }

    /// One page of the id-ordered catalog. Only the page window is read.
    pub async fn list_questions(&self, page: PageNumber) -> CatalogResult<QuestionPageResponse> {
        let Some(window) = page.window() else {
            debug!(%page, "non-positive page requested");
            return Err(CatalogError::EmptyResult);
        };

        let query = QuestionQuery::new(QuestionFilter::all()).with_window(window);
        let questions = self.store.questions(&query).await?;
        if questions.is_empty() {
            debug!(%page, "page beyond the end of the catalog");
            return Err(CatalogError::EmptyResult);
        }

        let total_questions = self.store.count_questions(&QuestionFilter::all()).await?;
        let categories = self.store.categories().await?;

        Ok(QuestionPageResponse {
            success: true,
            questions: questions.iter().map(Question::format).collect(),
            total_questions,
            categories: CategoryMap(categories),
            current_category: None,
        })
    }

    /// Every question in one category, ascending id.
    pub async fn questions_by_category(
        &self,
        category: CategoryId,
    ) -> CatalogResult<QuestionListResponse> {
        let query = QuestionQuery::new(QuestionFilter::in_category(Some(category)));
        let questions = self.store.questions(&query).await?;
        if questions.is_empty() {
            return Err(CatalogError::EmptyResult);
        }
        Ok(QuestionListResponse {
            success: true,
            total_questions: questions.len(),
            questions: questions.iter().map(Question::format).collect(),
            current_category: Some(category),
        })
    }

    /// Every question whose text contains the term, ignoring case.
    pub async fn search_questions(
        &self,
        request: &SearchRequest,
    ) -> CatalogResult<QuestionListResponse> {
        let term = SearchTerm::new(request.search_term.as_deref())?;
        let questions = self
            .store
            .questions(&QuestionQuery::new(term.filter()))
            .await?;
        debug!(term = term.as_str(), matches = questions.len(), "search");

        Ok(QuestionListResponse {
            success: true,
            total_questions: questions.len(),
            questions: questions.iter().map(Question::format).collect(),
            current_category: None,
        })
    }

    pub async fn create_question(
        &self,
        request: NewQuestionRequest,
    ) -> CatalogResult<CreatedResponse> {
        let new_question = request.validate()?;
        if self.store.category(new_question.category).await?.is_none() {
            warn!(
                category = new_question.category,
                "creating question in a category that does not exist"
            );
        }
        let stored = self.store.insert_question(new_question).await?;
        info!(id = stored.id, category = stored.category, "question created");
        Ok(CreatedResponse {
            success: true,
            created: stored.id,
        })
    }

    pub async fn delete_question(&self, id: QuestionId) -> CatalogResult<DeletedResponse> {
        if !self.store.delete_question(id).await? {
            return Err(CatalogError::NotFound(id));
        }
        info!(id, "question deleted");
        Ok(DeletedResponse {
            success: true,
            deleted: id,
        })
    }

    /// Next quiz question, or `question: null` once the pool is exhausted.
    pub async fn next_quiz_question(&self, request: &QuizRequest) -> CatalogResult<QuizResponse> {
        let mut rng = self.fork_rng();
        let draw = next_quiz_question(self.store.as_ref(), request, &mut rng).await?;
        if draw.question().is_none() {
            info!(category = ?request.category(), "quiz pool exhausted");
        }
        Ok(QuizResponse {
            success: true,
            question: draw.into_option(),
        })
    }

    fn fork_rng(&self) -> StdRng {
        let mut parent = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        StdRng::seed_from_u64(parent.gen())
    }
}
