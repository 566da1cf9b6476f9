//! Store wrapper for testing.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use trivia_core::model::{Category, CategoryId, NewQuestion, Question, QuestionId};
use trivia_core::query::{QuestionFilter, QuestionQuery};
use trivia_core::traits::CatalogStore;

/// A store that lets its single-record reads drift away from its scans.
///
/// Wraps a real store and, for configured ids, makes `question()` miss the
/// record or report a different category, the way a store mutated between two
/// reads would. Also records the queries it receives so tests can check what
/// was asked for.
pub struct DriftingStore {
    inner: Arc<dyn CatalogStore>,
    forgotten: Mutex<HashSet<QuestionId>>,
    moved: Mutex<HashMap<QuestionId, CategoryId>>,
    scan_count: AtomicU32,
    fetch_count: AtomicU32,
    last_query: Mutex<Option<QuestionQuery>>,
}

impl DriftingStore {
    pub fn new(inner: Arc<dyn CatalogStore>) -> Self {
        Self {
            inner,
            forgotten: Mutex::new(HashSet::new()),
            moved: Mutex::new(HashMap::new()),
            scan_count: AtomicU32::new(0),
            fetch_count: AtomicU32::new(0),
            last_query: Mutex::new(None),
        }
    }

    /// Make single-record fetches of `id` return nothing.
    pub fn forget_on_fetch(&self, id: QuestionId) {
        self.forgotten.lock().unwrap().insert(id);
    }

    /// Make single-record fetches of `id` report `category`.
    pub fn move_on_fetch(&self, id: QuestionId, category: CategoryId) {
        self.moved.lock().unwrap().insert(id, category);
    }

    /// Number of `questions()` scans made.
    pub fn scan_count(&self) -> u32 {
        self.scan_count.load(Ordering::Relaxed)
    }

    /// Number of `question()` fetches made.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }

    /// The last scan query received.
    pub fn last_query(&self) -> Option<QuestionQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogStore for DriftingStore {
    fn name(&self) -> &str {
        "drifting"
    }

    async fn questions(&self, query: &QuestionQuery) -> anyhow::Result<Vec<Question>> {
        self.scan_count.fetch_add(1, Ordering::Relaxed);
        *self.last_query.lock().unwrap() = Some(query.clone());
        self.inner.questions(query).await
    }

    async fn count_questions(&self, filter: &QuestionFilter) -> anyhow::Result<usize> {
        self.inner.count_questions(filter).await
    }

    async fn question_ids(&self, filter: &QuestionFilter) -> anyhow::Result<Vec<QuestionId>> {
        self.inner.question_ids(filter).await
    }

    async fn question(&self, id: QuestionId) -> anyhow::Result<Option<Question>> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        let forgotten = self.forgotten.lock().unwrap().contains(&id);
        if forgotten {
            return Ok(None);
        }
        let moved_to = self.moved.lock().unwrap().get(&id).copied();
        let found = self.inner.question(id).await?;
        Ok(found.map(|mut q| {
            if let Some(category) = moved_to {
                q.category = category;
            }
            q
        }))
    }

    async fn insert_question(&self, question: NewQuestion) -> anyhow::Result<Question> {
        self.inner.insert_question(question).await
    }

    async fn delete_question(&self, id: QuestionId) -> anyhow::Result<bool> {
        self.inner.delete_question(id).await
    }

    async fn categories(&self) -> anyhow::Result<Vec<Category>> {
        self.inner.categories().await
    }

    async fn insert_category(&self, label: &str) -> anyhow::Result<Category> {
        self.inner.insert_category(label).await
    }
}
