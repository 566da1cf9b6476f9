//! In-crate store double for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::model::{sort_categories, Category, NewQuestion, Question, QuestionId};
use crate::query::{QuestionFilter, QuestionQuery};
use crate::traits::CatalogStore;

#[derive(Default)]
pub(crate) struct VecStore {
    questions: Mutex<Vec<Question>>,
    categories: Mutex<Vec<Category>>,
    vanished: Mutex<Vec<QuestionId>>,
}

impl VecStore {
    pub(crate) fn new(questions: Vec<Question>, categories: Vec<Category>) -> Self {
        let mut questions = questions;
        questions.sort_by_key(|q| q.id);
        Self {
            questions: Mutex::new(questions),
            categories: Mutex::new(categories),
            vanished: Mutex::new(Vec::new()),
        }
    }

    /// Keep `id` in scans but make single-record fetches miss it, as if it
    /// were deleted between the two reads.
    pub(crate) fn vanish_on_fetch(&self, id: QuestionId) {
        self.vanished.lock().unwrap().push(id);
    }

    /// Questions given as `(id, category)` pairs.
    pub(crate) fn with_pairs(pairs: &[(QuestionId, i64)]) -> Self {
        let questions = pairs
            .iter()
            .map(|&(id, category)| question(id, category))
            .collect();
        Self::new(questions, Vec::new())
    }
}

pub(crate) fn question(id: QuestionId, category: i64) -> Question {
    Question {
        id,
        question: format!("Question number {id}?"),
        answer: format!("Answer {id}"),
        category,
        difficulty: 1 + (id % 5) as u32,
    }
}

#[async_trait]
impl CatalogStore for VecStore {
    fn name(&self) -> &str {
        "vec"
    }

    async fn questions(&self, query: &QuestionQuery) -> anyhow::Result<Vec<Question>> {
        let all = self.questions.lock().unwrap();
        let matched: Vec<Question> = all
            .iter()
            .filter(|q| query.filter.matches(q))
            .cloned()
            .collect();
        Ok(match query.window {
            Some(w) => w.apply(&matched).to_vec(),
            None => matched,
        })
    }

    async fn count_questions(&self, filter: &QuestionFilter) -> anyhow::Result<usize> {
        Ok(self
            .questions
            .lock()
            .unwrap()
            .iter()
            .filter(|q| filter.matches(q))
            .count())
    }

    async fn question_ids(&self, filter: &QuestionFilter) -> anyhow::Result<Vec<QuestionId>> {
        Ok(self
            .questions
            .lock()
            .unwrap()
            .iter()
            .filter(|q| filter.matches(q))
            .map(|q| q.id)
            .collect())
    }

    async fn question(&self, id: QuestionId) -> anyhow::Result<Option<Question>> {
        if self.vanished.lock().unwrap().contains(&id) {
            return Ok(None);
        }
        Ok(self
            .questions
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == id)
            .cloned())
    }

    async fn insert_question(&self, question: NewQuestion) -> anyhow::Result<Question> {
        let mut all = self.questions.lock().unwrap();
        let id = all.last().map(|q| q.id + 1).unwrap_or(1);
        let stored = question.with_id(id);
        all.push(stored.clone());
        Ok(stored)
    }

    async fn delete_question(&self, id: QuestionId) -> anyhow::Result<bool> {
        let mut all = self.questions.lock().unwrap();
        let before = all.len();
        all.retain(|q| q.id != id);
        Ok(all.len() != before)
    }

    async fn categories(&self) -> anyhow::Result<Vec<Category>> {
        let mut cats = self.categories.lock().unwrap().clone();
        sort_categories(&mut cats);
        Ok(cats)
    }

    async fn insert_category(&self, label: &str) -> anyhow::Result<Category> {
        let mut cats = self.categories.lock().unwrap();
        let id = cats.iter().map(|c| c.id).max().map(|m| m + 1).unwrap_or(1);
        let category = Category {
            id,
            kind: label.to_string(),
        };
        cats.push(category.clone());
        Ok(category)
    }
}
