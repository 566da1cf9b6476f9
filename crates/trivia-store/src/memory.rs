//! In-memory catalog store.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use trivia_core::catalog::Catalog;
use trivia_core::model::{
    sort_categories, Category, CategoryId, NewQuestion, Question, QuestionId,
};
use trivia_core::query::{QuestionFilter, QuestionQuery};
use trivia_core::traits::CatalogStore;

use crate::error::StoreError;

#[derive(Debug, Clone, Default)]
pub(crate) struct Inner {
    questions: BTreeMap<QuestionId, Question>,
    categories: BTreeMap<CategoryId, Category>,
    next_question_id: QuestionId,
    next_category_id: CategoryId,
}

/// A catalog held in memory, ordered by id.
///
/// Ids are handed out from monotonically increasing counters, so a deleted
/// question's id is never reused.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_question_id: 1,
                next_category_id: 1,
                ..Inner::default()
            }),
        }
    }

    /// Seed a store from a catalog. Duplicate ids are rejected.
    pub fn from_catalog(catalog: Catalog) -> Result<Self, StoreError> {
        let mut inner = Inner::default();

        for category in catalog.categories {
            if category.kind.trim().is_empty() {
                return Err(StoreError::EmptyCategoryLabel);
            }
            let id = category.id;
            if inner.categories.insert(id, category).is_some() {
                return Err(StoreError::DuplicateCategory(id));
            }
        }
        for question in catalog.questions {
            let id = question.id;
            if inner.questions.insert(id, question).is_some() {
                return Err(StoreError::DuplicateQuestion(id));
            }
        }

        inner.next_question_id = inner.questions.keys().max().map_or(1, |m| m + 1);
        inner.next_category_id = inner.categories.keys().max().map_or(1, |m| m + 1);

        Ok(Self {
            inner: RwLock::new(inner),
        })
    }

    /// A copy of the current contents.
    pub fn snapshot(&self) -> Result<Catalog, StoreError> {
        let inner = self.read()?;
        Ok(Catalog {
            categories: inner.categories.values().cloned().collect(),
            questions: inner.questions.values().cloned().collect(),
        })
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.questions.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    pub(crate) fn insert_question_now(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let mut inner = self.write()?;
        let id = inner.next_question_id;
        inner.next_question_id += 1;
        let stored = question.with_id(id);
        inner.questions.insert(id, stored.clone());
        Ok(stored)
    }

    pub(crate) fn delete_question_now(&self, id: QuestionId) -> Result<bool, StoreError> {
        Ok(self.write()?.questions.remove(&id).is_some())
    }

    pub(crate) fn insert_category_now(&self, label: &str) -> Result<Category, StoreError> {
        if label.trim().is_empty() {
            return Err(StoreError::EmptyCategoryLabel);
        }
        let mut inner = self.write()?;
        let id = inner.next_category_id;
        inner.next_category_id += 1;
        let category = Category {
            id,
            kind: label.to_string(),
        };
        inner.categories.insert(id, category.clone());
        Ok(category)
    }

    /// Copy of the full state, counters included, for `restore`.
    pub(crate) fn checkpoint(&self) -> Result<Inner, StoreError> {
        Ok(self.read()?.clone())
    }

    pub(crate) fn restore(&self, state: Inner) -> Result<(), StoreError> {
        *self.write()? = state;
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn questions(&self, query: &QuestionQuery) -> anyhow::Result<Vec<Question>> {
        let inner = self.read()?;
        let matching = inner.questions.values().filter(|q| query.filter.matches(q));
        let selected = match query.window {
            Some(w) => matching.skip(w.offset).take(w.limit).cloned().collect(),
            None => matching.cloned().collect(),
        };
        Ok(selected)
    }

    async fn count_questions(&self, filter: &QuestionFilter) -> anyhow::Result<usize> {
        let inner = self.read()?;
        Ok(inner.questions.values().filter(|q| filter.matches(q)).count())
    }

    async fn question_ids(&self, filter: &QuestionFilter) -> anyhow::Result<Vec<QuestionId>> {
        let inner = self.read()?;
        Ok(inner
            .questions
            .values()
            .filter(|q| filter.matches(q))
            .map(|q| q.id)
            .collect())
    }

    async fn question(&self, id: QuestionId) -> anyhow::Result<Option<Question>> {
        Ok(self.read()?.questions.get(&id).cloned())
    }

    async fn insert_question(&self, question: NewQuestion) -> anyhow::Result<Question> {
        Ok(self.insert_question_now(question)?)
    }

    async fn delete_question(&self, id: QuestionId) -> anyhow::Result<bool> {
        Ok(self.delete_question_now(id)?)
    }

    async fn categories(&self) -> anyhow::Result<Vec<Category>> {
        let mut categories: Vec<Category> = self.read()?.categories.values().cloned().collect();
        sort_categories(&mut categories);
        Ok(categories)
    }

    async fn insert_category(&self, label: &str) -> anyhow::Result<Category> {
        Ok(self.insert_category_now(label)?)
    }

    async fn category(&self, id: CategoryId) -> anyhow::Result<Option<Category>> {
        Ok(self.read()?.categories.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::query::Window;

    fn seeded(n: i64) -> MemoryStore {
        let questions = (1..=n)
            .map(|id| Question {
                id: id * 2,
                question: format!("Question {id}?"),
                answer: format!("Answer {id}"),
                category: id % 2,
                difficulty: 1,
            })
            .collect();
        let categories = vec![
            Category {
                id: 0,
                kind: "Science".into(),
            },
            Category {
                id: 1,
                kind: "Art".into(),
            },
        ];
        MemoryStore::from_catalog(Catalog {
            categories,
            questions,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn windowed_scan_is_ordered() {
        let store = seeded(25);
        let query = QuestionQuery::new(QuestionFilter::all()).with_window(Window {
            offset: 10,
            limit: 10,
        });
        let page = store.questions(&query).await.unwrap();
        let ids: Vec<_> = page.iter().map(|q| q.id).collect();
        assert_eq!(ids, (11..=20).map(|i| i * 2).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn filter_by_category_zero() {
        let store = seeded(6);
        let ids = store
            .question_ids(&QuestionFilter::in_category(Some(0)))
            .await
            .unwrap();
        assert_eq!(ids, vec![4, 8, 12]);
        assert_eq!(
            store
                .count_questions(&QuestionFilter::in_category(Some(0)))
                .await
                .unwrap(),
            3
        );
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let store = seeded(3);
        let new = || NewQuestion {
            question: "New?".into(),
            answer: "Yes".into(),
            category: 1,
            difficulty: 2,
        };
        let first = store.insert_question(new()).await.unwrap();
        assert_eq!(first.id, 7);
        assert!(store.delete_question(first.id).await.unwrap());
        assert!(!store.delete_question(first.id).await.unwrap());
        let second = store.insert_question(new()).await.unwrap();
        assert_eq!(second.id, 8);
        assert!(store.question(first.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn categories_sorted_by_label() {
        let store = seeded(1);
        let created = store.insert_category("History").await.unwrap();
        assert_eq!(created.id, 2);
        let labels: Vec<_> = store
            .categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.kind)
            .collect();
        assert_eq!(labels, vec!["Art", "History", "Science"]);
        assert!(store.insert_category("  ").await.is_err());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let q = Question {
            id: 1,
            question: "Q".into(),
            answer: "A".into(),
            category: 1,
            difficulty: 1,
        };
        let err = MemoryStore::from_catalog(Catalog {
            categories: vec![],
            questions: vec![q.clone(), q],
        })
        .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateQuestion(1)));
    }

    #[test]
    fn snapshot_round_trips_contents() {
        let store = seeded(4);
        let snap = store.snapshot().unwrap();
        assert_eq!(snap.questions.len(), 4);
        assert_eq!(snap.categories.len(), 2);
        assert_eq!(store.len().unwrap(), 4);
    }
}
