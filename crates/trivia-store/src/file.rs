//! TOML-file-backed catalog store.
//!
//! Reads are served from memory; every mutation rewrites the catalog file.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use async_trait::async_trait;

use trivia_core::catalog::{parse_catalog, render_catalog, Catalog};
use trivia_core::model::{Category, CategoryId, NewQuestion, Question, QuestionId};
use trivia_core::query::{QuestionFilter, QuestionQuery};
use trivia_core::traits::CatalogStore;

use crate::error::StoreError;
use crate::memory::MemoryStore;

/// A catalog persisted as a single TOML file.
pub struct FileStore {
    path: PathBuf,
    memory: MemoryStore,
    // Serializes mutate-then-write so the file never lags a newer mutation.
    persist: Mutex<()>,
}

impl FileStore {
    /// Open the catalog at `path`. A missing file starts an empty catalog that
    /// is created on the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let catalog = if path.exists() {
            parse_catalog(&path)?
        } else {
            tracing::info!("catalog {} does not exist yet, starting empty", path.display());
            Catalog::default()
        };
        let memory = MemoryStore::from_catalog(catalog)
            .with_context(|| format!("invalid catalog: {}", path.display()))?;

        Ok(Self {
            path,
            memory,
            persist: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `op` and persist. A failed write rolls the memory state back, so
    /// memory and file never disagree.
    fn mutate<T>(&self, op: impl FnOnce(&MemoryStore) -> Result<T, StoreError>) -> Result<T> {
        let _guard = self.persist.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = self.memory.checkpoint()?;
        let value = op(&self.memory)?;
        if let Err(e) = self.flush() {
            self.memory.restore(saved)?;
            return Err(e);
        }
        Ok(value)
    }

    fn flush(&self) -> Result<()> {
        let rendered = render_catalog(&self.memory.snapshot()?)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::Persist {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        std::fs::write(&self.path, rendered).map_err(|source| StoreError::Persist {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!("catalog written to {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn questions(&self, query: &QuestionQuery) -> Result<Vec<Question>> {
        self.memory.questions(query).await
    }

    async fn count_questions(&self, filter: &QuestionFilter) -> Result<usize> {
        self.memory.count_questions(filter).await
    }

    async fn question_ids(&self, filter: &QuestionFilter) -> Result<Vec<QuestionId>> {
        self.memory.question_ids(filter).await
    }

    async fn question(&self, id: QuestionId) -> Result<Option<Question>> {
        self.memory.question(id).await
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question> {
        self.mutate(|m| m.insert_question_now(question))
    }

    async fn delete_question(&self, id: QuestionId) -> Result<bool> {
        self.mutate(|m| m.delete_question_now(id))
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        self.memory.categories().await
    }

    async fn insert_category(&self, label: &str) -> Result<Category> {
        self.mutate(|m| m.insert_category_now(label))
    }

    async fn category(&self, id: CategoryId) -> Result<Option<Category>> {
        self.memory.category(id).await
    }
}
