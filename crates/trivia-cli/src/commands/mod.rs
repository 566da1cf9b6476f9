//! Subcommand implementations and the shared session they run against.

pub mod add;
pub mod categories;
pub mod category_questions;
pub mod delete;
pub mod init;
pub mod play;
pub mod questions;
pub mod search;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::ValueEnum;
use comfy_table::{Cell, Table};
use serde::Serialize;

use trivia_core::response::CategoryMap;
use trivia_core::{CatalogService, FormattedQuestion};
use trivia_store::config::{create_store, load_config_from, StoreConfig};

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Everything a catalog command needs: the service over the configured store,
/// the output format, and the quiz length.
pub struct Session {
    pub service: CatalogService,
    pub format: OutputFormat,
    pub questions_per_play: usize,
    /// Whether mutations outlive the process.
    pub persistent: bool,
}

impl Session {
    pub fn open(
        config_path: Option<&Path>,
        catalog: Option<PathBuf>,
        format: Option<OutputFormat>,
    ) -> Result<Self> {
        let mut config = load_config_from(config_path)?;
        if let Some(path) = catalog {
            config.store = store_for_path(path);
        }

        let format = match format {
            Some(f) => f,
            None => OutputFormat::from_str(&config.default_format, true)
                .map_err(|e| anyhow::anyhow!("invalid default_format in config: {e}"))?,
        };

        let persistent = matches!(config.store, StoreConfig::File { .. });
        let store = create_store(&config.store)?;
        tracing::debug!(store = store.name(), "catalog store opened");

        Ok(Self {
            service: CatalogService::new(store),
            format,
            questions_per_play: config.questions_per_play,
            persistent,
        })
    }

    /// Warn that a mutation against an in-memory catalog is lost on exit.
    pub fn warn_if_volatile(&self, action: &str) {
        if !self.persistent {
            tracing::warn!("{action} in an in-memory catalog, the change is not saved");
        }
    }

    /// Print a response envelope as JSON, or the table built by `table`.
    pub fn emit<T: Serialize>(&self, value: &T, table: impl FnOnce() -> Table) -> Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Table => println!("{}", table()),
        }
        Ok(())
    }
}

/// A directory is loaded read-only into memory; a file is opened as a file store.
fn store_for_path(path: PathBuf) -> StoreConfig {
    if path.is_dir() {
        StoreConfig::Memory { seed: Some(path) }
    } else {
        StoreConfig::File { path }
    }
}

pub fn question_table(questions: &[FormattedQuestion]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Question", "Answer", "Category", "Difficulty"]);
    for q in questions {
        table.add_row(vec![
            Cell::new(q.id),
            Cell::new(&q.question),
            Cell::new(&q.answer),
            Cell::new(q.category),
            Cell::new(q.difficulty),
        ]);
    }
    table
}

pub fn category_table(categories: &CategoryMap) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Category"]);
    for c in &categories.0 {
        table.add_row(vec![Cell::new(c.id), Cell::new(&c.kind)]);
    }
    table
}
