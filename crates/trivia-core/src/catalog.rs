//! TOML catalog parser.
//!
//! Loads categories and questions from TOML files and directories, validates
//! them, and renders them back for file-backed stores.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{Category, CategoryId, Question, QuestionId};

/// A full catalog snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Intermediate TOML structure. Ids are optional in hand-written seed files
/// and assigned once the whole input is read, after every explicit id.
#[derive(Debug, Default, Deserialize)]
struct TomlCatalogFile {
    #[serde(default)]
    categories: Vec<TomlCategory>,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlCategory {
    #[serde(default)]
    id: Option<CategoryId>,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    #[serde(default)]
    id: Option<QuestionId>,
    question: String,
    answer: String,
    category: CategoryId,
    #[serde(default = "default_difficulty")]
    difficulty: u32,
}

fn default_difficulty() -> u32 {
    1
}

impl TomlCatalogFile {
    fn merge(&mut self, other: TomlCatalogFile) {
        self.categories.extend(other.categories);
        self.questions.extend(other.questions);
    }

    /// Assign missing ids in input order, starting after the largest explicit id.
    fn into_catalog(self) -> Catalog {
        let mut next_category = next_id(self.categories.iter().filter_map(|c| c.id));
        let categories = self
            .categories
            .into_iter()
            .map(|c| Category {
                id: c.id.unwrap_or_else(|| take(&mut next_category)),
                kind: c.kind,
            })
            .collect();

        let mut next_question = next_id(self.questions.iter().filter_map(|q| q.id));
        let mut questions: Vec<Question> = self
            .questions
            .into_iter()
            .map(|q| Question {
                id: q.id.unwrap_or_else(|| take(&mut next_question)),
                question: q.question,
                answer: q.answer,
                category: q.category,
                difficulty: q.difficulty,
            })
            .collect();
        questions.sort_by_key(|q| q.id);

        Catalog {
            categories,
            questions,
        }
    }
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().map_or(1, |m| m + 1)
}

fn take(counter: &mut i64) -> i64 {
    let id = *counter;
    *counter += 1;
    id
}

fn read_catalog_file(path: &Path) -> Result<TomlCatalogFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;
    parse_toml(&content, path)
}

fn parse_toml(content: &str, source_path: &Path) -> Result<TomlCatalogFile> {
    toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))
}

/// Parse a single TOML file into a `Catalog`.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    Ok(read_catalog_file(path)?.into_catalog())
}

/// Parse a TOML string into a `Catalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    Ok(parse_toml(content, source_path)?.into_catalog())
}

/// Recursively load and merge all `.toml` catalog files from a directory.
///
/// Missing ids are assigned across the merged set, so id-less entries in
/// different files never collide.
pub fn load_catalog_directory(dir: &Path) -> Result<Catalog> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }
    let mut merged = TomlCatalogFile::default();
    collect_directory(dir, &mut merged)?;
    Ok(merged.into_catalog())
}

fn collect_directory(dir: &Path, merged: &mut TomlCatalogFile) -> Result<()> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        paths.push(entry?.path());
    }
    paths.sort();

    for path in paths {
        if path.is_dir() {
            collect_directory(&path, merged)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match read_catalog_file(&path) {
                Ok(part) => merged.merge(part),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }
    Ok(())
}

/// Load a catalog from a file or a directory of files.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if path.is_dir() {
        load_catalog_directory(path)
    } else {
        parse_catalog(path)
    }
}

/// Serialize a catalog to TOML.
pub fn render_catalog(catalog: &Catalog) -> Result<String> {
    toml::to_string_pretty(catalog).context("failed to serialize catalog")
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<QuestionId>,
    /// Warning message.
    pub message: String,
}

/// Validate a catalog for common issues.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_categories = HashSet::new();
    for category in &catalog.categories {
        if !seen_categories.insert(category.id) {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!("duplicate category ID: {}", category.id),
            });
        }
        if category.kind.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!("category {} has an empty type", category.id),
            });
        }
    }

    let mut seen_ids = HashSet::new();
    for q in &catalog.questions {
        if !seen_ids.insert(q.id) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id),
                message: format!("duplicate question ID: {}", q.id),
            });
        }
    }

    for q in &catalog.questions {
        if q.question.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id),
                message: "question text is empty".into(),
            });
        }
        if q.answer.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id),
                message: "answer is empty".into(),
            });
        }
        if q.difficulty == 0 {
            warnings.push(ValidationWarning {
                question_id: Some(q.id),
                message: "difficulty must be at least 1".into(),
            });
        }
        if !seen_categories.contains(&q.category) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id),
                message: format!("unknown category {}", q.category),
            });
        }
    }

    warnings
}
