//! Shared query and filter helpers.
//!
//! Stores evaluate `QuestionFilter` through `matches`, so every backend agrees
//! on what a category scope or a search term selects.

use crate::model::{CategoryId, Question};

/// Predicate over questions. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    /// Restrict to one category. `Some(0)` is category zero, not "any".
    pub category: Option<CategoryId>,
    /// Case-insensitive substring of the question text.
    pub text: Option<String>,
}

impl QuestionFilter {
    /// Filter matching every question.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter scoped to one category, or to all when `None`.
    pub fn in_category(category: Option<CategoryId>) -> Self {
        Self {
            category,
            text: None,
        }
    }

    /// Filter on question text.
    pub fn containing(text: impl Into<String>) -> Self {
        Self {
            category: None,
            text: Some(text.into()),
        }
    }

    pub fn matches(&self, question: &Question) -> bool {
        if let Some(category) = self.category {
            if question.category != category {
                return false;
            }
        }
        match &self.text {
            Some(term) => contains_ignore_ascii_case(&question.question, term),
            None => true,
        }
    }
}

/// Half-open `[offset, offset + limit)` window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: usize,
    pub limit: usize,
}

impl Window {
    /// Slice `items` to this window, clamped to its length.
    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset.min(items.len());
        let end = self.offset.saturating_add(self.limit).min(items.len());
        &items[start..end]
    }
}

/// An ordered scan request: filter, then optionally window. Results are always
/// in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionQuery {
    pub filter: QuestionFilter,
    pub window: Option<Window>,
}

impl QuestionQuery {
    pub fn new(filter: QuestionFilter) -> Self {
        Self {
            filter,
            window: None,
        }
    }

    pub fn with_window(mut self, window: Window) -> Self {
        self.window = Some(window);
        self
    }
}

/// ASCII case-insensitive substring test. An empty needle matches.
pub fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return true;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|w| w.eq_ignore_ascii_case(needle))
}
