//! Case-insensitive substring search over question text.

use crate::error::{CatalogError, CatalogResult};
use crate::model::{FormattedQuestion, Question};
use crate::query::QuestionFilter;

/// A validated, non-empty search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Validate a raw term. Missing, empty, or whitespace-only input is an error,
    /// never "match everything".
    pub fn new(raw: Option<&str>) -> CatalogResult<Self> {
        match raw {
            Some(term) if !term.trim().is_empty() => Ok(SearchTerm(term.to_string())),
            Some(_) => Err(CatalogError::InvalidInput("search term is empty".into())),
            None => Err(CatalogError::InvalidInput("search term is missing".into())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Store filter selecting the questions this term matches.
    pub fn filter(&self) -> QuestionFilter {
        QuestionFilter::containing(self.0.clone())
    }
}

/// Every question containing `term`, in the order of `all` (ascending id).
pub fn search(all: &[Question], term: &str) -> CatalogResult<Vec<FormattedQuestion>> {
    let term = SearchTerm::new(Some(term))?;
    let filter = term.filter();
    Ok(all
        .iter()
        .filter(|q| filter.matches(q))
        .map(Question::format)
        .collect())
}
