//! Fixed-size pagination over id-ordered questions.

use std::fmt;

use crate::model::{FormattedQuestion, Question};
use crate::query::Window;

/// Questions per page.
pub const PAGE_SIZE: usize = 10;

/// A 1-based page number as the caller supplied it.
///
/// Zero and negative values are kept: they select nothing rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageNumber(i64);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    pub fn new(page: i64) -> Self {
        PageNumber(page)
    }

    /// Coerce a raw query value. Absent or non-numeric input means page 1.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse::<i64>().ok())
            .map(PageNumber)
            .unwrap_or(Self::FIRST)
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// The `[(p-1)*PAGE_SIZE, p*PAGE_SIZE)` window, or `None` for p <= 0.
    pub fn window(self) -> Option<Window> {
        if self.0 < 1 {
            return None;
        }
        let index = usize::try_from(self.0 - 1).ok()?;
        Some(Window {
            offset: index.saturating_mul(PAGE_SIZE),
            limit: PAGE_SIZE,
        })
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PageNumber {
    fn from(page: i64) -> Self {
        PageNumber(page)
    }
}

/// Slice an id-ordered sequence to one page.
///
/// Pages past the end and non-positive pages produce an empty vec.
pub fn paginate(all: &[Question], page: PageNumber) -> Vec<FormattedQuestion> {
    match page.window() {
        Some(window) => window.apply(all).iter().map(Question::format).collect(),
        None => Vec::new(),
    }
}

/// Number of pages needed for `total` questions.
pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(n: i64) -> Vec<Question> {
        (1..=n)
            .map(|id| Question {
                id,
                question: format!("Question {id}?"),
                answer: format!("Answer {id}"),
                category: id % 3,
                difficulty: 1 + (id % 5) as u32,
            })
            .collect()
    }

    #[test]
    fn parse_defaults_to_first_page() {
        assert_eq!(PageNumber::parse(None), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some("abc")), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some("")), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some("3")), PageNumber::new(3));
        assert_eq!(PageNumber::parse(Some(" 2 ")), PageNumber::new(2));
        assert_eq!(PageNumber::parse(Some("-4")), PageNumber::new(-4));
        assert_eq!(PageNumber::parse(Some("0")), PageNumber::new(0));
    }

    #[test]
    fn pages_match_slices() {
        let all = questions(27);
        for p in 1..=4i64 {
            let page = paginate(&all, PageNumber::new(p));
            let start = ((p - 1) as usize * PAGE_SIZE).min(all.len());
            let end = (p as usize * PAGE_SIZE).min(all.len());
            let expected: Vec<_> = all[start..end].iter().map(Question::format).collect();
            assert_eq!(page, expected, "page {p}");
        }
    }

    #[test]
    fn last_page_is_partial() {
        let all = questions(27);
        let page = paginate(&all, PageNumber::new(3));
        assert_eq!(page.len(), 7);
        assert_eq!(page.first().unwrap().id, 21);
        assert_eq!(page.last().unwrap().id, 27);
    }

    #[test]
    fn beyond_last_page_is_empty() {
        let all = questions(19);
        assert!(paginate(&all, PageNumber::new(3)).is_empty());
        assert!(paginate(&all, PageNumber::new(1000)).is_empty());
        assert!(paginate(&all, PageNumber::new(i64::MAX)).is_empty());
    }

    #[test]
    fn non_positive_pages_are_empty() {
        let all = questions(5);
        assert!(paginate(&all, PageNumber::new(0)).is_empty());
        assert!(paginate(&all, PageNumber::new(-1)).is_empty());
        assert!(PageNumber::new(0).window().is_none());
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(10), 1);
        assert_eq!(page_count(11), 2);
    }
}
