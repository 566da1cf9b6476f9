//! Quiz question selection.
//!
//! Each call picks one question uniformly at random from the eligible pool:
//! the questions in the requested category (or any category) whose ids are not
//! in the caller's exclusion set. The selector keeps no state between calls;
//! the quiz owner accumulates `previous_questions` and sends it every time.
//!
//! The pool is computed fresh from the store on every call and the draw happens
//! here rather than in the store, so uniformity never depends on a backend's
//! notion of random ordering.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::model::{CategoryId, FormattedQuestion, QuestionId};
use crate::query::QuestionFilter;
use crate::traits::CatalogStore;

/// Input for one quiz draw.
///
/// Wire form: `{"previous_questions": [5, 7], "quiz_category": {"id": 2, "type": "Art"}}`.
/// Both fields may be absent or null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRequest {
    /// Ids already served in this quiz.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub previous_questions: BTreeSet<QuestionId>,
    /// Category scope. Absent, null, or `id: null` means any category.
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

/// The category part of a quiz request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCategory {
    #[serde(default)]
    pub id: Option<CategoryId>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeSet<QuestionId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeSet<QuestionId>>::deserialize(deserializer)?.unwrap_or_default())
}

impl QuizRequest {
    pub fn new(
        category: Option<CategoryId>,
        previous: impl IntoIterator<Item = QuestionId>,
    ) -> Self {
        Self {
            previous_questions: previous.into_iter().collect(),
            quiz_category: category.map(|id| QuizCategory {
                id: Some(id),
                kind: None,
            }),
        }
    }

    /// The requested category, decided by presence. `Some(0)` is category 0.
    pub fn category(&self) -> Option<CategoryId> {
        self.quiz_category.as_ref().and_then(|c| c.id)
    }

    /// Record a served question so the next draw excludes it.
    pub fn mark_served(&mut self, id: QuestionId) {
        self.previous_questions.insert(id);
    }
}

/// Outcome of a quiz draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizDraw {
    /// A question not yet served.
    Question(FormattedQuestion),
    /// The eligible pool is empty; the round is over.
    Exhausted,
}

impl QuizDraw {
    pub fn question(&self) -> Option<&FormattedQuestion> {
        match self {
            QuizDraw::Question(q) => Some(q),
            QuizDraw::Exhausted => None,
        }
    }

    pub fn into_option(self) -> Option<FormattedQuestion> {
        match self {
            QuizDraw::Question(q) => Some(q),
            QuizDraw::Exhausted => None,
        }
    }

    /// Treat exhaustion as `CatalogError::NoQuestionAvailable`.
    pub fn into_result(self) -> CatalogResult<FormattedQuestion> {
        self.into_option().ok_or(CatalogError::NoQuestionAvailable)
    }
}

/// Draw the next quiz question.
///
/// Fetches the eligible id set, removes excluded ids, picks one uniformly with
/// `rng`, then fetches that record. A record that disappears or no longer fits
/// the request between the two reads is a `StoreInconsistency`; it is reported,
/// not retried.
pub async fn next_quiz_question<R>(
    store: &dyn CatalogStore,
    request: &QuizRequest,
    rng: &mut R,
) -> CatalogResult<QuizDraw>
where
    R: Rng + Send + ?Sized,
{
    let category = request.category();
    let mut pool = store
        .question_ids(&QuestionFilter::in_category(category))
        .await?;
    pool.retain(|id| !request.previous_questions.contains(id));

    debug!(
        category = ?category,
        excluded = request.previous_questions.len(),
        eligible = pool.len(),
        "quiz pool computed"
    );

    let Some(&id) = pool.choose(rng) else {
        return Ok(QuizDraw::Exhausted);
    };

    let question = store.question(id).await?.ok_or_else(|| {
        CatalogError::StoreInconsistency(format!(
            "question {id} was in the quiz pool but could not be fetched"
        ))
    })?;

    if question.id != id || request.previous_questions.contains(&question.id) {
        return Err(CatalogError::StoreInconsistency(format!(
            "store returned question {} when asked for {id}",
            question.id
        )));
    }
    if let Some(category) = category {
        if question.category != category {
            return Err(CatalogError::StoreInconsistency(format!(
                "question {id} moved from category {category} to {}",
                question.category
            )));
        }
    }

    Ok(QuizDraw::Question(question.format()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::VecStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x7121_a5ee)
    }

    #[tokio::test]
    async fn only_remaining_question_is_returned() {
        let store = VecStore::with_pairs(&[(5, 2), (7, 2), (9, 2)]);
        let request = QuizRequest::new(Some(2), [5, 7]);
        let mut rng = rng();
        for _ in 0..50 {
            let draw = next_quiz_question(&store, &request, &mut rng).await.unwrap();
            assert_eq!(draw.question().map(|q| q.id), Some(9));
        }
    }

    #[tokio::test]
    async fn never_returns_excluded_or_foreign_category() {
        let pairs: Vec<(i64, i64)> = (1..=40).map(|id| (id, id % 4)).collect();
        let store = VecStore::with_pairs(&pairs);
        let mut rng = rng();
        let previous: Vec<i64> = (1..=40).filter(|id| id % 3 == 0).collect();

        for category in [None, Some(0), Some(1), Some(3)] {
            let request = QuizRequest::new(category, previous.iter().copied());
            for _ in 0..100 {
                let q = next_quiz_question(&store, &request, &mut rng)
                    .await
                    .unwrap()
                    .into_result()
                    .unwrap();
                assert!(!request.previous_questions.contains(&q.id));
                if let Some(c) = category {
                    assert_eq!(q.category, c);
                }
            }
        }
    }

    #[tokio::test]
    async fn exhausted_pool_ends_the_round() {
        let store = VecStore::with_pairs(&[(1, 1), (2, 1), (3, 2)]);
        let request = QuizRequest::new(Some(1), [1, 2]);
        let draw = next_quiz_question(&store, &request, &mut rng()).await.unwrap();
        assert_eq!(draw, QuizDraw::Exhausted);
        assert!(matches!(
            draw.into_result(),
            Err(CatalogError::NoQuestionAvailable)
        ));
    }

    #[tokio::test]
    async fn empty_store_is_exhausted() {
        let store = VecStore::default();
        let draw = next_quiz_question(&store, &QuizRequest::default(), &mut rng())
            .await
            .unwrap();
        assert_eq!(draw, QuizDraw::Exhausted);
    }

    #[tokio::test]
    async fn unknown_category_is_exhausted() {
        let store = VecStore::with_pairs(&[(1, 1), (2, 2)]);
        let request = QuizRequest::new(Some(99), []);
        let draw = next_quiz_question(&store, &request, &mut rng()).await.unwrap();
        assert_eq!(draw, QuizDraw::Exhausted);
    }

    #[tokio::test]
    async fn full_session_serves_every_question_once() {
        let pairs: Vec<(i64, i64)> = (1..=12).map(|id| (id, 1)).collect();
        let store = VecStore::with_pairs(&pairs);
        let mut request = QuizRequest::new(Some(1), []);
        let mut rng = rng();
        let mut served = Vec::new();

        while let QuizDraw::Question(q) = next_quiz_question(&store, &request, &mut rng)
            .await
            .unwrap()
        {
            assert!(!served.contains(&q.id));
            served.push(q.id);
            request.mark_served(q.id);
        }

        served.sort();
        assert_eq!(served, (1..=12).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn category_zero_is_distinct_from_any() {
        let store = VecStore::with_pairs(&[(1, 0), (2, 0), (3, 1), (4, 2), (5, 2)]);
        let mut rng = rng();
        let zero = QuizRequest::new(Some(0), []);
        let any = QuizRequest::new(None, []);

        let mut seen_zero = BTreeSet::new();
        let mut seen_any = BTreeSet::new();
        for _ in 0..200 {
            let q = next_quiz_question(&store, &zero, &mut rng).await.unwrap();
            seen_zero.insert(q.into_result().unwrap().id);
            let q = next_quiz_question(&store, &any, &mut rng).await.unwrap();
            seen_any.insert(q.into_result().unwrap().id);
        }

        assert_eq!(seen_zero, BTreeSet::from([1, 2]));
        assert_eq!(seen_any, BTreeSet::from([1, 2, 3, 4, 5]));
    }

    #[tokio::test]
    async fn deletions_are_observed_immediately() {
        let store = VecStore::with_pairs(&[(1, 1), (2, 1)]);
        store.delete_question(1).await.unwrap();
        let request = QuizRequest::new(Some(1), [2]);
        let draw = next_quiz_question(&store, &request, &mut rng()).await.unwrap();
        assert_eq!(draw, QuizDraw::Exhausted);
    }

    #[tokio::test]
    async fn vanished_record_is_store_inconsistency() {
        let store = VecStore::with_pairs(&[(8, 3)]);
        store.vanish_on_fetch(8);
        let err = next_quiz_question(&store, &QuizRequest::new(Some(3), []), &mut rng())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::StoreInconsistency(_)));
        assert!(!err.is_terminal());
    }

    #[tokio::test]
    async fn selection_is_uniform() {
        // Chi-square goodness of fit, df = 4. 18.47 is the 0.999 quantile.
        const TRIALS: usize = 20_000;
        let store = VecStore::with_pairs(&[(3, 1), (11, 1), (12, 1), (20, 1), (31, 1)]);
        let request = QuizRequest::default();
        let mut rng = rng();
        let mut counts: HashMap<i64, usize> = HashMap::new();

        for _ in 0..TRIALS {
            let q = next_quiz_question(&store, &request, &mut rng)
                .await
                .unwrap()
                .into_result()
                .unwrap();
            *counts.entry(q.id).or_default() += 1;
        }

        assert_eq!(counts.len(), 5);
        let expected = TRIALS as f64 / 5.0;
        let chi_square: f64 = counts
            .values()
            .map(|&observed| {
                let d = observed as f64 - expected;
                d * d / expected
            })
            .sum();
        assert!(chi_square < 18.47, "chi-square {chi_square:.2} too large");
    }

    #[test]
    fn request_wire_form() {
        let req: QuizRequest = serde_json::from_str(
            r#"{"previous_questions": [5, 7], "quiz_category": {"type": "Art", "id": 2}}"#,
        )
        .unwrap();
        assert_eq!(req.category(), Some(2));
        assert_eq!(req.previous_questions, BTreeSet::from([5, 7]));

        let zero: QuizRequest =
            serde_json::from_str(r#"{"quiz_category": {"type": "click", "id": 0}}"#).unwrap();
        assert_eq!(zero.category(), Some(0));

        let all: QuizRequest = serde_json::from_str(
            r#"{"previous_questions": null, "quiz_category": {"type": null, "id": null}}"#,
        )
        .unwrap();
        assert_eq!(all.category(), None);
        assert!(all.previous_questions.is_empty());

        let bare: QuizRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(bare, QuizRequest::default());
    }
}
