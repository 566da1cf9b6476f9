use std::collections::BTreeSet;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use trivia_core::catalog::Catalog;
use trivia_core::model::{Category, Question};
use trivia_core::quiz::{next_quiz_question, QuizRequest};
use trivia_store::MemoryStore;

fn store(n: i64) -> MemoryStore {
    let questions = (1..=n)
        .map(|id| Question {
            id,
            question: format!("Question {id}?"),
            answer: format!("Answer {id}"),
            category: id % 6,
            difficulty: 1 + (id % 5) as u32,
        })
        .collect();
    let categories = (0..6)
        .map(|id| Category {
            id,
            kind: format!("Category {id}"),
        })
        .collect();
    MemoryStore::from_catalog(Catalog {
        categories,
        questions,
    })
    .unwrap()
}

fn bench_selection(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = store(10_000);
    let mut rng = StdRng::seed_from_u64(7);

    let mut group = c.benchmark_group("quiz_selection");

    let fresh = QuizRequest::new(None, BTreeSet::new());
    group.bench_function("all_categories", |b| {
        b.iter(|| rt.block_on(next_quiz_question(&store, black_box(&fresh), &mut rng)))
    });

    let one_category = QuizRequest::new(Some(3), BTreeSet::new());
    group.bench_function("one_category", |b| {
        b.iter(|| rt.block_on(next_quiz_question(&store, black_box(&one_category), &mut rng)))
    });

    // Everything but the last ten questions already served.
    let nearly_done = QuizRequest::new(None, 1..=9_990);
    group.bench_function("nearly_exhausted", |b| {
        b.iter(|| rt.block_on(next_quiz_question(&store, black_box(&nearly_done), &mut rng)))
    });

    group.finish();
}

criterion_group!(benches, bench_selection);
criterion_main!(benches);
