use criterion::{criterion_group, criterion_main, Criterion};
use engine::{DocumentStatus, SearchEngine};

fn corpus_engine() -> SearchEngine {
    let words = [
        "cat", "dog", "rat", "fluffy", "groomed", "nasty", "curly", "white", "black", "tail",
        "collar", "fashionable", "expressive", "eyes", "starling", "pet",
    ];
    let mut engine = SearchEngine::from_stop_words_text("a an the and in on").unwrap();
    for id in 0..1_000u32 {
        // Deterministic pseudo-random 8-word documents.
        let mut state = id.wrapping_mul(2654435761).wrapping_add(1);
        let text: Vec<&str> = (0..8)
            .map(|_| {
                state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                words[(state >> 16) as usize % words.len()]
            })
            .collect();
        engine
            .add_document(id, &text.join(" "), DocumentStatus::Actual, &[1, 2, 3])
            .unwrap();
    }
    engine
}

fn bench_find_top_documents(c: &mut Criterion) {
    let engine = corpus_engine();
    c.bench_function("find_top_documents_1k", |b| {
        b.iter(|| engine.find_top_documents("fluffy groomed cat -nasty").unwrap())
    });
}

fn bench_add_document(c: &mut Criterion) {
    c.bench_function("add_1k_documents", |b| b.iter(corpus_engine));
}

criterion_group!(benches, bench_find_top_documents, bench_add_document);
criterion_main!(benches);
