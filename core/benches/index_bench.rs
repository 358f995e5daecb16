use criterion::{criterion_group, criterion_main, Criterion};
use revindex::codec::{deserialize, serialize};
use revindex::InvertedIndex;

fn corpus(num_docs: usize, words_per_doc: usize, vocab: usize) -> (Vec<String>, Vec<String>) {
    let texts = (0..num_docs)
        .map(|d| {
            (0..words_per_doc)
                .map(|w| format!("w{}", (d * 31 + w * 17) % vocab))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    let titles = (0..num_docs).map(|d| format!("test-file_{d}")).collect();
    (texts, titles)
}

fn bench_build(c: &mut Criterion) {
    let (texts, titles) = corpus(1000, 1000, 5000);
    c.bench_function("build_1000x1000", |b| b.iter(|| InvertedIndex::build(&texts, titles.clone())));
}

fn bench_find(c: &mut Criterion) {
    let (texts, titles) = corpus(1000, 200, 1000);
    let idx = InvertedIndex::build(&texts, titles).unwrap();
    let phrase = (0..100).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
    c.bench_function("find_100_words", |b| b.iter(|| idx.find(&phrase)));
}

fn bench_codec(c: &mut Criterion) {
    let (texts, titles) = corpus(1000, 200, 1000);
    let idx = InvertedIndex::build(&texts, titles).unwrap();
    let text = serialize(&idx);
    c.bench_function("serialize", |b| b.iter(|| serialize(&idx)));
    c.bench_function("deserialize", |b| b.iter(|| deserialize(text.as_bytes())));
}

criterion_group!(benches, bench_build, bench_find, bench_codec);
criterion_main!(benches);
