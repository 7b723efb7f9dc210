use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kjvsearch::tokenizer::tokenize;
use kjvsearch::VerseIndex;
use std::io::Cursor;

const VERSE: &str = "and~God~saw~the~light,~that~it~was~good:~and~God~divided~the~light~from~the~darkness.";

fn corpus(chapters: u32, verses: u32) -> String {
    let mut out = String::new();
    for c in 1..=chapters {
        for v in 1..=verses {
            out.push_str(&format!("{VERSE}~blessed~are~they~that~mourn~{c}~{v}|Genesis|{c}|{v}\n"));
        }
    }
    out
}

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_verse", |b| b.iter(|| tokenize(black_box(VERSE))));
}

fn bench_build_and_search(c: &mut Criterion) {
    let text = corpus(50, 40);
    c.bench_function("build_2000_verses", |b| {
        b.iter(|| VerseIndex::from_reader(Cursor::new(black_box(text.as_bytes()))).unwrap())
    });

    let idx = VerseIndex::from_reader(Cursor::new(text.as_bytes())).unwrap();
    c.bench_function("search_two_words", |b| b.iter(|| idx.search(black_box(&["god", "mourn"]), 10)));
}

criterion_group!(benches, bench_tokenize, bench_build_and_search);
criterion_main!(benches);
