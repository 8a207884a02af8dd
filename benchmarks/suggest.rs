use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use movie_catalog::{suggest, SearchOptions};

fn generate_titles(count: usize) -> Vec<String> {
    let words = [
        "The", "Dark", "Knight", "Return", "Empire", "Godfather", "Part", "Angry",
        "Men", "Forrest", "Pulp", "Fiction", "Star", "Wars", "Room", "Everything",
    ];

    (0..count)
        .map(|i| {
            let a = words[i % words.len()];
            let b = words[(i / words.len()) % words.len()];
            format!("{} {} {}", a, b, i)
        })
        .collect()
}

fn bench_suggest(c: &mut Criterion) {
    let mut group = c.benchmark_group("suggest");
    let options = SearchOptions::default();

    for size in [10, 100, 1_000, 10_000] {
        let titles = generate_titles(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &titles, |b, titles| {
            b.iter(|| suggest(black_box("The Gotfather Part 2"), titles, &options))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_suggest);
criterion_main!(benches);
