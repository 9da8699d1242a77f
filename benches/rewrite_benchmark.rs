use Quendrix::{InMemoryIndex, RangeQuery, SearchQuery, Term, WildcardQuery};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Builds a dictionary of pseudo-random lowercase terms across two fields
fn build_index(term_count: usize) -> InMemoryIndex {
    let mut rng = StdRng::seed_from_u64(42);
    let mut builder = InMemoryIndex::builder();

    for i in 0..term_count {
        let field = if i % 2 == 0 { "title" } else { "body" };
        let length = rng.gen_range(4..12);
        let text: String = (0..length)
            .map(|_| (b'a' + rng.gen_range(0..26u8)) as char)
            .collect();
        builder.add_term(field, &text);
    }

    builder.build().unwrap()
}

fn bench_range_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_rewrite");

    for term_count in [1_000, 10_000, 50_000] {
        let mut index = build_index(term_count);

        group.bench_with_input(
            BenchmarkId::from_parameter(term_count),
            &term_count,
            |b, _| {
                b.iter(|| {
                    let mut query = RangeQuery::new(
                        Some(Term::with_field("ma", "title")),
                        Some(Term::with_field("mc", "title")),
                        true,
                    )
                    .unwrap();
                    black_box(query.rewrite(&mut index).unwrap())
                })
            },
        );
    }

    group.finish();
}

fn bench_wildcard_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("wildcard_rewrite");

    for term_count in [1_000, 10_000, 50_000] {
        let mut index = build_index(term_count);

        group.bench_with_input(
            BenchmarkId::from_parameter(term_count),
            &term_count,
            |b, _| {
                b.iter(|| {
                    let mut query = WildcardQuery::new(Term::with_field("mab*", "body"));
                    black_box(query.rewrite(&mut index).unwrap())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_range_rewrite, bench_wildcard_rewrite);
criterion_main!(benches);
