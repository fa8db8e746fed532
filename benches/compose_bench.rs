// benches/compose_bench.rs
//! Benchmarks for catalog decoding, ranking and card composition.

use cardfeed::{compose_cards, decode_catalog, rank_items, VisitedDomains};
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};

/// Builds a catalog of `size` records with a realistic type mix.
fn sample_catalog(size: usize) -> String {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let records: Vec<Value> = (0..size)
        .map(|n| {
            let (publisher, content_type) = match n % 10 {
                0 => ("shop", "product"),
                1 => ("brave_offers", "offer"),
                2 => ("photos", "image"),
                _ => ("daily", "article"),
            };
            json!({
                "url_hash": format!("item-{}", n),
                "publisher_id": publisher,
                "content_type": content_type,
                "category": ["world", "tech", "sports", "science"][n % 4],
                "publish_time": (now - Duration::minutes(n as i64 * 7))
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
                "url": format!("https://www.{}-{}.example/story/{}", publisher, n % 50, n),
                "title": format!("Story number {}", n),
            })
        })
        .collect();
    Value::Array(records).to_string()
}

fn bench_pipeline(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let visited = VisitedDomains::from_urls(
        (0..25).map(|n| format!("https://www.daily-{}.example/", n * 2)),
    );

    let mut group = c.benchmark_group("feed_pipeline");
    for size in [100, 1_000, 5_000] {
        let body = sample_catalog(size);

        group.bench_with_input(BenchmarkId::new("decode", size), &body, |b, body| {
            b.iter(|| decode_catalog(black_box(body), "bench").unwrap())
        });

        let items = decode_catalog(&body, "bench").unwrap().items;
        group.bench_with_input(BenchmarkId::new("rank", size), &items, |b, items| {
            b.iter(|| rank_items(black_box(items.clone()), now, &visited))
        });

        let ranked = rank_items(items, now, &visited);
        group.bench_with_input(BenchmarkId::new("compose", size), &ranked, |b, ranked| {
            b.iter(|| compose_cards(black_box(ranked)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
