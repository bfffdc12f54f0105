use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use zbxtrim_core::{
    classify, parse_duration, plan, ItemRecord, RetentionKind, SelectionPolicy, TemplateRecord,
};

fn bench_parse(c: &mut Criterion) {
    let tokens = ["31d", "365d", "2w", "1y", "48h", "10", "0", "{$HISTORY}"];
    c.bench_function("parse_duration_mixed", |b| {
        b.iter(|| {
            for token in tokens {
                black_box(parse_duration(black_box(token)));
            }
        })
    });
    c.bench_function("classify_history", |b| {
        b.iter(|| classify(RetentionKind::History, black_box("31d")))
    });
}

fn bench_plan(c: &mut Criterion) {
    let templates: Vec<TemplateRecord> = (0..200)
        .map(|t| {
            let items = (0..100)
                .map(|i| {
                    let history = if i % 3 == 0 { "7d" } else { "31d" };
                    ItemRecord::new(format!("{t}-{i}"), format!("item {i}"), history, "365d")
                })
                .collect();
            TemplateRecord::new(t.to_string(), format!("Template {t}")).with_items(items)
        })
        .collect();

    c.bench_function("plan_top_10", |b| {
        b.iter(|| plan(black_box(&templates), &SelectionPolicy::top(10, 50)))
    });
}

criterion_group!(benches, bench_parse, bench_plan);
criterion_main!(benches);
