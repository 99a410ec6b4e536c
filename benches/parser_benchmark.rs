use criterion::{black_box, criterion_group, criterion_main, Criterion};
use traffic_analyzer::filter::{FilterSpec, StatusRange};
use traffic_analyzer::parser::parse_line;

fn bench_parse_line(c: &mut Criterion) {
    let line = "1700000000 192.168.12.34 GET /api/v1/resource/12345 200 48213";

    c.bench_function("parse_line", |b| {
        b.iter(|| parse_line(black_box(line), black_box(1)))
    });
}

fn bench_filter_match(c: &mut Criterion) {
    let record = parse_line("1700000000 192.168.12.34 GET /api/v1/resource/12345 200 48213", 1)
        .expect("benchmark line must parse");
    let filter = FilterSpec {
        method: Some("GET".to_string()),
        status: Some(StatusRange { low: 200, high: 299 }),
        start: Some(1_600_000_000),
        end: Some(1_800_000_000),
    };

    c.bench_function("filter_match", |b| {
        b.iter(|| filter.matches(black_box(&record)))
    });
}

criterion_group!(benches, bench_parse_line, bench_filter_match);
criterion_main!(benches);
