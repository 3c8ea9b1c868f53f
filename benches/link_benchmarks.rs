use autotube::extractor::link::match_url;
use autotube::extractor::Link;
use autotube::utils::IsoDuration;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn benchmark_match_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("Link Shapes");

    let urls = [
        ("standard", "https://www.youtube.com/watch?v=phVdqyThPgc"),
        ("alternate", "https://www.youtube.com/v/phVdqyThPgc"),
        ("short", "https://youtu.be/phVdqyThPgc"),
        ("embed", "https://www.youtube.com/embed/phVdqyThPgc"),
        ("miss", "https://example.com/watch?v=phVdqyThPgc"),
    ];

    for (name, url) in urls {
        group.bench_with_input(BenchmarkId::new("match_url", name), &url, |b, url| {
            b.iter(|| match_url(black_box(url)))
        });
    }

    group.finish();
}

fn benchmark_cached_id(c: &mut Criterion) {
    let link = Link::new("https://www.youtube.com/embed/phVdqyThPgc");
    link.video_id();
    c.bench_function("cached video_id", |b| b.iter(|| black_box(&link).video_id()));
}

fn benchmark_duration(c: &mut Criterion) {
    c.bench_function("parse and display duration", |b| {
        b.iter(|| IsoDuration::parse(black_box("P3W3DT20H31M21S")).to_display())
    });
}

criterion_group!(
    benches,
    benchmark_match_url,
    benchmark_cached_id,
    benchmark_duration
);
criterion_main!(benches);
