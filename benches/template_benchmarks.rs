use autotube::template::compile;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

const POSTER: &str = r#"<div class="autotube-poster" id="{{=_posterId}}">
  <div class="autotube-player"><img src="{{=snippet.thumbnails.medium.url}}" alt="{{=snippet.title}}"></div>
  <p class="autotube-title">{{=snippet.title}} <span class="autotube-time">{{=_playingTime}}</span></p>
</div>"#;

fn benchmark_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("Template Compile");

    for spans in [1usize, 10, 100] {
        let text: String = (0..spans)
            .map(|i| format!("<p>item {i}: {{{{=items.{i}.name}}}}</p>\n"))
            .collect();
        group.bench_with_input(BenchmarkId::new("spans", spans), &text, |b, text| {
            b.iter(|| compile(black_box(text)))
        });
    }

    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    let template = compile(POSTER).expect("poster template compiles");
    let data = json!({
        "_posterId": "autotube-poster-tLt5rBfNucc",
        "_playingTime": "1:55",
        "snippet": {
            "title": "Cat Wearing A Shark Costume Cleans The Kitchen On A Roomba",
            "thumbnails": { "medium": { "url": "https://i.ytimg.com/vi/tLt5rBfNucc/mqdefault.jpg" } }
        }
    });

    c.bench_function("render poster", |b| b.iter(|| template.render(black_box(&data))));
}

criterion_group!(benches, benchmark_compile, benchmark_render);
criterion_main!(benches);
