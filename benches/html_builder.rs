use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use webhelpers::{
    html::{Attrs, HTML, Literal, escape, tag},
    paginate::{Page, PagerOptions},
    text::{LinkMode, auto_link},
};

fn prose(paragraphs: usize) -> String {
    "Fish & chips <b>cost</b> \"5\" at http://example.com/menu?x=1&y=2 or mail sales@example.com.\n\n"
        .repeat(paragraphs)
}

fn bench_escape(c: &mut Criterion) {
    let mut group = c.benchmark_group("escape");
    for paragraphs in [1, 16, 256] {
        let text = prose(paragraphs);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("plain", paragraphs), &text, |b, text| {
            b.iter(|| black_box(escape(text.as_str())))
        });
        let literal = Literal::new(text.clone());
        group.bench_with_input(BenchmarkId::new("literal", paragraphs), &literal, |b, lit| {
            b.iter(|| black_box(escape(lit)))
        });
    }
    group.finish();
}

fn bench_tags(c: &mut Criterion) {
    let mut group = c.benchmark_group("tags");
    group.warm_up_time(Duration::from_secs(2));

    let attrs = Attrs::new()
        .set("href", "http://example.com/?a=1&b=2")
        .set("class_", "nav")
        .set("title", "Say \"hi\"");
    group.bench_function("anchor", |b| {
        b.iter(|| black_box(tag("a", &[&"Click <here>"], &attrs)))
    });

    group.bench_function("nested_list", |b| {
        b.iter(|| {
            let items: Result<Literal, _> = (0..50)
                .map(|i| tag("li", &[&i], &Attrs::new()))
                .collect();
            black_box(items.and_then(|items| HTML.tag("ul", &[&items], &Attrs::new())))
        })
    });

    group.finish();
}

fn bench_helpers(c: &mut Criterion) {
    let mut group = c.benchmark_group("helpers");

    let text = prose(32);
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("auto_link", |b| {
        b.iter(|| black_box(auto_link(text.as_str(), LinkMode::All, &Attrs::new())))
    });

    let items: Vec<u32> = (0..10_000).collect();
    let options = PagerOptions::new("/items");
    group.bench_function("pager", |b| {
        b.iter(|| {
            let page = Page::new(&items, black_box(250), 20).map(|page| page.pager(&options));
            black_box(page)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_escape, bench_tags, bench_helpers);
criterion_main!(benches);
