//! Template rendering throughput benchmarks
//!
//! Measures:
//! - Single renders of a repeat-heavy table with varying row counts (1, 10, 100, 1000)
//! - Macro expansion through an external layout
//! - Batch rendering across jobs
//!
//! Run benchmarks: `cargo bench --bench render_throughput`
//!
//! Compare specific groups:
//! ```
//! cargo bench --bench render_throughput -- "rows"
//! cargo bench --bench render_throughput -- "batch"
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use indexmap::IndexMap;
use serde_json::json;
use std::hint::black_box;
use zpt::{RenderJob, Value, ZptRenderer};

/// A table with one row per record and a zebra class per row
fn table_template() -> &'static str {
    concat!(
        r#"<table><tr tal:repeat="row here/rows" "#,
        r#"tal:attributes="data-index repeat/row/index; data-odd repeat/row/odd">"#,
        r#"<td tal:content="row/id">0</td><td tal:content="row/name">name</td>"#,
        r#"<td tal:condition="row/active">active</td></tr></table>"#
    )
}

fn layout() -> &'static str {
    concat!(
        r#"<html metal:define-macro="page"><body>"#,
        r#"<h1 metal:define-slot="title">Untitled</h1><div metal:define-slot="body"/>"#,
        r#"</body></html>"#
    )
}

fn generate_rows(count: usize) -> serde_json::Value {
    let rows: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("Record {}", i),
                "active": i % 3 != 0
            })
        })
        .collect();
    json!({ "rows": rows })
}

fn benchmark_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("rows");
    let renderer = ZptRenderer::new();

    for count in [1, 10, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        let model = generate_rows(count);

        group.bench_with_input(BenchmarkId::new("table", count), &model, |b, model| {
            b.iter(|| {
                renderer
                    .render_json(black_box(table_template()), model)
                    .expect("Render failed")
            });
        });
    }

    group.finish();
}

fn benchmark_macro_expansion(c: &mut Criterion) {
    let renderer = ZptRenderer::new();
    let layout = renderer.load_macros(layout()).expect("Failed to load layout");
    let template = concat!(
        r#"<html metal:use-macro="options/layout/macros/page">"#,
        r#"<h1 metal:fill-slot="title" tal:content="here/title">t</h1>"#,
        r#"<div metal:fill-slot="body"><p tal:repeat="row here/rows" tal:content="row/name"/></div>"#,
        r#"</html>"#
    );
    let mut model = generate_rows(50);
    model["title"] = json!("Report");

    c.bench_function("macro_expansion", |b| {
        b.iter(|| {
            let mut options = IndexMap::new();
            options.insert("layout".to_string(), layout.clone());
            renderer
                .render(black_box(template), Value::from(model.clone()), options)
                .expect("Render failed")
        });
    });
}

fn benchmark_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let renderer = ZptRenderer::new();

    for jobs in [8, 64] {
        group.throughput(Throughput::Elements(jobs as u64));
        group.bench_with_input(BenchmarkId::new("jobs", jobs), &jobs, |b, &jobs| {
            b.iter(|| {
                let batch = (0..jobs)
                    .map(|_| RenderJob::new(table_template(), Value::from(generate_rows(20))))
                    .collect();
                renderer.render_batch(batch)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_rows, benchmark_macro_expansion, benchmark_batch);
criterion_main!(benches);
