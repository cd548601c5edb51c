//! Benchmark for the streaming loop.
//!
//! Run with: cargo bench --bench stream

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rowstream::{JsonEncoder, MemoryCursor, Value, record_fields, stream};
use serde::Serialize;

#[derive(Debug, Default, Serialize)]
struct Model {
    a: String,
    b: i64,
    c: bool,
    p_string: Option<String>,
    s_slice: Vec<String>,
    bytes: Option<Vec<u8>>,
}

record_fields!(Model {
    a => r#"db:"a""#,
    b => r#"db:"b""#,
    c => r#"db:"c""#,
    p_string => r#"db:"p_string""#,
    s_slice => r#"db:"s_slice""#,
    bytes => r#"db:"bytes""#,
});

fn cursor(rows: i64) -> MemoryCursor {
    MemoryCursor::new(["a", "b", "c", "p_string", "s_slice", "bytes"]).with_rows((0..rows).map(
        |i| {
            vec![
                Value::from("This is A"),
                Value::Int(i),
                Value::Bool(true),
                Value::from("Pointer String coming at you"),
                Value::from(vec!["1".to_owned(), "2".to_owned(), "andre 3000".to_owned()]),
                Value::Null,
            ]
        },
    ))
}

fn benchmark_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_json_lines");

    for rows in [300_i64, 3000] {
        let source = cursor(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &source, |b, source| {
            b.iter(|| {
                let mut sink = std::io::sink();
                stream(
                    source.clone(),
                    &mut Model::default(),
                    JsonEncoder::lines(),
                    &mut sink,
                )
                .unwrap();
                black_box(sink)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_stream);
criterion_main!(benches);
