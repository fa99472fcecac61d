//! Benchmarks for Touchstone parsing and serialization
//!
//! Measures text throughput for growing sweeps and port counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use num_complex::Complex64;
use std::f64::consts::PI;
use touchstone_core::touchstone::{
    parse, serialize, DataFormat, Document, DocumentBuilder, SerializeOptions, Version,
};

/// Create a test document with smoothly varying S-parameters
fn create_test_document(nfreq: usize, nports: usize) -> Document {
    let mut builder = DocumentBuilder::new(nports);
    for f in 0..nfreq {
        let phase = 2.0 * PI * f as f64 / nfreq as f64;
        let s = Array2::from_shape_fn((nports, nports), |(i, j)| {
            let mag = if i == j { 0.1 } else { 0.9 };
            Complex64::from_polar(mag, phase * (i + j + 1) as f64)
        });
        builder = builder.point_from_array(1e9 + 1e7 * f as f64, &s);
    }
    builder.build().expect("valid benchmark document")
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for nfreq in [10, 100, 1000].iter() {
        for nports in [2, 4, 8].iter() {
            let text = serialize(
                &create_test_document(*nfreq, *nports),
                &SerializeOptions::default(),
            )
            .expect("serializable benchmark document");
            let id = BenchmarkId::new(format!("{}ports", nports), nfreq);

            group.bench_with_input(id, &text, |b, text| b.iter(|| black_box(parse(text))));
        }
    }

    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    let options = SerializeOptions {
        version: Version::V1_1,
        data_format: DataFormat::DecibelAngle,
        ..SerializeOptions::default()
    };

    for nfreq in [10, 100, 1000].iter() {
        for nports in [2, 4, 8].iter() {
            let doc = create_test_document(*nfreq, *nports);
            let id = BenchmarkId::new(format!("{}ports", nports), nfreq);

            group.bench_with_input(id, &doc, |b, doc| {
                b.iter(|| black_box(serialize(doc, &options)))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_serialize);
criterion_main!(benches);
