//! Criterion benchmarks for zenflip critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Hex codec: float blob decode/encode
//! - Decimals: token parsing and shortest round-trip formatting
//! - Locator: scanning a world for one field kind
//! - Rewrite: full six-pass flip of a synthetic world

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use zenflip::hexfloat::{decode_floats, encode_floats};
use zenflip::locator::scan;
use zenflip::numeric::{format_decimal, parse_decimal};
use zenflip::rewrite::{flip_document, FieldRegistry, FlipOptions};
use zenflip::transforms::{AxisFlip, RotationMatrix};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Generate a world body with `vobs` objects and as many waypoints
fn make_world(vobs: usize) -> String {
    let rotation = RotationMatrix::from_row_major(&[0.0, 0.0, 1.0, 0.0, 1.0, 0.0, -1.0, 0.0, 0.0]);
    let rot_hex = rotation.to_hex();
    let keyframes = encode_floats(&[100.0, 250.5, -30.0, 0.0, 0.38268343, 0.0, 0.9238795].repeat(4));

    let mut out = String::from("ZenGin Archive\r\nver 1\r\nzCArchiverGeneric\r\nASCII\r\nEND\r\n");
    out.push_str("[% oCWorld:zCWorld 64513 0]\r\n\t[VobTree % 0 0]\r\n");
    for i in 0..vobs {
        let f = i as f32;
        out.push_str(&format!(
            "\t\t[% zCVob 52224 {}]\r\n\t\t\tbbox3DWS=rawFloat:{} -50 {} {} 150 {}\r\n\
             \t\t\ttrafoOSToWSRot=raw:{}\r\n\t\t\ttrafoOSToWSPos=vec3:{} 0 {}\r\n",
            i,
            f * 3.5 - 10.0,
            -f * 1.25,
            f * 3.5 + 10.0,
            -f * 1.25 + 20.0,
            rot_hex,
            f * 3.5,
            -f * 1.25 + 10.0
        ));
        if i % 16 == 0 {
            out.push_str(&format!("\t\t\tkeyframes=raw:{}\r\n", keyframes));
        }
    }
    out.push_str("\t[WayNet % 0 0]\r\n");
    for i in 0..vobs {
        out.push_str(&format!(
            "\t\t\tposition=vec3:{} 12.5 {}\r\n\t\t\tdirection=vec3:0.70710677 0 -0.70710677\r\n",
            i as f32 * 7.0,
            i as f32 * -2.0
        ));
    }
    out
}

// =============================================================================
// Codec Benchmarks
// =============================================================================

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for count in [9usize, 70, 700].iter() {
        let floats: Vec<f32> = (0..*count).map(|i| i as f32 * 0.731 - 17.0).collect();
        let hex = encode_floats(&floats);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("decode_floats", count), &hex, |b, hex| {
            b.iter(|| decode_floats(black_box(hex)))
        });
        group.bench_with_input(BenchmarkId::new("encode_floats", count), &floats, |b, floats| {
            b.iter(|| encode_floats(black_box(floats)))
        });
    }

    group.finish();
}

fn bench_decimals(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimals");

    let tokens = ["10", "-5.25", "0.70710677", "1.5E+20", "-12345.678"];
    group.bench_function("parse_decimal", |b| {
        b.iter(|| tokens.iter().map(|t| parse_decimal(black_box(t))).collect::<Vec<_>>())
    });

    let values = [10.0f32, -5.25, 0.70710677, 1.5e20, -12345.678, 1e-7];
    group.bench_function("format_decimal", |b| {
        b.iter(|| values.iter().map(|v| format_decimal(black_box(*v))).collect::<Vec<_>>())
    });

    group.finish();
}

// =============================================================================
// Locator and Rewrite Benchmarks
// =============================================================================

fn bench_locator(c: &mut Criterion) {
    let mut group = c.benchmark_group("locator");
    let registry = FieldRegistry::standard();
    let world = make_world(1000);
    group.throughput(Throughput::Bytes(world.len() as u64));

    for rule in registry.iter() {
        group.bench_with_input(BenchmarkId::new("scan", &rule.kind.name), &world, |b, world| {
            b.iter(|| scan(black_box(world), &rule.kind).count())
        });
    }

    group.finish();
}

fn bench_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrite");
    let options = FlipOptions::new(AxisFlip::X.with_rotation(true));

    for vobs in [100usize, 1000, 5000].iter() {
        let world = make_world(*vobs);
        group.throughput(Throughput::Bytes(world.len() as u64));
        group.bench_with_input(BenchmarkId::new("flip_document", vobs), &world, |b, world| {
            b.iter(|| flip_document(black_box(world), &options))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_codec, bench_decimals, bench_locator, bench_rewrite);
criterion_main!(benches);
