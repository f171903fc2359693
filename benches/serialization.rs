use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use toon_codec::{decode, decode_lenient, encode, from_str, to_string, toon, Value};

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

fn make_products(count: usize) -> Vec<Product> {
    (0..count)
        .map(|i| Product {
            sku: format!("SKU-{:05}", i),
            name: format!("Product {}", i),
            price: (i as f64) * 1.25,
            quantity: (i % 10) as u32,
        })
        .collect()
}

fn benchmark_encode_simple(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("encode_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_decode_simple(c: &mut Criterion) {
    let toon = "{\n  active: true\n  email: alice@example.com\n  id: 123\n  name: Alice\n}";

    c.bench_function("decode_simple_struct", |b| {
        b.iter(|| from_str::<User>(black_box(toon)))
    });
}

fn benchmark_encode_tabular(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_tabular");

    for size in [10, 100, 1000].iter() {
        let products = make_products(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &products, |b, p| {
            b.iter(|| to_string(black_box(p)))
        });
    }

    group.finish();
}

fn benchmark_decode_tabular(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_tabular");

    for size in [10, 100, 1000].iter() {
        let text = to_string(&make_products(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, t| {
            b.iter(|| decode(black_box(t)))
        });
    }

    group.finish();
}

fn benchmark_decode_lenient_clean(c: &mut Criterion) {
    let text = to_string(&make_products(100)).unwrap();

    c.bench_function("decode_lenient_clean_input", |b| {
        b.iter(|| decode_lenient(black_box(&text)))
    });
}

fn benchmark_encode_nested_value(c: &mut Criterion) {
    let value: Value = toon!({
        "config": {
            "name": "bench",
            "limits": [1, 2, 3, 4, 5],
            "flags": {"verbose": true, "dry_run": false}
        }
    });

    c.bench_function("encode_nested_value", |b| {
        b.iter(|| encode(black_box(&value)))
    });
}

criterion_group!(
    benches,
    benchmark_encode_simple,
    benchmark_decode_simple,
    benchmark_encode_tabular,
    benchmark_decode_tabular,
    benchmark_decode_lenient_clean,
    benchmark_encode_nested_value,
);
criterion_main!(benches);
