use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use fbase64_rs::base64::Codec;

/// Create test data of the given size for benchmarking.
fn make_test_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

fn size_label(size: usize) -> String {
    if size >= 1024 * 1024 {
        format!("{}MB", size / (1024 * 1024))
    } else {
        format!("{}KB", size / 1024)
    }
}

fn bench_encode(c: &mut Criterion) {
    let sizes = [1024, 64 * 1024, 1024 * 1024];
    let unwrapped = Codec::standard();
    let wrapped = Codec::standard_wrapped(76, Some("\n")).unwrap();

    let mut group = c.benchmark_group("encode");
    for &size in &sizes {
        let data = make_test_data(size);
        let label = size_label(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("unwrapped", &label), &data, |b, data| {
            b.iter(|| unwrapped.encode(data));
        });

        group.bench_with_input(BenchmarkId::new("wrap76", &label), &data, |b, data| {
            b.iter(|| wrapped.encode(data));
        });

        // SIMD baseline for the same alphabet
        group.bench_with_input(BenchmarkId::new("base64_simd", &label), &data, |b, data| {
            b.iter(|| base64_simd::STANDARD.encode_to_string(data));
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let sizes = [1024, 64 * 1024, 1024 * 1024];
    let codec = Codec::standard();
    let wrapped = Codec::standard_wrapped(76, Some("\n")).unwrap();

    let mut group = c.benchmark_group("decode");
    for &size in &sizes {
        let data = make_test_data(size);
        let label = size_label(size);
        let flat = codec.encode(&data);
        let lines = wrapped.encode(&data);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("unwrapped", &label), &flat, |b, text| {
            b.iter(|| codec.decode(text).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("wrap76", &label), &lines, |b, text| {
            b.iter(|| codec.decode(text).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("base64_simd", &label), &flat, |b, text| {
            b.iter(|| base64_simd::STANDARD.decode_to_vec(text.as_bytes()).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
