// benches/convert_benchmark.rs
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tagged_array::codec::{encode, try_to_f64_array_1d};
use tagged_array::convert::to_bytes;
use tagged_array::*;

fn benchmark_to_bytes(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_bytes_f64");

    for size in [1000, 10000, 100000].iter() {
        let data: Vec<f64> = (0..*size).map(|i| i as f64).collect();
        group.throughput(Throughput::Bytes((*size * 8) as u64));

        for order in [ByteOrder::Native, ByteOrder::Little, ByteOrder::Big] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", order), size),
                &data,
                |b, data| b.iter(|| to_bytes(data, order)),
            );
        }
    }

    group.finish();
}

fn benchmark_codec_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec_roundtrip_f64");

    for size in [1000, 100000].iter() {
        let data: Vec<f64> = (0..*size).map(|i| i as f64 * 0.1).collect();
        group.throughput(Throughput::Bytes((*size * 8) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let bytes = encode(data, &[data.len()], ByteOrder::Big).unwrap();
                try_to_f64_array_1d(&bytes).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_to_bytes, benchmark_codec_roundtrip);
criterion_main!(benches);
