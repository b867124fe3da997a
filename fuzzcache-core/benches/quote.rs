use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fuzzcache_core::{corpus::write_corpus, quote};

fn mixed_payload(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i * 31 % 256) as u8).collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in [256, 1024, 4096, 16384] {
        let payload = mixed_payload(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| quote::encode(black_box(&payload)));
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for size in [256, 1024, 4096, 16384] {
        let token = quote::encode(&mixed_payload(size));
        let plain = quote::encode(&vec![b'a'; size]);

        group.throughput(Throughput::Bytes(token.len() as u64));
        group.bench_with_input(BenchmarkId::new("escaped", size), &size, |b, _| {
            b.iter(|| quote::decode(black_box(&token)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("plain", size), &size, |b, _| {
            b.iter(|| quote::decode(black_box(&plain)).unwrap());
        });
    }

    group.finish();
}

fn bench_corpus(c: &mut Criterion) {
    let seeds: Vec<Vec<u8>> = (0..1000).map(|i| mixed_payload(64 + i % 64)).collect();

    c.bench_function("write_corpus_1000", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(256 * 1024);
            write_corpus(&mut out, black_box(&seeds)).unwrap()
        });
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_corpus);
criterion_main!(benches);
