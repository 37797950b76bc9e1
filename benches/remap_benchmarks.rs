use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use index_workloads::corpus::{reverse_host_name, Corpus};
use index_workloads::encoder::{encode_workload, MonotonicIntEncoder};
use index_workloads::remap::{OrdinalMap, TransactionRewriter};
use index_workloads::{Operation, Record};
use std::hint::black_box;
use std::io::Cursor;

fn load_trace(size: usize) -> String {
    (0..size).map(|i| format!("INSERT user{}\n", i * 7919)).collect()
}

fn txn_trace(size: usize) -> String {
    (0..size)
        .map(|i| match i % 4 {
            0 => format!("READ user{}", (i % size) * 7919),
            1 => format!("UPDATE user{}", ((i * 31) % size) * 7919),
            2 => format!("SCAN user{} 100", ((i * 17) % size) * 7919),
            _ => format!("INSERT fresh{}", i),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrite");

    for size in [1_000, 10_000, 100_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));

        let ordinals = OrdinalMap::from_reader(Cursor::new(load_trace(*size))).unwrap();
        let corpus = Corpus::from_entries((0..size / 2).map(|i| format!("u{}@example.org", i)));
        let txn = txn_trace(*size);

        group.bench_with_input(BenchmarkId::new("transaction_trace", size), size, |b, _| {
            let rewriter = TransactionRewriter::new(&ordinals, &corpus);
            b.iter(|| {
                let mut out = Vec::with_capacity(txn.len() * 2);
                rewriter
                    .rewrite(Cursor::new(black_box(txn.as_bytes())), &mut out)
                    .unwrap();
                out
            });
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in [1_000, 100_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));

        let load: Vec<Record> = (0..*size)
            .map(|i| Record::new(Operation::Insert, format!("{}", i * 7919)))
            .collect();
        let txn: Vec<Record> = (0..*size)
            .map(|i| Record::new(Operation::Read, format!("{}", ((i * 31) % size) * 7919)))
            .collect();

        group.bench_with_input(BenchmarkId::new("monoint", size), size, |b, _| {
            b.iter(|| {
                let mut encoder = MonotonicIntEncoder::new();
                encode_workload(&mut encoder, black_box(&load), black_box(&txn)).unwrap()
            });
        });
    }

    group.finish();
}

fn bench_reverse_host_name(c: &mut Criterion) {
    let entries: Vec<String> = (0..10_000)
        .map(|i| format!("user{}@mail{}.example.co.uk", i, i % 97))
        .collect();

    c.bench_function("reverse_host_name", |b| {
        b.iter(|| {
            for entry in &entries {
                black_box(reverse_host_name(black_box(entry)));
            }
        });
    });
}

criterion_group!(benches, bench_rewrite, bench_encode, bench_reverse_host_name);
criterion_main!(benches);
