use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fortuna_generator::{Aes256Factory, Generator};

fn bench_pseudo_random_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("pseudo_random_data");

    for size in [16usize, 1024, 64 * 1024, 1024 * 1024] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut gen = Generator::new(Aes256Factory::new()).unwrap();
            gen.seed(1).unwrap();
            b.iter(|| black_box(gen.pseudo_random_data(size).unwrap()));
        });
    }

    group.finish();
}

fn bench_int63(c: &mut Criterion) {
    let mut gen = Generator::new(Aes256Factory::new()).unwrap();
    gen.seed(1).unwrap();
    c.bench_function("int63", |b| b.iter(|| black_box(gen.int63().unwrap())));
}

fn bench_reseed(c: &mut Criterion) {
    let mut gen = Generator::new(Aes256Factory::new()).unwrap();
    let seed = [0x5au8; 32];
    c.bench_function("reseed", |b| b.iter(|| gen.reseed(black_box(&seed)).unwrap()));
}

criterion_group!(benches, bench_pseudo_random_data, bench_int63, bench_reseed);
criterion_main!(benches);
