use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use toy_metro::config::RunConfig;
use toy_metro::core::run_chain;
use toy_metro::metropolis::MetropolisSampler;
use toy_metro::rng::Drand48;

fn sampler_benchmark(c: &mut Criterion) {
    let config = RunConfig::default().set_iterations(usize::MAX).set_seed(42);

    c.bench_function("10k steps, SmallRng", |b| {
        let mut sampler = MetropolisSampler::<SmallRng>::new(config).unwrap();
        b.iter(|| black_box(run_chain(&mut sampler, 10_000).unwrap()))
    });

    c.bench_function("10k steps, Drand48", |b| {
        let mut sampler = MetropolisSampler::<Drand48>::new(config).unwrap();
        b.iter(|| black_box(run_chain(&mut sampler, 10_000).unwrap()))
    });
}

criterion_group!(benches, sampler_benchmark);
criterion_main!(benches);
