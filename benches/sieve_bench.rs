use arith_kernel::{factorize, sieve};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_primes_1m(c: &mut Criterion) {
    c.bench_function("primes(1_000_000)", |b| {
        b.iter(|| sieve::primes(black_box(1_000_000)));
    });
}

fn bench_euler_phi_1m(c: &mut Criterion) {
    let (p, _) = sieve::primes(1_100);
    c.bench_function("euler_phi(1_000_000)", |b| {
        b.iter(|| sieve::euler_phi(black_box(1_000_000), &p));
    });
}

fn bench_moebius_mu_1m(c: &mut Criterion) {
    let (p, _) = sieve::primes(1_100);
    c.bench_function("moebius_mu(1_000_000)", |b| {
        b.iter(|| sieve::moebius_mu(black_box(1_000_000), &p));
    });
}

fn bench_segmented_phi(c: &mut Criterion) {
    let b_lo = 1_000_000_000i64;
    let e_hi = 1_000_100_000i64;
    let (p, _) = sieve::primes(35_000);
    c.bench_function("segmented_phi(1e9..1e9+1e5)", |bch| {
        bch.iter(|| sieve::segmented_phi(black_box(b_lo), black_box(e_hi), &p));
    });
}

fn bench_factor_integer(c: &mut Criterion) {
    let n = 999_983i64;
    let bpf = sieve::factor(n + 1, &sieve::primes(1_100).0);
    c.bench_function("factor_integer(999983)", |b| {
        b.iter(|| factorize::factor_integer(black_box(n), &bpf));
    });
}

criterion_group!(
    benches,
    bench_primes_1m,
    bench_euler_phi_1m,
    bench_moebius_mu_1m,
    bench_segmented_phi,
    bench_factor_integer,
);
criterion_main!(benches);
