//! # Squarefree Counting and Generalized Divisor Sums (C12)
//!
//! `Q(n) = Sum[squarefree(k), k=1..n]`, both as a dense sieve
//! ([`sieve_sqfree_count`]) and as a sublinear recursive evaluation
//! ([`sqfree_count`], `O(n^(1/2))`) using the identity `Q(n) = Sum[mu(d)
//! floor(n/d^2), d=1..sqrt(n)]` without ever sieving `mu` itself.
//!
//! [`divisor_sigma`] is `sigma_k(n) = Sum[d^k, d|n]` for an arbitrary
//! exponent `k`, expressed as the Dirichlet convolution `Id^k * 1` rather
//! than the closed-form per-prime-power recurrence `sieve.rs` uses for the
//! `k in {0, 1}` cases — useful whenever `k` isn't known until runtime, or
//! the coefficient ring isn't `i64`.
//!
//! # References
//! Ported from `sieve_sqfree_count`, `sqfree_count`, and `divisor_sigma` in
//! the source divisor-sums header.

use crate::coeff::Coeff;
use crate::dirichlet::dirichlet_convolution_multiplicative;
use crate::intmath::isqrt;

/// Dense prefix count of squarefree numbers, `Q(i)` for every `i` in
/// `[0, n)`. `p` must list every prime `< sqrt(n)`. `O(n log log n)`.
pub fn sieve_sqfree_count(n: i64, p: &[i64]) -> Vec<i64> {
    let nu = n as usize;
    let mut sqfc = vec![1i64; nu];
    if nu > 0 {
        sqfc[0] = 0;
    }
    for &pi in p {
        let p2 = pi * pi;
        if p2 >= n {
            break;
        }
        let mut j = p2;
        while j < n {
            sqfc[j as usize] = 0;
            j += p2;
        }
    }
    for i in 1..nu {
        sqfc[i] += sqfc[i - 1];
    }
    sqfc
}

/// `Q(n) = Sum[mu(d) floor(n/d^2), d=1..sqrt(n)]`, the count of squarefree
/// numbers `<= n`, without sieving `mu`. Memoizes into `tbl`. `O(n^(1/2))`.
pub fn sqfree_count(n: i64, tbl: &mut std::collections::HashMap<i64, i64>) -> i64 {
    if n < 1 {
        return 0;
    }
    if let Some(&v) = tbl.get(&n) {
        return v;
    }
    let mut r = n;
    let q = crate::intmath::icbrt(n).max(1);
    for m in 1..q {
        let weight = isqrt(n / m) - isqrt(n / (m + 1));
        r -= weight * sqfree_count(m, tbl);
    }
    let mut k = isqrt(n / q);
    while k > 1 {
        r -= sqfree_count(n / (k * k), tbl);
        k -= 1;
    }
    tbl.insert(n, r);
    r
}

/// `sigma_k(i) = Sum[d^k, d|i]` for every `i` in `[0, n)`, expressed as the
/// Dirichlet convolution `Id^k * 1`. `O(n log log n)`.
pub fn divisor_sigma<T: Coeff>(k: i64, n: i64, pa: &[i64], id: &T) -> Vec<T> {
    let c1 = move |_: i64| id.identity();
    match k {
        0 => dirichlet_convolution_multiplicative(move |_| id.identity(), c1, n, pa, id),
        1 => dirichlet_convolution_multiplicative(move |m| id.cast_i64(m), c1, n, pa, id),
        _ => dirichlet_convolution_multiplicative(move |m| id.cast_i64(m).pow(k), c1, n, pa, id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sieve;

    fn is_squarefree(mut k: i64, p: &[i64]) -> bool {
        for &pi in p {
            if pi * pi > k {
                break;
            }
            if k % (pi * pi) == 0 {
                return false;
            }
            while k % pi == 0 {
                k /= pi;
            }
        }
        true
    }

    #[test]
    fn sieve_sqfree_count_matches_brute_force() {
        let n = 500i64;
        let p = sieve::primes(isqrt(n) + 1).0;
        let q = sieve_sqfree_count(n, &p);
        let mut expected = 0i64;
        for k in 1..n {
            if is_squarefree(k, &p) {
                expected += 1;
            }
            assert_eq!(q[k as usize], expected, "mismatch at {k}");
        }
    }

    #[test]
    fn sqfree_count_of_30_is_19() {
        let mut tbl = std::collections::HashMap::new();
        assert_eq!(sqfree_count(30, &mut tbl), 19);
    }

    #[test]
    fn sqfree_count_matches_dense_sieve() {
        let n = 20_000i64;
        let p = sieve::primes(isqrt(n) + 1).0;
        let dense = sieve_sqfree_count(n + 1, &p);
        let mut tbl = std::collections::HashMap::new();
        assert_eq!(sqfree_count(n, &mut tbl), dense[n as usize]);
    }

    #[test]
    fn divisor_sigma_k1_matches_sieve_sigma1() {
        let n = 40i64;
        let (pa, _) = sieve::primes(n);
        let ds1 = divisor_sigma(1, n, &pa, &0i64);
        let expected = sieve::divisor_sigma1(n);
        assert_eq!(&ds1[1..n as usize], &expected[1..n as usize]);
    }

    #[test]
    fn divisor_sigma_k0_matches_sieve_sigma0() {
        let n = 40i64;
        let (pa, _) = sieve::primes(n);
        let ds0 = divisor_sigma(0, n, &pa, &0i64);
        let expected = sieve::divisor_sigma0(n);
        assert_eq!(&ds0[1..n as usize], &expected[1..n as usize]);
    }
}
