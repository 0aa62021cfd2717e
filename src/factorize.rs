//! # Factorize — Prime Factorization From a Biggest-Prime-Factor Table (C5)
//!
//! Given a precomputed `bpf` table (from [`crate::sieve::factor`]), recovers
//! the prime factorization of any single integer in `O(log n / log log n)`
//! by repeatedly dividing out the biggest prime factor, and derives
//! per-integer arithmetic functions (totient, divisor count, the divisor
//! list itself) directly from that factorization rather than by table
//! lookup — useful once `n` is too large for a dense sieve but still small
//! enough to factor directly.

/// Prime factorization of `n`, using a biggest-prime-factor table `bpf`
/// indexed up to (and including) `n`.
///
/// Complexity: `O(log n / log log n)`.
pub fn factor_integer(mut n: i64, bpf: &[i64]) -> Vec<(i64, i64)> {
    debug_assert!(n >= 1 && (n as usize) < bpf.len());
    let mut vf = Vec::new();
    while n > 1 {
        let p = bpf[n as usize];
        let mut e = 0;
        while n % p == 0 {
            n /= p;
            e += 1;
        }
        vf.push((p, e));
    }
    vf
}

/// Prime factorization of the product of `vn`, given a `bpf` table indexed
/// up to (and including) the largest element of `vn`.
///
/// Complexity: `O(k log n / log log n)` for `k` integers of max size `n`.
pub fn factor_integer_product(vn: &[i64], bpf: &[i64]) -> Vec<(i64, i64)> {
    let mut merged: Vec<(i64, i64)> = Vec::new();
    for &n in vn {
        for (p, e) in factor_integer(n, bpf) {
            match merged.iter_mut().find(|(q, _)| *q == p) {
                Some((_, acc)) => *acc += e,
                None => merged.push((p, e)),
            }
        }
    }
    merged.sort_unstable();
    merged
}

/// All divisors `<= maxd` of the number whose factorization is `vf`.
pub fn divisors(vf: &[(i64, i64)], maxd: i64) -> Vec<i64> {
    let mut vd = vec![1i64];
    for &(p, e) in vf {
        let prev_len = vd.len();
        let mut pk = 1i64;
        for _ in 1..=e {
            pk *= p;
            for i in 0..prev_len {
                let d = vd[i] * pk;
                if d <= maxd {
                    vd.push(d);
                }
            }
        }
    }
    vd
}

/// Euler's totient of a number given its factorization.
pub fn euler_phi_of(vf: &[(i64, i64)]) -> i64 {
    let mut phi = 1i64;
    for &(p, e) in vf {
        phi *= p.pow(e as u32 - 1) * (p - 1);
    }
    phi
}

/// Carmichael's lambda (exponent of the multiplicative group) given a
/// number's factorization.
pub fn carmichael_lambda(vf: &[(i64, i64)]) -> i64 {
    let mut lambda = 1i64;
    for &(p, e) in vf {
        let term = if p == 2 && e >= 3 {
            p.pow(e as u32 - 2) * (p - 1) // 2^(e-2), since (Z/2^e)* isn't cyclic for e>=3
        } else {
            p.pow(e as u32 - 1) * (p - 1)
        };
        lambda = lambda / crate::intmath::gcd(lambda, term) * term;
    }
    lambda
}

/// Number of divisors given a number's factorization.
pub fn divisor_sigma0_of(vf: &[(i64, i64)]) -> i64 {
    vf.iter().map(|&(_, e)| e + 1).product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sieve;

    #[test]
    fn factor_integer_recovers_prime_powers() {
        let p = sieve::primes(100).0;
        let bpf = sieve::factor(100, &p);
        assert_eq!(factor_integer(60, &bpf), vec![(2, 2), (3, 1), (5, 1)]);
        assert_eq!(factor_integer(97, &bpf), vec![(97, 1)]);
        assert_eq!(factor_integer(1, &bpf), vec![]);
    }

    #[test]
    fn divisors_of_12() {
        let vf = vec![(2, 2), (3, 1)];
        let mut vd = divisors(&vf, i64::MAX);
        vd.sort_unstable();
        assert_eq!(vd, vec![1, 2, 3, 4, 6, 12]);
    }

    #[test]
    fn divisors_respect_maxd() {
        let vf = vec![(2, 2), (3, 1)];
        let mut vd = divisors(&vf, 4);
        vd.sort_unstable();
        assert_eq!(vd, vec![1, 2, 3, 4]);
    }

    #[test]
    fn euler_phi_of_matches_dense_table() {
        let p = sieve::primes(100).0;
        let bpf = sieve::factor(100, &p);
        let dense = sieve::euler_phi(100, &p);
        for n in 1..100i64 {
            let vf = factor_integer(n, &bpf);
            assert_eq!(euler_phi_of(&vf), dense[n as usize], "mismatch at {n}");
        }
    }

    #[test]
    fn divisor_sigma0_of_matches_dense_table() {
        let p = sieve::primes(100).0;
        let bpf = sieve::factor(100, &p);
        let dense = sieve::divisor_sigma0(100);
        for n in 1..100i64 {
            let vf = factor_integer(n, &bpf);
            assert_eq!(divisor_sigma0_of(&vf), dense[n as usize], "mismatch at {n}");
        }
    }
}
