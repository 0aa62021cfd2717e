//! # Sieve — Dense Prime Tables (C4)
//!
//! Eratosthenes sieving and the family of dense per-integer tables built on
//! top of it: prime counting, the count of distinct prime factors, Euler's
//! totient, the Möbius function, divisor counts/sums, and largest-prime-factor
//! tables. Every routine here runs
//! once over `[0, n)` and fills a flat `Vec`, the same shape the rest of the
//! crate expects dense prefix tables to come in (§3's "dense prefix table").
//!
//! The segmented variants (`segmented_phi`, `segmented_mu`) cover a window
//! `[b, e)` using only primes up to `sqrt(e)`, correcting afterwards for the
//! at-most-one leftover prime factor larger than that bound — the same
//! trick used by segmented sieving generally.
//!
//! # References
//! - Sieve of Eratosthenes, odd/even-optimized variants.
//! - Möbius function via iterated sign flips plus a squared-prime pass.
//! - Totient/Möbius segmented sieve: correct for the single prime factor
//!   that can exceed `sqrt(e)`.

use crate::intmath::div_ceil;

/// Sieves primes up to `n` (exclusive). Returns the primes themselves and,
/// packed alongside, an `n`-length `is_prime` flag table.
///
/// Complexity: `O(n log log n)`.
pub fn primes(n: i64) -> (Vec<i64>, Vec<bool>) {
    debug_assert!(n >= 0);
    let n = n as usize;
    let mut is_prime = vec![false; n];
    for q in is_prime.iter_mut().skip(2) {
        *q = true;
    }
    let mut p = Vec::new();
    for i in 2..n {
        if !is_prime[i] {
            continue;
        }
        p.push(i as i64);
        if i > n / i {
            continue;
        }
        let mut j = i * i;
        while j < n {
            is_prime[j] = false;
            j += i;
        }
    }
    (p, is_prime)
}

/// Number of primes `<= i`, for every `i` in `[0, n)`.
///
/// Complexity: `O(n)`, given `p`.
pub fn prime_pi(n: i64, p: &[i64]) -> Vec<i64> {
    debug_assert!(n >= 0);
    let n = n as usize;
    let mut pi = vec![0i64; n];
    let mut l = 0usize;
    for (i, slot) in pi.iter_mut().enumerate() {
        if l < p.len() && i as i64 == p[l] {
            l += 1;
        }
        *slot = l as i64;
    }
    pi
}

/// Euler's totient `phi(i)` for every `i` in `[0, n)`.
///
/// Complexity: `O(n log log n)`.
pub fn euler_phi(n: i64, p: &[i64]) -> Vec<i64> {
    debug_assert!(n >= 0);
    let n = n as usize;
    let mut phi: Vec<i64> = (0..n as i64).collect();
    for &pi in p {
        let pi = pi as usize;
        if pi >= n {
            break;
        }
        let mut j = pi;
        while j < n {
            phi[j] = phi[j] / pi as i64 * (pi as i64 - 1);
            j += pi;
        }
    }
    phi
}

/// Möbius `mu(i)` for every `i` in `[0, n)`: `0` unless `i` is square-free,
/// `+1`/`-1` by the parity of its number of distinct prime factors.
///
/// Complexity: `O(n log log n)`.
pub fn moebius_mu(n: i64, p: &[i64]) -> Vec<i64> {
    debug_assert!(n >= 0);
    let n = n as usize;
    let mut mu = vec![1i64; n];
    if n > 0 {
        mu[0] = 0;
    }
    for &pi in p {
        let pi = pi as usize;
        if pi >= n {
            break;
        }
        let mut j = 0;
        while j < n {
            mu[j] = -mu[j];
            j += pi;
        }
    }
    for &pi in p {
        let p2 = (pi * pi) as usize;
        if p2 >= n {
            break;
        }
        let mut j = 0;
        while j < n {
            mu[j] = 0;
            j += p2;
        }
    }
    mu
}

/// Number of distinct prime factors `omega(i)` for every `i` in `[0, n)`.
/// Not to be confused with [`prime_pi`] (cumulative count of primes `<= i`).
///
/// Complexity: `O(n log log n)`.
pub fn prime_nu(n: i64, p: &[i64]) -> Vec<i64> {
    debug_assert!(n >= 0);
    let n = n as usize;
    let mut nu = vec![0i64; n];
    for &pi in p {
        let pi = pi as usize;
        if pi >= n {
            break;
        }
        let mut j = pi;
        while j < n {
            nu[j] += 1;
            j += pi;
        }
    }
    nu
}

/// Number of divisors `d(i)` for every `i` in `[1, n)`; index `0` is unused.
///
/// Complexity: `O(n log n)`.
pub fn divisor_sigma0(n: i64) -> Vec<i64> {
    debug_assert!(n >= 0);
    let n = n as usize;
    let mut ds0 = vec![0i64; n];
    for i in 1..n {
        let mut j = i;
        while j < n {
            ds0[j] += 1;
            j += i;
        }
    }
    ds0
}

/// Sum of divisors `sigma(i)` for every `i` in `[1, n)`; index `0` is unused.
///
/// Complexity: `O(n log n)`.
pub fn divisor_sigma1(n: i64) -> Vec<i64> {
    debug_assert!(n >= 0);
    let n = n as usize;
    let mut ds1 = vec![0i64; n];
    for i in 1..n {
        let mut j = i;
        while j < n {
            ds1[j] += i as i64;
            j += i;
        }
    }
    ds1
}

/// Biggest prime factor `bpf(i)` for every `i` in `[0, n)`. `bpf[1] = 1`
/// (no prime factor) and `bpf[0] = 0` (undefined, never read).
///
/// Complexity: `O(n log log n)`.
pub fn factor(n: i64, p: &[i64]) -> Vec<i64> {
    debug_assert!(n >= 1);
    let n = n as usize;
    let mut bpf = vec![0i64; n];
    if n > 1 {
        bpf[1] = 1;
    }
    for &pi in p {
        let pi_u = pi as usize;
        if pi_u >= n {
            break;
        }
        let mut j = pi_u;
        while j < n {
            bpf[j] = pi;
            j += pi_u;
        }
    }
    bpf
}

/// Euler's totient `phi(i)` for `i` in the window `[b, e)`, given primes up
/// to `sqrt(e - 1)`.
///
/// Complexity: `O((e - b) log log e)`.
pub fn segmented_phi(b: i64, e: i64, p: &[i64]) -> Vec<i64> {
    debug_assert!(b >= 0 && b < e);
    let len = (e - b) as usize;
    let mut phi = vec![1i64; len];
    let mut tmp: Vec<i64> = (b..e).collect();
    for &pi in p {
        let mut q = div_ceil(b, pi) * pi;
        while q < e {
            let idx = (q - b) as usize;
            phi[idx] *= pi - 1;
            tmp[idx] /= pi;
            while tmp[idx] % pi == 0 {
                phi[idx] *= pi;
                tmp[idx] /= pi;
            }
            q += pi;
        }
    }
    // correction for a single leftover prime factor larger than sqrt(e)
    for idx in 0..len {
        if tmp[idx] > 1 {
            phi[idx] *= tmp[idx] - 1;
        }
    }
    phi
}

/// Möbius `mu(i)` for `i` in the window `[b, e)`, given primes up to
/// `sqrt(e - 1)`.
///
/// Complexity: `O((e - b) log log e)`.
pub fn segmented_mu(b: i64, e: i64, p: &[i64]) -> Vec<i64> {
    debug_assert!(b >= 0 && b < e);
    let len = (e - b) as usize;
    let mut mu = vec![1i64; len];
    for &pi in p {
        let mut q = div_ceil(b, pi) * pi;
        while q < e {
            mu[(q - b) as usize] *= -pi;
            q += pi;
        }
        let p2 = pi * pi;
        let mut q = div_ceil(b, p2) * p2;
        while q < e {
            mu[(q - b) as usize] = 0;
            q += p2;
        }
    }
    // correction for a single leftover prime factor larger than sqrt(e):
    // at this point mu[idx] is either 0, or +/- the leftover cofactor.
    for (idx, v) in mu.iter_mut().enumerate() {
        let q = b + idx as i64;
        if *v < 0 && *v != -q {
            *v = q;
        }
        if *v > 0 && *v != q {
            *v = -q;
        }
    }
    for v in mu.iter_mut() {
        if *v < 0 {
            *v = -1;
        } else if *v > 0 {
            *v = 1;
        }
    }
    mu
}
