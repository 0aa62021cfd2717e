//! # Prime Counting — Lucy-Hedgehog Sublinear Prime Sums (C9)
//!
//! `Sum[p^z, p prime <= n]` in `O(n^(5/7))` (`O(n/log n)` space), using the
//! Lucy-Hedgehog sieve: start from `d(i) = Sum[k^z, 2 <= k <= i]` and, for
//! each prime `p <= sqrt(n)` in turn, subtract off the contribution of
//! composites with smallest prime factor `p`. [`prime_power_sum_sqrt`]
//! generalizes the source's `sum_primes` (its `z = 1` special case) to an
//! arbitrary exponent `z`, using [`crate::polynom::polynom_sum`] for the
//! closed-form initialization instead of a hardcoded `k(k+1)/2 - 1`.
//!
//! [`prime_pi1`]/[`prime_pi3`] further split the same sieve into two
//! parallel counts for primes `≡ 1` and `≡ 3 (mod 4)` — the residue classes
//! of odd primes, whose product structure (`1·1=1`, `1·3=3`, `3·3≡1`) lets
//! the elimination step cross-reference the two arrays instead of
//! collapsing them into one.
//!
//! # References
//! Ported from `sum_primes` in the source totient-sums header; the mod-4
//! split is a direct extension of the same recurrence, not present
//! verbatim in the source.

use crate::coeff::Coeff;
use crate::error::Result;
use crate::intmath::isqrt;
use crate::polynom::{polynom_sum, Polynom};
use crate::sqrt_map::SqrtMap;

/// `Sum[p^z, p prime <= i]` at every breakpoint of `n`, as the full
/// Lucy-Hedgehog sieve table rather than just the final value at `n`. `p`
/// must list every prime `<= sqrt(n)`. `O(n^(5/7))`.
pub fn prime_power_sum_sqrt_map<T: Coeff>(z: i64, n: i64, p: &[i64], id: &T) -> Result<SqrtMap<T>> {
    let q = isqrt(n).max(1);
    let monomial = {
        let mut poly = Polynom::zero(id.zero());
        poly.set(z, id.identity());
        poly
    };
    let closed_form = polynom_sum(&monomial, id)?;
    let mut d: SqrtMap<T> = SqrtMap::new(q, n)?;
    if n < 1 {
        return Ok(d);
    }
    let init = |i: i64, d: &mut SqrtMap<T>| {
        d.set(i, closed_form.eval(&id.cast_i64(i)) - id.identity());
    };
    let mut l = 1i64;
    while l <= q {
        let i = n / l;
        init(i, &mut d);
        l += 1;
    }
    for i in (1..n / q).rev() {
        init(i, &mut d);
    }
    for &pj in p {
        if pj > q {
            break;
        }
        let p2 = pj * pj;
        if p2 > n {
            break;
        }
        let weight = id.cast_i64(pj).pow(z);
        let l_max = q.min(n / p2);
        let mut l = 1i64;
        while l <= l_max {
            let i = n / l;
            let delta = (d.get(i / pj).unwrap().clone() - d.get(pj - 1).unwrap().clone()) * weight.clone();
            d.set(i, d.get(i).unwrap().clone() - delta);
            l += 1;
        }
        for i in (p2..n / q).rev() {
            let delta = (d.get(i / pj).unwrap().clone() - d.get(pj - 1).unwrap().clone()) * weight.clone();
            d.set(i, d.get(i).unwrap().clone() - delta);
        }
    }
    Ok(d)
}

/// `Sum[p^z, p prime <= n]`. `p` must list every prime `<= sqrt(n)`.
/// `O(n^(5/7))`.
pub fn prime_power_sum_sqrt<T: Coeff>(z: i64, n: i64, p: &[i64], id: &T) -> Result<T> {
    if n < 1 {
        return Ok(id.zero());
    }
    Ok(prime_power_sum_sqrt_map(z, n, p, id)?.get(n).unwrap().clone())
}

/// `Sum[p, p prime <= n]`. `O(n^(5/7))`.
pub fn prime_sum<T: Coeff>(n: i64, p: &[i64], id: &T) -> Result<T> {
    prime_power_sum_sqrt(1, n, p, id)
}

/// Number of primes `<= n`. `O(n^(5/7))`.
pub fn prime_pi_sqrt(n: i64, p: &[i64]) -> Result<i64> {
    prime_power_sum_sqrt(0, n, p, &1i64)
}

/// `pi(i)`, the count of primes `<= i`, at every breakpoint of `n`. The
/// `sum_multiplicative`-based route to `mertens` seeds its `s1` table from
/// this (negated).
pub fn prime_pi_sqrt_map(n: i64, p: &[i64]) -> Result<SqrtMap<i64>> {
    prime_power_sum_sqrt_map(0, n, p, &1i64)
}

/// Number of primes `<= n` congruent to `1 (mod 4)`, and to `3 (mod 4)`,
/// respectively (`2` itself belongs to neither class and is excluded).
/// `p` must list every prime `<= sqrt(n)`. `O(n^(5/7))`.
pub fn prime_pi1_pi3(n: i64, p: &[i64]) -> Result<(i64, i64)> {
    if n < 1 {
        return Ok((0, 0));
    }
    let q = isqrt(n);
    let mut d1: SqrtMap<i64> = SqrtMap::new(q.max(1), n)?;
    let mut d3: SqrtMap<i64> = SqrtMap::new(q.max(1), n)?;
    let cnt1 = |i: i64| (i + 3) / 4; // # of k in [1,i] with k % 4 == 1
    let cnt3 = |i: i64| (i + 1) / 4; // # of k in [1,i] with k % 4 == 3
    let init = |i: i64, d1: &mut SqrtMap<i64>, d3: &mut SqrtMap<i64>| {
        d1.set(i, cnt1(i) - 1); // exclude k = 1, which is not prime
        d3.set(i, cnt3(i));
    };
    let mut l = 1i64;
    while l <= q {
        init(n / l, &mut d1, &mut d3);
        l += 1;
    }
    for i in (1..n / q).rev() {
        init(i, &mut d1, &mut d3);
    }
    for &pj in p {
        if pj > q || pj == 2 {
            continue;
        }
        let p2 = pj * pj;
        if p2 > n {
            break;
        }
        let residue1 = pj % 4 == 1;
        let mut step = |i: i64, d1: &mut SqrtMap<i64>, d3: &mut SqrtMap<i64>| {
            let a = *d1.get(i / pj).unwrap() - *d1.get(pj - 1).unwrap();
            let b = *d3.get(i / pj).unwrap() - *d3.get(pj - 1).unwrap();
            let (sub1, sub3) = if residue1 { (a, b) } else { (b, a) };
            let cur1 = *d1.get(i).unwrap();
            let cur3 = *d3.get(i).unwrap();
            d1.set(i, cur1 - sub1);
            d3.set(i, cur3 - sub3);
        };
        let l_max = q.min(n / p2);
        let mut l = 1i64;
        while l <= l_max {
            step(n / l, &mut d1, &mut d3);
            l += 1;
        }
        for i in (p2..n / q).rev() {
            step(i, &mut d1, &mut d3);
        }
    }
    Ok((*d1.get(n).unwrap(), *d3.get(n).unwrap()))
}

/// Number of primes `<= n` congruent to `1 (mod 4)`.
pub fn prime_pi1(n: i64, p: &[i64]) -> Result<i64> {
    Ok(prime_pi1_pi3(n, p)?.0)
}

/// Number of primes `<= n` congruent to `3 (mod 4)`.
pub fn prime_pi3(n: i64, p: &[i64]) -> Result<i64> {
    Ok(prime_pi1_pi3(n, p)?.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sieve;

    #[test]
    fn prime_sum_matches_dense_sieve_n30() {
        let n = 30i64;
        let (p, is_prime) = sieve::primes(n + 1);
        let sqrt_p = sieve::primes(isqrt(n) + 1).0;
        let expected: i64 = (2..=n).filter(|&k| is_prime[k as usize]).sum();
        let result = prime_sum(n, &sqrt_p, &0i64).unwrap();
        assert_eq!(result, expected);
        let _ = p;
    }

    #[test]
    fn prime_sum_of_30_is_129() {
        let sqrt_p = sieve::primes(isqrt(30) + 1).0;
        assert_eq!(prime_sum(30, &sqrt_p, &1i64).unwrap(), 129);
    }

    #[test]
    fn prime_pi_sqrt_matches_count() {
        let n = 1000i64;
        let sqrt_p = sieve::primes(isqrt(n) + 1).0;
        let (p, _) = sieve::primes(n + 1);
        let result = prime_pi_sqrt(n, &sqrt_p).unwrap();
        assert_eq!(result, p.len() as i64);
    }

    #[test]
    fn prime_power_sum_sqrt_z2_matches_dense() {
        let n = 200i64;
        let sqrt_p = sieve::primes(isqrt(n) + 1).0;
        let (p, _) = sieve::primes(n + 1);
        let expected: i64 = p.iter().map(|&x| x * x).sum();
        let result = prime_power_sum_sqrt(2, n, &sqrt_p, &0i64).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn prime_pi1_pi3_partition_all_odd_primes() {
        let n = 500i64;
        let sqrt_p = sieve::primes(isqrt(n) + 1).0;
        let (p, _) = sieve::primes(n + 1);
        let (c1, c3) = prime_pi1_pi3(n, &sqrt_p).unwrap();
        let odd_primes = p.iter().filter(|&&x| x != 2).count() as i64;
        assert_eq!(c1 + c3, odd_primes);
        let expected1 = p.iter().filter(|&&x| x % 4 == 1).count() as i64;
        let expected3 = p.iter().filter(|&&x| x % 4 == 3).count() as i64;
        assert_eq!(c1, expected1);
        assert_eq!(c3, expected3);
    }
}
