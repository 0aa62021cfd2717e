//! # Sum Multiplicative — Sublinear Partial Sums of a Multiplicative Function (C10)
//!
//! Given a multiplicative `f` specified only by its behaviour at prime
//! powers (`f(p^e) = f(f(p^(e-1)), p, e)`) and a precomputed table `s1` of
//! `Sum[f(p), prime p <= k]` at every breakpoint `⌊n/k⌋`, computes
//! `F_k(m) = Sum[f(i), 1 <= i <= m, lpf(i) >= p_k]` at every breakpoint for
//! every `k`, descending from `k` near `pi(n^(1/3))` down to `k = 0` —
//! recovering `S(n) = F_1(n)` along the way. `O(n^(2/3))`.
//!
//! The descent has three phases, split by how cheaply each range of `m`
//! can be updated:
//! 1. **Semiprime correction**, for `m` up to `n^(2/3)`: evaluate directly,
//!    correcting the prime-power table for the semiprime and low-prime-power
//!    terms a multiplicative function's value doesn't reduce to at a
//!    single prime.
//! 2. **Fenwick-backed descent**, for `m < n^(2/3)`: rather than touch every
//!    breakpoint on every step, accumulate per-level contributions from
//!    newly-rough numbers (smallest prime factor exactly `p_k`) into a
//!    Fenwick tree indexed by a monotone embedding of small keys and large
//!    breakpoints, and read back via prefix sum.
//! 3. **Small-prime finish**, for the final few `k` down to `1`: cheap
//!    enough to recompute directly at every breakpoint.
//!
//! [`sum_multiplicative_34`] is the simpler `O(n^(3/4))` fallback: a pure
//! DFS over rough numbers with no Fenwick tree, useful when `n` is small
//! enough that the extra complexity isn't worth it.
//!
//! # References
//! Ported line-for-line from `sum_multiplicative`, `sum_multiplicative_34`,
//! `traverse_rough_numbers`, and `calc_F_k` in the source divisor-sums
//! header — by far the most involved routine in that file.

use crate::coeff::Coeff;
use crate::error::Result;
use crate::fenwick::FenwickTree;
use crate::intmath::{icbrt, isqrt};
use crate::sqrt_map::SqrtMap;
use tracing::{debug, debug_span};

/// `f(f_pe1, p, e)`: the value of a multiplicative function at `p^e`,
/// given its value at `p^(e-1)`. `Sync` so the per-breakpoint recomputation
/// loops can be handed to `rayon` under the `parallel` feature.
pub type PrimePowerFn<'a, T> = dyn Fn(&T, i64, i64) -> T + Sync + 'a;

fn calc_f_k<T: Coeff>(p_k: i64, m: i64, id: &T, f: &PrimePowerFn<T>, f_k1: &mut dyn FnMut(i64) -> T) -> T {
    let mut s = f_k1(m);
    let mut f_pe = id.identity();
    let mut mpe = m;
    let mut e = 1i64;
    loop {
        mpe /= p_k;
        if mpe <= 0 {
            break;
        }
        f_pe = f(&f_pe, p_k, e);
        s = s + f_pe.clone() * f_k1(mpe);
        e += 1;
    }
    s
}

/// Visits every `mpe <= n` whose smallest prime factor is exactly `p_k`
/// (`pa[k-1]`, 1-indexed), calling `visitor(mpe, f(mpe))` for each.
fn traverse_rough_numbers<T: Coeff>(
    f: &PrimePowerFn<T>,
    n: i64,
    k: usize,
    pa: &[i64],
    psz: usize,
    visitor: &mut dyn FnMut(i64, T),
    m: i64,
    f_m: &T,
) {
    let p = pa[k - 1];
    let mut e = 0i64;
    let mut f_pe = f_m.identity();
    let mut npe = n;
    let mut mpe = m;
    while npe >= p {
        e += 1;
        f_pe = f(&f_pe, p, e);
        npe /= p;
        mpe *= p;
        let f_mpe = f_m.clone() * f_pe.clone();
        visitor(mpe, f_mpe.clone());
        let mut j = k + 1;
        while j <= psz && pa[j - 1] <= npe {
            traverse_rough_numbers(f, npe, j, pa, psz, visitor, mpe, &f_mpe);
            j += 1;
        }
    }
}

#[inline]
fn breakpoint_index(m: i64, q: i64, tsz: i64, n: i64) -> usize {
    if m <= q {
        m as usize
    } else {
        (tsz - n / m) as usize
    }
}

/// `F_k(m) = Sum[f(i), 1 <= i <= m, lpf(i) >= p_k]` at every breakpoint of
/// `n`, for every `k` from `pi(n^(1/3)) + 1` down to `0` (so `F_0(n)` /
/// `F_1(n)` gives the partial sum of `f` itself). `pa` must list every
/// prime up to `sqrt(n)`; `s1` must hold `Sum[f(p), prime p <= k]` at every
/// breakpoint of `n`.
///
/// `O(n^(2/3))`.
pub fn sum_multiplicative<T: Coeff>(
    s1: &SqrtMap<T>,
    f: &PrimePowerFn<T>,
    n: i64,
    pa: &[i64],
    id: &T,
) -> Result<SqrtMap<T>> {
    let span = debug_span!("sum_multiplicative", n, primes = pa.len());
    let _enter = span.enter();

    let zero = id.zero();
    let psz = pa.len();
    let q = isqrt(n);
    let c = icbrt(n);
    let d = c.max(1);
    let nd = n / d;
    let h = nd / pa[psz - 1] + 1;
    let nq = n / (q + 1);
    let tsz = q + 1 + nq;

    let mut f_prime: SqrtMap<T> = SqrtMap::new(q.max(1), n)?;
    let mut f_k1: SqrtMap<T> = SqrtMap::new(q.max(1), n)?;
    let mut f_k: SqrtMap<T> = SqrtMap::new(q.max(1), n)?;
    let mut ft: FenwickTree<T> = FenwickTree::new((tsz - d + 1).max(1) as usize, zero.clone());

    if n == 1 {
        f_k.set(1, id.identity());
        return Ok(f_k);
    }

    // step 1: build F_prime from the precomputed prime partial sums.
    for i in 1..=q {
        f_prime.set(i, s1.get(i).unwrap().clone());
        f_prime.set(n / i, s1.get(n / i).unwrap().clone());
    }

    let mut last_k;

    // step 2: F_k at k = pi(n^(1/3)) + 1, O(n^(2/3) / log n).
    let k0 = {
        let mut k = 1usize;
        while k < psz && pa[k - 1] <= c {
            k += 1;
        }
        k
    };
    {
        let p_k = pa[k0 - 1];
        let p_k2 = p_k * p_k;
        f_k.set(0, zero.clone());
        for m in 1..p_k {
            f_k.set(m, id.identity());
        }
        let b = id.identity() - f_prime.get(p_k - 1).unwrap().clone();
        let mut m = p_k;
        while m <= q {
            f_k.set(m, b.clone() + f_prime.get(m).unwrap().clone());
            m += 1;
        }
        for i in (1..=nq).rev() {
            let m = n / i;
            if m >= p_k2 {
                break;
            }
            f_k.set(m, b.clone() + f_prime.get(m).unwrap().clone());
        }
        for i in (1..=c).rev() {
            let m = n / i;
            if m < p_k2 {
                continue;
            }
            let mut s2 = zero.clone();
            let mut j = k0;
            while j <= psz && pa[j - 1] * pa[j - 1] <= m {
                let p_j = pa[j - 1];
                let f_p = f(&id.identity(), p_j, 1);
                let f_p2 = f(&f_p, p_j, 2);
                s2 = s2 + f_p2 + f_p * (f_prime.get(m / p_j).unwrap().clone() - f_prime.get(p_j).unwrap().clone());
                j += 1;
            }
            f_k.set(m, b.clone() + f_prime.get(m).unwrap().clone() + s2);
        }
        last_k = k0;
    }

    // step 3: F_k for k in [pi(h) + 1, pi(n^(1/3))], O(n^(2/3)), via Fenwick descent.
    {
        for m in 1..=q {
            let v = f_k.get(m).unwrap().clone();
            ft.add(breakpoint_index(m, q, tsz, n), v.clone());
            ft.add(breakpoint_index(m + 1, q, tsz, n), -v);
        }
        for i in ((d + 1)..=nq).rev() {
            let v = f_k.get(n / i).unwrap().clone();
            let idx = breakpoint_index(n / i, q, tsz, n);
            ft.add(idx, v.clone());
            ft.add(idx + 1, -v);
        }

        let mut k = last_k - 1;
        while k >= 1 && pa[k - 1] > h {
            let p_k = pa[k - 1];
            std::mem::swap(&mut f_k1, &mut f_k);
            {
                let get_ft_k1 = |m: i64, f_k1: &SqrtMap<T>, ft: &FenwickTree<T>| -> T {
                    if m >= nd {
                        f_k1.get(m).unwrap().clone()
                    } else {
                        ft.get_sum(breakpoint_index(m, q, tsz, n))
                    }
                };
                for i in (1..=d).rev() {
                    let m = n / i;
                    let v = calc_f_k(p_k, m, id, f, &mut |x| get_ft_k1(x, &f_k1, &ft));
                    f_k.set(m, v);
                }
            }
            {
                let mut update_ft_k = |m: i64, f_m: T| {
                    ft.add(breakpoint_index(m, q, tsz, n), f_m);
                };
                traverse_rough_numbers(f, nd - 1, k, pa, psz, &mut update_ft_k, 1, &id.identity());
            }
            last_k = k;
            if k == 1 {
                break;
            }
            k -= 1;
        }

        let get_ft_k1 = |m: i64| -> T {
            if m >= nd {
                f_k1.get(m).unwrap().clone()
            } else {
                ft.get_sum(breakpoint_index(m, q, tsz, n))
            }
        };
        for m in 0..=q {
            f_k.set(m, get_ft_k1(m));
        }
        for i in ((d + 1)..=nq).rev() {
            f_k.set(n / i, get_ft_k1(n / i));
        }
    }

    // step 4: F_k for the remaining small k, O(n^(2/3) / log n). Each
    // breakpoint's calc_f_k only reads the previous level (f_k1), so the
    // per-breakpoint recomputation below is independent and, under the
    // `parallel` feature, handed to rayon.
    debug!(last_k, q, nq, "sum_multiplicative: entering small-k finish");
    {
        let mut k = last_k.saturating_sub(1);
        while k >= 1 {
            let p_k = pa[k - 1];
            std::mem::swap(&mut f_k1, &mut f_k);

            #[cfg(feature = "parallel")]
            {
                use rayon::prelude::*;
                let small: Vec<i64> = (1..=q).collect();
                let small_vals: Vec<T> =
                    small.par_iter().map(|&m| calc_f_k(p_k, m, id, f, &mut |x| f_k1.get(x).unwrap().clone())).collect();
                for (m, v) in small.into_iter().zip(small_vals) {
                    f_k.set(m, v);
                }
                let large: Vec<i64> = (1..=nq).rev().map(|i| n / i).collect();
                let large_vals: Vec<T> =
                    large.par_iter().map(|&m| calc_f_k(p_k, m, id, f, &mut |x| f_k1.get(x).unwrap().clone())).collect();
                for (m, v) in large.into_iter().zip(large_vals) {
                    f_k.set(m, v);
                }
            }
            #[cfg(not(feature = "parallel"))]
            {
                let mut get_f_k1 = |m: i64| f_k1.get(m).unwrap().clone();
                for m in 1..=q {
                    let v = calc_f_k(p_k, m, id, f, &mut get_f_k1);
                    f_k.set(m, v);
                }
                for i in (1..=nq).rev() {
                    let m = n / i;
                    let v = calc_f_k(p_k, m, id, f, &mut get_f_k1);
                    f_k.set(m, v);
                }
            }

            if k == 1 {
                break;
            }
            k -= 1;
        }
    }

    Ok(f_k)
}

/// Simpler `O(n^(3/4))` fallback: pure DFS over `k = t * bpf(k)` classes,
/// no Fenwick tree. `pa` must list every prime up to `sqrt(n)`.
pub fn sum_multiplicative_34<T: Coeff>(s1: &SqrtMap<T>, f: &PrimePowerFn<T>, n: i64, pa: &[i64], id: &T) -> T {
    fn go<T: Coeff>(
        s1: &SqrtMap<T>,
        f: &PrimePowerFn<T>,
        n: i64,
        pa: &[i64],
        m_limit: usize,
        f_tb: &T,
        bpf_t_val: i64,
        bpf_t_exp: i64,
    ) -> T {
        let id = f_tb.identity();
        let mut ret = if bpf_t_exp > 0 { f(f_tb, bpf_t_val, bpf_t_exp + 1) } else { id.clone() };
        ret = ret
            + if bpf_t_exp > 0 {
                f_tb.clone() * (s1.get(n).unwrap().clone() - s1.get(bpf_t_val).unwrap().clone())
            } else {
                s1.get(n).unwrap().clone()
            };
        for i in 0..m_limit {
            let p = pa[i];
            let mut e = 0i64;
            let mut f_pe = id.clone();
            let mut n_next = n / p;
            let bpf_t_val_next = if bpf_t_exp > 0 { bpf_t_val } else { p };
            if n_next < bpf_t_val_next {
                break;
            }
            while n_next >= bpf_t_val_next {
                e += 1;
                f_pe = f(&f_pe, p, e);
                let f_tb_next = if bpf_t_exp > 0 { f_tb.clone() } else { f_pe.clone() };
                let bpf_t_exp_next = if bpf_t_exp > 0 { bpf_t_exp } else { e };
                let f_rec = go(s1, f, n_next, pa, i, &f_tb_next, bpf_t_val_next, bpf_t_exp_next);
                ret = ret
                    + if bpf_t_exp > 0 {
                        f_pe.clone() * f_rec
                    } else {
                        f_rec
                    };
                n_next /= p;
            }
        }
        ret
    }
    go(s1, f, n, pa, pa.len(), &id.identity(), 1, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sieve;

    /// Builds `s1`, the prime partial-sum table, for `f = constant 1`
    /// (so `F_1(n)` should recover `pi(n)`).
    fn s1_for_prime_count(n: i64, sqrt_primes: &[i64]) -> SqrtMap<i64> {
        let q = isqrt(n).max(1);
        let mut tbl = SqrtMap::new(q, n).unwrap();
        let (all_primes, _) = sieve::primes(n + 1);
        let count_le = |x: i64| all_primes.iter().take_while(|&&p| p <= x).count() as i64;
        for i in 1..=q {
            tbl.set(i, count_le(i));
            tbl.set(n / i, count_le(n / i));
        }
        tbl
    }

    #[test]
    fn sum_multiplicative_recovers_prime_pi_for_constant_one() {
        let n = 2000i64;
        let sqrt_p = sieve::primes(isqrt(n) + 1).0;
        let s1 = s1_for_prime_count(n, &sqrt_p);
        let f = |_: &i64, _: i64, _: i64| 1i64; // f(p^e) = 1 for all prime powers
        let f_k = sum_multiplicative(&s1, &f, n, &sqrt_p, &0i64).unwrap();
        let (all_primes, _) = sieve::primes(n + 1);
        assert_eq!(*f_k.get(n).unwrap(), all_primes.len() as i64);
    }

    #[test]
    fn sum_multiplicative_34_agrees_with_fenwick_version() {
        let n = 500i64;
        let sqrt_p = sieve::primes(isqrt(n) + 1).0;
        let s1 = s1_for_prime_count(n, &sqrt_p);
        let f = |_: &i64, _: i64, _: i64| 1i64;
        let a = sum_multiplicative(&s1, &f, n, &sqrt_p, &0i64).unwrap();
        let b = sum_multiplicative_34(&s1, &f, n, &sqrt_p, &0i64);
        assert_eq!(*a.get(n).unwrap(), b);
    }

    #[test]
    fn sum_multiplicative_recovers_divisor_sigma0_sum() {
        // f(p^e) = e + 1 (number of divisors), multiplicative, so F_1(n) =
        // Sum[d(k), k=1..n].
        let n = 3000i64;
        let sqrt_p = sieve::primes(isqrt(n) + 1).0;
        let q = isqrt(n).max(1);
        let mut s1: SqrtMap<i64> = SqrtMap::new(q, n).unwrap();
        for i in 1..=q {
            let (all_primes, _) = sieve::primes(n + 1);
            let count_le = |x: i64| all_primes.iter().take_while(|&&p| p <= x).count() as i64;
            s1.set(i, 2 * count_le(i)); // f(p) = 2 for every prime
            s1.set(n / i, 2 * count_le(n / i));
        }
        let f = |f_pe1: &i64, _p: i64, e: i64| if e == 1 { 2i64 } else { f_pe1 + 1 };
        let f_k = sum_multiplicative(&s1, &f, n, &sqrt_p, &0i64).unwrap();
        let ds0 = sieve::divisor_sigma0((n + 1).max(2));
        let expected: i64 = ds0[1..=n as usize].iter().sum();
        assert_eq!(*f_k.get(n).unwrap(), expected);
    }
}
