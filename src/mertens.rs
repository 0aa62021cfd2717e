//! # Mertens — Mertens Function Family and Totient-Power Sums (C11)
//!
//! Dense (`sieve_*`) and sublinear (direct-evaluation) routines for the
//! Mertens function `M(n) = Sum[mu(k), k=1..n]` and its restriction to odd
//! and even `k`, all three solved from the identity `Sum[M(n/k), k=1..n] = 1`
//! via [`crate::sieve_m`]/[`crate::sum_m`] rather than by summing `mu`
//! directly.
//!
//! [`sum_phi_d_l`]/[`sum_g_l`] generalize this to `Sum[n^L phi_D(n)]`-style
//! sums for an arbitrary generating polynomial `g`, built and discretely
//! integrated with [`crate::polynom`]; [`sum_phi`] is the `phi`-specific fast
//! path that skips the polynomial machinery entirely.
//!
//! # References
//! Ported from `mertens`/`mertens_odd`/`mertens_even`,
//! `sieve_mertens`/`sieve_mertens_odd`/`sieve_mertens_even_odd`, `sum_g_L`,
//! `sum_phi_D_L`, and `sum_phi` in the source divisor-sums header.

use crate::coeff::Coeff;
use crate::dirichlet;
use crate::error::Result;
use crate::intmath::{icbrt, isq, isqrt};
use crate::polynom::{polynom_sum, Polynom};
use crate::prime_counting::prime_pi_sqrt_map;
use crate::sieve_m::{sieve_m, sieve_m_weighted};
use crate::sqrt_map::SqrtMap;
use crate::sum_m::{sum_m, sum_m_weighted};
use crate::sum_multiplicative::sum_multiplicative;

fn odd_indicator<T: Coeff>(id: &T) -> impl Fn(i64) -> T + '_ {
    move |k: i64| if k % 2 != 0 { id.identity() } else { id.zero() }
}

/// Dense `M(n) = Sum[mu(k), k=1..n]` for every `n` in `[0, n)`. `O(n log n)`.
pub fn sieve_mertens<T: Coeff>(n: i64, id: &T) -> Vec<T> {
    sieve_m(|_| id.identity(), n, id)
}

/// Dense `M1(n) = Sum[mu(k), k=1..n, k odd]` for every `n` in `[0, n)`.
/// `O(n log n)`.
pub fn sieve_mertens_odd<T: Coeff>(n: i64, id: &T) -> Result<Vec<T>> {
    sieve_m_weighted(|_| id.identity(), odd_indicator(id), n, id)
}

/// Dense `M0(n) = Sum[mu(k), k=1..n, k even]` for every `n` in `[0, n)`.
/// `O(n log n)`.
pub fn sieve_mertens_even<T: Coeff>(n: i64, id: &T) -> Result<Vec<T>> {
    let t = |k: i64| if k > 1 { -id.identity() } else { id.zero() };
    sieve_m_weighted(t, odd_indicator(id), n, id)
}

/// Both [`sieve_mertens_even`] and [`sieve_mertens_odd`] at once, sharing
/// the single full-Mertens sieve between them (`even = full - odd`).
pub fn sieve_mertens_even_odd<T: Coeff>(n: i64, id: &T) -> Result<(Vec<T>, Vec<T>)> {
    let odd = sieve_mertens_odd(n, id)?;
    let mut even = sieve_mertens(n, id);
    for (e, o) in even.iter_mut().zip(odd.iter()) {
        *e = e.clone() - o.clone();
    }
    Ok((even, odd))
}

/// `M(n) = Sum[mu(k), k=1..n]`, via `sum_multiplicative` run on `f(p) = -1`,
/// `f(p^e) = 0` for `e > 1` (the Möbius function restricted to prime powers).
/// `pa` must list every prime `<= sqrt(n)`. `O(n^(2/3))`, faster than the
/// `sum_m`-based [`mertens_slow`].
pub fn mertens<T: Coeff>(n: i64, pa: &[i64], id: &T) -> Result<T> {
    if n < 1 {
        return Ok(id.zero());
    }
    let q = isqrt(n).max(1);
    let pi = prime_pi_sqrt_map(n, pa)?;
    let mut s1: SqrtMap<T> = SqrtMap::new(q, n)?;
    for i in 1..=q {
        s1.set(i, -id.cast_i64(*pi.get(i).unwrap()));
        s1.set(n / i, -id.cast_i64(*pi.get(n / i).unwrap()));
    }
    let f = |_f_pe1: &T, _p: i64, e: i64| if e > 1 { id.zero() } else { -id.identity() };
    Ok(sum_multiplicative(&s1, &f, n, pa, id)?.get(n).unwrap().clone())
}

/// `M(n) = Sum[mu(k), k=1..n]`, without sieving a dense table, via the
/// plain `sum_m`-over-`t≡1` identity. `O(n^(3/4))` — kept as a correctness
/// oracle for [`mertens`], which is asymptotically faster.
pub fn mertens_slow<T: Coeff>(n: i64, tbl: &mut SqrtMap<T>, id: &T) -> T {
    sum_m(&|_| id.identity(), n, tbl, id)
}

/// `M1(n) = Sum[mu(k), k=1..n, k odd]`, without sieving a dense table.
pub fn mertens_odd<T: Coeff>(n: i64, tbl: &mut SqrtMap<T>, id: &T) -> Result<T> {
    let t = |_: i64| id.identity();
    let s = |k: i64| id.cast_i64((k + 1) / 2);
    sum_m_weighted(&t, &s, n, tbl, id)
}

/// `M0(n) = Sum[mu(k), k=1..n, k even]`, without sieving a dense table.
pub fn mertens_even<T: Coeff>(n: i64, tbl: &mut SqrtMap<T>, id: &T) -> Result<T> {
    let t = |k: i64| if k > 1 { -id.identity() } else { id.zero() };
    let s = |k: i64| id.cast_i64((k + 1) / 2);
    sum_m_weighted(&t, &s, n, tbl, id)
}

/// Evaluates `Sum[k^L g(k), k=1..n]` for every `n` in `vn`, where `g` is
/// itself the Möbius transform of a polynomial whose discrete integral is
/// known in closed form (Faulhaber's formula). `U` bounds the preprocessed
/// prefix region; pass `0` to pick a default of `(n^(1/3))^2`.
pub fn sum_g_l<T: Coeff>(g: &Polynom<T>, l: i64, vn: &[i64], u: i64, id: &T) -> Result<Vec<T>> {
    let mut p_poly = Polynom::zero(id.zero());
    p_poly.set(l, id.identity());
    let s_poly = polynom_sum(&p_poly, id)?;
    let t_poly = polynom_sum(&p_poly.mul(g), id)?;

    let n_max = *vn.iter().max().expect("sum_g_l requires at least one query point");
    let u = if u <= 0 { isq(icbrt(n_max)).max(1) } else { u };

    let phi_d = dirichlet::moebius_transform(|k| g.eval(&id.cast_i64(k)), u, id)?;
    let mut mm: SqrtMap<T> = SqrtMap::new(u, n_max)?;
    mm.set(0, id.zero());
    for k in 1..u {
        let weight = p_poly.eval(&id.cast_i64(k));
        let prev = mm.get(k - 1).unwrap().clone();
        mm.set(k, prev + weight * phi_d[k as usize].clone());
    }

    let t_fn = |k: i64| t_poly.eval(&id.cast_i64(k));
    let s_fn = |k: i64| s_poly.eval(&id.cast_i64(k));
    let mut out = Vec::with_capacity(vn.len());
    for &k in vn {
        mm.reset_max(k);
        out.push(sum_m_weighted(&t_fn, &s_fn, k, &mut mm, id)?);
    }
    Ok(out)
}

/// `Sum[k^L phi_D(k), k=1..n]` for every `n` in `vn`, where `phi_D` is the
/// `D`-th Jordan totient (`phi_D = mu * Id^D`).
pub fn sum_phi_d_l<T: Coeff>(d: i64, l: i64, vn: &[i64], u: i64, id: &T) -> Result<Vec<T>> {
    let mut g = Polynom::from_coeffs(vec![id.identity()], id.zero());
    for i in 0..d {
        let lin = Polynom::from_coeffs(vec![id.cast_i64(i), id.identity()], id.zero());
        let lin = lin.div_scalar(&id.cast_i64(i + 1))?;
        g = g.mul(&lin);
    }
    sum_g_l(&g, l, vn, u, id)
}

/// [`sum_phi_d_l`] for a single query point.
pub fn sum_phi_d_l_one<T: Coeff>(d: i64, l: i64, n: i64, u: i64, id: &T) -> Result<T> {
    Ok(sum_phi_d_l(d, l, &[n], u, id)?.pop().unwrap())
}

/// `phi`-specific fast path: `PhiSum(k) = Sum[phi(j), j=1..k]` at every
/// breakpoint of `n`, via the Möbius-transform-of-identity recurrence
/// instead of the general polynomial machinery.
pub fn sum_phi<T: Coeff>(n: i64, id: &T) -> Result<SqrtMap<T>> {
    let idn = |k: i64| id.cast_i64(k);
    let tri = |k: i64| id.cast_i64(if k % 2 == 0 { (k / 2) * (k + 1) } else { k * ((k + 1) / 2) });
    let u = isq(icbrt(n)).max(1);
    let mut mm: SqrtMap<T> = SqrtMap::new(u, n)?;
    mm.set(0, id.zero());
    let phi_dense = dirichlet::moebius_transform(idn, u, id)?;
    for k in 1..u {
        let prev = mm.get(k - 1).unwrap().clone();
        mm.set(k, prev + phi_dense[k as usize].clone());
    }
    let _ = sum_m(&tri, n, &mut mm, id);
    Ok(mm)
}
