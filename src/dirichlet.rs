//! # Dirichlet — Convolution, Division, Inverse (C6)
//!
//! Three families of routines for Dirichlet convolution `h = f * g` (defined
//! by `h(n) = Sum[f(n/d) g(d), d|n]`), division `h = f * g^-1`, and inverse
//! `f * f_inv = e`, each in three complexity variants depending on what's
//! known about `h`:
//!
//! - generic, `O(n log n)`: no structural assumption beyond `g(1)` being
//!   invertible.
//! - multiplicative, `O(n log log n)`: valid when `h` is multiplicative —
//!   computed once per prime power then propagated with [`calc_multiplicative`].
//! - completely multiplicative, `O(n)`: valid when `h` is completely
//!   multiplicative — computed once per prime then propagated with
//!   [`calc_completely_multiplicative`].
//!
//! Only `h` needs the stated structure; `f` and `g` may be arbitrary. The
//! Möbius transform (`g(n) = Sum[mu(n/d) f(d), d|n]`) is division by the
//! constant function `1`, provided here as a thin wrapper per variant.
//!
//! # References
//! Ported from the Dirichlet-convolution family in the source divisor-sums
//! library (generic/multiplicative/completely-multiplicative convolution,
//! division, inverse, and `calc_multiplicative`/`calc_completely_multiplicative`).

use crate::coeff::Coeff;

/// `h[n] = Sum[f(n/d) g(d), d|n]` for `n` in `[0, n)`. `O(n log n)`.
pub fn dirichlet_convolution<T: Coeff>(f: impl Fn(i64) -> T, g: impl Fn(i64) -> T, n: i64, id: &T) -> Vec<T> {
    let n = n as usize;
    let e0 = id.zero();
    let mut h = vec![e0.clone(); n];
    for d in 1..n {
        let fd = id.cast_ctx(&f(d as i64));
        let mut e = 1i64;
        let mut i = d;
        while i < n {
            h[i] = h[i].clone() + fd.clone() * id.cast_ctx(&g(e));
            i += d;
            e += 1;
        }
    }
    h
}

/// `h` such that `h = f * g^-1`, for `n` in `[0, n)`. Requires `g(1)` to be
/// invertible. `O(n log n)`.
pub fn dirichlet_division<T: Coeff>(f: impl Fn(i64) -> T, g: impl Fn(i64) -> T, n: i64, id: &T) -> crate::error::Result<Vec<T>> {
    let n = n as usize;
    let e1 = id.identity();
    let g1 = id.cast_ctx(&g(1));
    let ig1 = e1.checked_div(&g1)?;
    let mut h = vec![e1.clone(); n];
    for (i, slot) in h.iter_mut().enumerate().skip(1) {
        *slot = id.cast_ctx(&f(i as i64));
    }
    for d in 1..n {
        h[d] = h[d].clone() * ig1.clone();
        let mut j = 2i64;
        let mut i = d * 2;
        while i < n {
            let delta = id.cast_ctx(&g(j)) * h[d].clone();
            h[i] = h[i].clone() - delta;
            i += d;
            j += 1;
        }
    }
    Ok(h)
}

/// `f_inv` such that `f * f_inv = e` (the Dirichlet unit), for `n` in
/// `[0, n)`. Requires `f(1)` invertible. `O(n log n)`.
pub fn dirichlet_inverse<T: Coeff>(f: impl Fn(i64) -> T, n: i64, id: &T) -> crate::error::Result<Vec<T>> {
    let e1 = id.identity();
    let e0 = id.zero();
    let e = move |k: i64| if k == 1 { e1.clone() } else { e0.clone() };
    dirichlet_division(e, f, n, id)
}

/// Möbius transform `g(n) = Sum[mu(n/d) f(d), d|n]`, `O(n log n)`.
pub fn moebius_transform<T: Coeff>(f: impl Fn(i64) -> T, n: i64, id: &T) -> crate::error::Result<Vec<T>> {
    let e1 = id.identity();
    dirichlet_division(f, move |_| e1.clone(), n, id)
}

/// Propagates values at prime powers of a multiplicative function `f` to
/// every `i` in `[0, n)`. `f[q]` must already hold the correct value for
/// every prime power `q`, and `1` elsewhere. `O(n log log n)`.
pub fn calc_multiplicative<T: Coeff>(f: &mut [T], n: i64, pa: &[i64]) {
    let n = n as usize;
    for &p in pa {
        if p >= n as i64 {
            break;
        }
        let mut qq = p;
        while (qq as usize) < n {
            let q = qq as usize;
            let mut l = 2i64;
            let mut m = 2 * q;
            while m < n {
                if l % p != 0 {
                    f[m] = f[m].clone() * f[q].clone();
                }
                m += q;
                l += 1;
            }
            qq *= p;
        }
    }
}

/// `h = f * g`, assuming `h` is multiplicative. `O(n log log n)`.
pub fn dirichlet_convolution_multiplicative<T: Coeff>(
    f: impl Fn(i64) -> T,
    g: impl Fn(i64) -> T,
    n: i64,
    pa: &[i64],
    id: &T,
) -> Vec<T> {
    let nu = n as usize;
    let e1 = id.identity();
    let e0 = id.zero();
    let mut h = vec![e1.clone(); nu];
    for &p in pa {
        if p >= n {
            break;
        }
        let mut q = Vec::new();
        let mut fq = Vec::new();
        let mut gq = Vec::new();
        let mut qq = 1i64;
        while qq < n {
            fq.push(id.cast_ctx(&f(qq)));
            gq.push(id.cast_ctx(&g(qq)));
            q.push(qq);
            qq *= p;
        }
        for k in 0..q.len() {
            let mut hq_k = e0.clone();
            for j in 0..=k {
                hq_k = hq_k + fq[k - j].clone() * gq[j].clone();
            }
            h[q[k] as usize] = hq_k;
        }
    }
    calc_multiplicative(&mut h, n, pa);
    h
}

/// `h = f * g^-1`, assuming `h` is multiplicative. `O(n log log n)`.
pub fn dirichlet_division_multiplicative<T: Coeff>(
    f: impl Fn(i64) -> T,
    g: impl Fn(i64) -> T,
    n: i64,
    pa: &[i64],
    id: &T,
) -> Vec<T> {
    let nu = n as usize;
    let e1 = id.identity();
    let mut h = vec![e1.clone(); nu];
    for &p in pa {
        if p >= n {
            break;
        }
        let mut q = Vec::new();
        let mut gq = Vec::new();
        let mut qq = 1i64;
        while qq < n {
            gq.push(id.cast_ctx(&g(qq)));
            q.push(qq);
            qq *= p;
        }
        let mut hq = vec![e1.clone(); q.len()];
        for k in 1..q.len() {
            let mut v = id.cast_ctx(&f(q[k]));
            for j in 0..k {
                v = v - gq[k - j].clone() * hq[j].clone();
            }
            hq[k] = v.clone();
            h[q[k] as usize] = v;
        }
    }
    calc_multiplicative(&mut h, n, pa);
    h
}

/// `f_inv` such that `f * f_inv = e`, assuming `f_inv` is multiplicative.
/// `O(n log log n)`.
pub fn dirichlet_inverse_multiplicative<T: Coeff>(f: impl Fn(i64) -> T, n: i64, pa: &[i64], id: &T) -> Vec<T> {
    let e1 = id.identity();
    let e0 = id.zero();
    let e = move |k: i64| if k == 1 { e1.clone() } else { e0.clone() };
    dirichlet_division_multiplicative(e, f, n, pa, id)
}

/// Möbius transform of `f`, assuming the result is multiplicative.
/// `O(n log log n)`.
pub fn moebius_transform_multiplicative<T: Coeff>(f: impl Fn(i64) -> T, n: i64, pa: &[i64], id: &T) -> Vec<T> {
    let e1 = id.identity();
    dirichlet_division_multiplicative(f, move |_| e1.clone(), n, pa, id)
}

/// Propagates values at primes of a completely multiplicative function `f`
/// to every `i` in `[0, n)`, given a biggest-prime-factor table `pf`. `O(n)`.
pub fn calc_completely_multiplicative<T: Coeff>(f: &mut [T], n: i64, pf: &[i64]) {
    let n = n as usize;
    for i in 2..n {
        let p = pf[i] as usize;
        if p != i {
            f[i] = f[i / p].clone() * f[p].clone();
        }
    }
}

/// `h = f * g`, assuming `h` is completely multiplicative. `O(n)`.
pub fn dirichlet_convolution_completely_multiplicative<T: Coeff>(
    f: impl Fn(i64) -> T,
    g: impl Fn(i64) -> T,
    n: i64,
    pf: &[i64],
    id: &T,
) -> Vec<T> {
    let nu = n as usize;
    let e1 = id.identity();
    let f1 = id.cast_ctx(&f(1));
    let g1 = id.cast_ctx(&g(1));
    let mut h = vec![e1; nu];
    for p in 2..n {
        if pf[p as usize] == p {
            h[p as usize] = id.cast_ctx(&f(p)) * g1.clone() + id.cast_ctx(&g(p)) * f1.clone();
        }
    }
    calc_completely_multiplicative(&mut h, n, pf);
    h
}

/// `h = f * g^-1`, assuming `h` is completely multiplicative. `O(n)`.
pub fn dirichlet_division_completely_multiplicative<T: Coeff>(
    f: impl Fn(i64) -> T,
    g: impl Fn(i64) -> T,
    n: i64,
    pf: &[i64],
    id: &T,
) -> Vec<T> {
    let nu = n as usize;
    let e1 = id.identity();
    let mut h = vec![e1; nu];
    for p in 2..n {
        if pf[p as usize] == p {
            h[p as usize] = id.cast_ctx(&f(p)) - id.cast_ctx(&g(p));
        }
    }
    calc_completely_multiplicative(&mut h, n, pf);
    h
}

/// `f_inv` such that `f * f_inv = e`, assuming `f_inv` is completely
/// multiplicative. `O(n)`.
pub fn dirichlet_inverse_completely_multiplicative<T: Coeff>(f: impl Fn(i64) -> T, n: i64, pf: &[i64], id: &T) -> Vec<T> {
    let e1 = id.identity();
    let e0 = id.zero();
    let e = move |k: i64| if k == 1 { e1.clone() } else { e0.clone() };
    dirichlet_division_completely_multiplicative(e, f, n, pf, id)
}

/// Möbius transform of `f`, assuming the result is completely multiplicative.
/// `O(n)`.
pub fn moebius_transform_completely_multiplicative<T: Coeff>(f: impl Fn(i64) -> T, n: i64, pf: &[i64], id: &T) -> Vec<T> {
    let e1 = id.identity();
    dirichlet_division_completely_multiplicative(f, move |_| e1.clone(), n, pf, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sieve;

    #[test]
    fn convolution_of_ones_is_divisor_count() {
        let n = 30;
        let h = dirichlet_convolution(|_| 1i64, |_| 1i64, n, &0i64);
        let ds0 = sieve::divisor_sigma0(n);
        assert_eq!(&h[1..n as usize], &ds0[1..n as usize]);
    }

    #[test]
    fn division_recovers_phi_from_id_and_ones() {
        // phi = Id * mu = Id / 1
        let n = 30;
        let h = dirichlet_division(|k| k, |_| 1i64, n, &0i64).unwrap();
        let (p, _) = sieve::primes(n);
        let phi = sieve::euler_phi(n, &p);
        assert_eq!(&h[1..n as usize], &phi[1..n as usize]);
    }

    #[test]
    fn moebius_transform_of_id_is_phi() {
        let n = 30;
        let g = moebius_transform(|k| k, n, &0i64).unwrap();
        let (p, _) = sieve::primes(n);
        let phi = sieve::euler_phi(n, &p);
        assert_eq!(&g[1..n as usize], &phi[1..n as usize]);
    }

    #[test]
    fn multiplicative_convolution_matches_generic() {
        let n = 40;
        let (p, _) = sieve::primes(n);
        let generic = dirichlet_convolution(|_| 1i64, |k| k, n, &0i64);
        let fast = dirichlet_convolution_multiplicative(|_| 1i64, |k| k, n, &p, &0i64);
        assert_eq!(&generic[1..n as usize], &fast[1..n as usize]);
    }

    #[test]
    fn completely_multiplicative_convolution_matches_generic() {
        let n = 40;
        let (p, _) = sieve::primes(n);
        let pf = sieve::factor(n, &p);
        // f = mu, g = sigma1, h = Id (completely multiplicative)
        let mu = sieve::moebius_mu(n, &p);
        let sigma1 = sieve::divisor_sigma1(n);
        let mu_fn = mu.clone();
        let sigma_fn = sigma1.clone();
        let h = dirichlet_convolution_completely_multiplicative(
            move |k| mu_fn[k as usize],
            move |k| sigma_fn[k as usize],
            n,
            &pf,
            &0i64,
        );
        for i in 1..n {
            assert_eq!(h[i as usize], i, "mismatch at {i}");
        }
    }

    #[test]
    fn inverse_of_convolution_is_identity() {
        let n = 30;
        let f_inv = dirichlet_inverse(|k| if k == 1 { 1i64 } else { 2 }, n, &0i64).unwrap();
        let f = |k: i64| if k == 1 { 1i64 } else { 2 };
        let h = dirichlet_convolution(f, move |k| f_inv[k as usize], n, &0i64);
        assert_eq!(h[1], 1);
        for i in 2..n as usize {
            assert_eq!(h[i], 0, "mismatch at {i}");
        }
    }
}
