//! # Polynom — Dense Polynomials Over a Coefficient Ring (C-support for C11)
//!
//! A small dense polynomial type used by `sum_phi_D_L`/`sum_g_L` (§4.11) to
//! build and discretely-integrate the generating polynomial behind
//! `phi_D(n) = n^D * phi(n) / D!`-style sums. [`polynom_sum`] is the
//! classic Faulhaber's-formula discrete integral, `s(n) = Sum[p(k), k=1..n]`,
//! computed from the Bernoulli numbers rather than by summing term by term.
//!
//! # References
//! Ported from `polynom_sum`/`bernoulli_b` in the source polynomial-algorithm
//! header; the dense representation itself mirrors the structural
//! `polynom<T>` type it operates on there.

use crate::coeff::Coeff;
use crate::error::Result;

/// Dense polynomial, coefficients ordered low-to-high degree.
#[derive(Clone, Debug)]
pub struct Polynom<T> {
    coeffs: Vec<T>,
    zero: T,
}

impl<T: Coeff> Polynom<T> {
    /// The zero polynomial, in the ring of `zero`.
    pub fn zero(zero: T) -> Self {
        Polynom { coeffs: Vec::new(), zero }
    }

    /// Builds a polynomial from explicit coefficients (low-to-high degree).
    pub fn from_coeffs(coeffs: Vec<T>, zero: T) -> Self {
        Polynom { coeffs, zero }
    }

    /// Degree, or `-1` for the zero polynomial.
    pub fn deg(&self) -> i64 {
        self.coeffs.len() as i64 - 1
    }

    /// Coefficient of `x^i`, `zero` if `i` is out of range.
    pub fn get(&self, i: i64) -> T {
        if i < 0 {
            return self.zero.clone();
        }
        self.coeffs.get(i as usize).cloned().unwrap_or_else(|| self.zero.clone())
    }

    /// Sets the coefficient of `x^i`, growing the backing vector if needed.
    pub fn set(&mut self, i: i64, v: T) {
        let i = i as usize;
        if i >= self.coeffs.len() {
            self.coeffs.resize(i + 1, self.zero.clone());
        }
        self.coeffs[i] = v;
    }

    /// Adds `v` to the coefficient of `x^i`.
    pub fn add_at(&mut self, i: i64, v: T) {
        let cur = self.get(i);
        self.set(i, cur + v);
    }

    /// Evaluates the polynomial at `x` via Horner's method.
    pub fn eval(&self, x: &T) -> T {
        let mut acc = self.zero.clone();
        for c in self.coeffs.iter().rev() {
            acc = acc * x.clone() + c.clone();
        }
        acc
    }

    /// Polynomial addition.
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut out = Polynom::zero(self.zero.clone());
        for i in 0..len {
            out.set(i as i64, self.get(i as i64) + other.get(i as i64));
        }
        out
    }

    /// Polynomial multiplication (discrete convolution of coefficients).
    pub fn mul(&self, other: &Self) -> Self {
        if self.coeffs.is_empty() || other.coeffs.is_empty() {
            return Polynom::zero(self.zero.clone());
        }
        let mut out = Polynom::zero(self.zero.clone());
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                out.add_at((i + j) as i64, a.clone() * b.clone());
            }
        }
        out
    }

    /// Scales every coefficient by `s`.
    pub fn scale(&self, s: &T) -> Self {
        Polynom {
            coeffs: self.coeffs.iter().map(|c| c.clone() * s.clone()).collect(),
            zero: self.zero.clone(),
        }
    }

    /// Divides every coefficient by `s`, failing if `s` is not invertible.
    pub fn div_scalar(&self, s: &T) -> Result<Self> {
        let coeffs = self
            .coeffs
            .iter()
            .map(|c| c.checked_div(s))
            .collect::<Result<Vec<_>>>()?;
        Ok(Polynom { coeffs, zero: self.zero.clone() })
    }
}

/// Bernoulli numbers `B_0 .. B_deg` (first convention, `B_1 = -1/2`), via
/// the standard recurrence `B_m = -1/(m+1) Sum[C(m+1,k) B_k, k=0..m-1]`.
pub fn bernoulli_b<T: Coeff>(deg: i64, id: &T) -> Result<Vec<T>> {
    let deg = deg.max(0) as usize;
    let mut b = vec![id.identity()];
    for m in 1..=deg {
        let mut binom = vec![0i64; m + 2];
        // C(m+1, k) for k in 0..=m, via Pascal's triangle on the fly.
        binom[0] = 1;
        for row in 1..=m + 1 {
            for k in (1..=row).rev() {
                binom[k] += binom[k - 1];
            }
        }
        let mut sum = id.zero();
        for (k, bk) in b.iter().enumerate() {
            sum = sum + id.cast_i64(binom[k]) * bk.clone();
        }
        let denom = id.cast_i64(m as i64 + 1);
        b.push((id.zero() - sum).checked_div(&denom)?);
    }
    Ok(b)
}

/// Discrete integral of `p`: the polynomial `s` such that `s(n) =
/// Sum[p(k), k=1..n]` for every integer `n`.
pub fn polynom_sum<T: Coeff>(p: &Polynom<T>, id: &T) -> Result<Polynom<T>> {
    let mut s = Polynom::zero(id.zero());
    if p.deg() < 0 {
        return Ok(s);
    }
    let b = bernoulli_b(p.deg(), id)?;
    for m in (0..=p.deg()).rev() {
        let pm = p.get(m);
        if pm == id.zero() {
            continue;
        }
        let mut c = pm.checked_div(&id.cast_i64(m + 1))?;
        for k in 0..=m {
            let term = c.clone() * b[k as usize].clone();
            s.add_at(m + 1 - k, term);
            c = c * id.cast_i64(m + 1 - k);
            c = c.checked_div(&id.cast_i64(k + 1))?;
        }
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_rational::Ratio;

    fn r(n: i64) -> Ratio<i64> {
        Ratio::from_integer(n)
    }

    #[test]
    fn bernoulli_numbers_match_known_values() {
        let id = r(1);
        let b = bernoulli_b(4, &id).unwrap();
        assert_eq!(b[0], r(1));
        assert_eq!(b[1], Ratio::new(-1, 2));
        assert_eq!(b[2], Ratio::new(1, 6));
        assert_eq!(b[3], r(0));
        assert_eq!(b[4], Ratio::new(-1, 30));
    }

    #[test]
    fn polynom_sum_of_identity_is_triangular_numbers() {
        let id = r(1);
        // p(x) = x
        let p = Polynom::from_coeffs(vec![r(0), r(1)], r(0));
        let s = polynom_sum(&p, &id).unwrap();
        for n in 1..20i64 {
            assert_eq!(s.eval(&r(n)), r(n * (n + 1) / 2), "mismatch at n={n}");
        }
    }

    #[test]
    fn polynom_sum_of_square_matches_closed_form() {
        let id = r(1);
        // p(x) = x^2
        let p = Polynom::from_coeffs(vec![r(0), r(0), r(1)], r(0));
        let s = polynom_sum(&p, &id).unwrap();
        for n in 1..20i64 {
            let expected = Ratio::new(n * (n + 1) * (2 * n + 1), 6);
            assert_eq!(s.eval(&r(n)), expected, "mismatch at n={n}");
        }
    }

    #[test]
    fn eval_and_mul_agree_with_direct_computation() {
        let zero = r(0);
        let a = Polynom::from_coeffs(vec![r(1), r(2)], zero.clone()); // 1 + 2x
        let b = Polynom::from_coeffs(vec![r(3), r(1)], zero); // 3 + x
        let prod = a.mul(&b); // 3 + 7x + 2x^2
        assert_eq!(prod.eval(&r(2)), r(3 + 14 + 8));
    }
}
