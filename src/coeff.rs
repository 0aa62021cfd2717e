//! # Coeff — Abstract Coefficient Ring (C1)
//!
//! Every sieve, convolution, and sublinear summation in this crate is
//! parametrised over a coefficient type `T`: a commutative ring with
//! multiplicative identity. Rather than detecting structure at runtime, each
//! concrete `T` implements [`Coeff`] once, and the seed-threading convention
//! from the design notes — `zero(x)`/`identity(x)` take a same-ring value and
//! return the additive/multiplicative identity *in that ring* — lets modulus
//! or similar context travel as an ordinary value instead of living in a
//! global.
//!
//! Three implementations ship with the crate: plain `i64` (the ring `Z`,
//! division only succeeds for unit divisors `±1`), [`Modulo`] (`Z/mZ` with `m`
//! carried per-value, division via the extended Euclidean algorithm), and
//! `num_rational::Ratio<i64>` (the field `Q`, division always succeeds except
//! by zero).

use crate::error::{KernelError, Result};
use num_rational::Ratio;
use std::ops::{Add, Mul, Neg, Sub};

/// Abstract ring/field operations required by the kernel's algorithms.
///
/// `zero`/`identity` are methods on `&self` rather than associated functions
/// so that context (e.g. a modulus) can be inherited from an existing value,
/// per the design notes: "the library passes a seed `id` through recursion so
/// that modulus/context is inherited; no global context is assumed."
///
/// `Send + Sync` so [`crate::sum_multiplicative`]'s per-breakpoint
/// recomputation can be handed to `rayon` under the `parallel` feature; every
/// concrete type below is a plain value type, so this costs nothing.
pub trait Coeff:
    Clone
    + PartialEq
    + std::fmt::Debug
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// Additive identity in the same ring as `self`.
    fn zero(&self) -> Self;

    /// Multiplicative identity in the same ring as `self`.
    fn identity(&self) -> Self;

    /// Casts an integer into this ring, inheriting `self`'s context.
    fn cast_i64(&self, n: i64) -> Self;

    /// Casts another value of the same concrete type into this ring, a
    /// no-op except for context/modulus inheritance.
    fn cast_ctx(&self, other: &Self) -> Self {
        let _ = other;
        self.clone()
    }

    /// Checked division: fails with [`KernelError::Invertibility`] if `self`
    /// has no multiplicative inverse with respect to `rhs`, or `rhs` is zero.
    fn checked_div(&self, rhs: &Self) -> Result<Self>;

    /// Repeated-squaring exponentiation, `self^e` for `e >= 0`.
    fn pow(&self, mut e: i64) -> Self {
        debug_assert!(e >= 0, "Coeff::pow requires a non-negative exponent");
        let mut base = self.clone();
        let mut acc = self.identity();
        while e > 0 {
            if e & 1 == 1 {
                acc = acc * base.clone();
            }
            base = base.clone() * base;
            e >>= 1;
        }
        acc
    }
}

impl Coeff for i64 {
    fn zero(&self) -> Self {
        0
    }
    fn identity(&self) -> Self {
        1
    }
    fn cast_i64(&self, n: i64) -> Self {
        n
    }
    fn checked_div(&self, rhs: &Self) -> Result<Self> {
        if *rhs == 0 {
            return Err(KernelError::Invertibility { at: "i64 division by zero".into() });
        }
        if *rhs != 1 && *rhs != -1 {
            return Err(KernelError::Invertibility {
                at: format!("{rhs} is not a unit of Z"),
            });
        }
        Ok(self / rhs)
    }
}

impl Coeff for i128 {
    fn zero(&self) -> Self {
        0
    }
    fn identity(&self) -> Self {
        1
    }
    fn cast_i64(&self, n: i64) -> Self {
        n as i128
    }
    fn checked_div(&self, rhs: &Self) -> Result<Self> {
        if *rhs == 0 {
            return Err(KernelError::Invertibility { at: "i128 division by zero".into() });
        }
        if *rhs != 1 && *rhs != -1 {
            return Err(KernelError::Invertibility {
                at: format!("{rhs} is not a unit of Z"),
            });
        }
        Ok(self / rhs)
    }
}

/// An element of `Z/mZ`, carrying its own modulus so that no global context
/// is ever required (per the design notes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Modulo {
    pub value: i64,
    pub modulus: i64,
}

impl Modulo {
    pub fn new(value: i64, modulus: i64) -> Self {
        let v = value.rem_euclid(modulus);
        Modulo { value: v, modulus }
    }

    /// Extended Euclidean algorithm; returns `(gcd, x, y)` with `a*x + b*y = gcd`.
    fn ext_gcd(a: i64, b: i64) -> (i64, i64, i64) {
        if b == 0 {
            (a, 1, 0)
        } else {
            let (g, x1, y1) = Self::ext_gcd(b, a % b);
            (g, y1, x1 - (a / b) * y1)
        }
    }

    pub fn inverse(&self) -> Result<Self> {
        let (g, x, _) = Self::ext_gcd(self.value, self.modulus);
        if g != 1 && g != -1 {
            return Err(KernelError::Invertibility {
                at: format!("{} has no inverse mod {}", self.value, self.modulus),
            });
        }
        Ok(Modulo::new(x, self.modulus))
    }
}

impl Add for Modulo {
    type Output = Modulo;
    fn add(self, rhs: Modulo) -> Modulo {
        Modulo::new(self.value + rhs.value, self.modulus)
    }
}
impl Sub for Modulo {
    type Output = Modulo;
    fn sub(self, rhs: Modulo) -> Modulo {
        Modulo::new(self.value - rhs.value, self.modulus)
    }
}
impl Mul for Modulo {
    type Output = Modulo;
    fn mul(self, rhs: Modulo) -> Modulo {
        Modulo::new(self.value * rhs.value, self.modulus)
    }
}
impl Neg for Modulo {
    type Output = Modulo;
    fn neg(self) -> Modulo {
        Modulo::new(-self.value, self.modulus)
    }
}

impl Coeff for Modulo {
    fn zero(&self) -> Self {
        Modulo::new(0, self.modulus)
    }
    fn identity(&self) -> Self {
        Modulo::new(1, self.modulus)
    }
    fn cast_i64(&self, n: i64) -> Self {
        Modulo::new(n, self.modulus)
    }
    fn checked_div(&self, rhs: &Self) -> Result<Self> {
        debug_assert_eq!(self.modulus, rhs.modulus, "Modulo operands must share a modulus");
        Ok(*self * rhs.inverse()?)
    }
}

impl Coeff for Ratio<i64> {
    fn zero(&self) -> Self {
        Ratio::from_integer(0)
    }
    fn identity(&self) -> Self {
        Ratio::from_integer(1)
    }
    fn cast_i64(&self, n: i64) -> Self {
        Ratio::from_integer(n)
    }
    fn checked_div(&self, rhs: &Self) -> Result<Self> {
        if rhs.numer() == &0 {
            return Err(KernelError::Invertibility { at: "division by zero in Q".into() });
        }
        Ok(self / rhs)
    }
}
