//! # Intmath — Integer Helpers
//!
//! Small pure functions shared by every sublinear routine in the crate:
//! integer square/cube roots, the squaring/cubing shorthands used throughout
//! the breakpoint arithmetic, `gcd`, and floor/ceil division. All operate on
//! `i64`, the width the rest of the crate standardises on for breakpoint
//! indices (see the Open Questions in DESIGN.md on `I = int64_t`).

/// Floor square root of a non-negative integer.
pub fn isqrt(n: i64) -> i64 {
    if n < 0 {
        return 0;
    }
    if n < 2 {
        return n;
    }
    let mut x = (n as f64).sqrt() as i64;
    // f64 sqrt can be off by one near perfect squares; correct both directions.
    while x > 0 && x * x > n {
        x -= 1;
    }
    while (x + 1) * (x + 1) <= n {
        x += 1;
    }
    x
}

/// Floor cube root of a non-negative integer.
pub fn icbrt(n: i64) -> i64 {
    if n < 0 {
        return 0;
    }
    if n < 2 {
        return n;
    }
    let mut x = (n as f64).cbrt() as i64;
    while x > 0 && x * x * x > n {
        x -= 1;
    }
    while (x + 1) * (x + 1) * (x + 1) <= n {
        x += 1;
    }
    x
}

/// `n * n`, named to mirror the source's `isq`/`sqT` shorthand.
#[inline]
pub fn isq(n: i64) -> i64 {
    n * n
}

/// `n * n * n`.
#[inline]
pub fn icube(n: i64) -> i64 {
    n * n * n
}

/// Greatest common divisor (Euclid).
pub fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a.abs()
}

/// Floor division of `a` by positive `b`.
#[inline]
pub fn div_floor(a: i64, b: i64) -> i64 {
    a.div_euclid(b)
}

/// Ceiling division of `a` by positive `b`.
#[inline]
pub fn div_ceil(a: i64, b: i64) -> i64 {
    (a + b - 1) / b
}

/// Smallest multiple of `p` that is `>= b`.
#[inline]
pub fn multiple(p: i64, b: i64) -> i64 {
    div_ceil(b, p) * p
}
