//! # SqrtMap — Hybrid Breakpoint Table (C3)
//!
//! The central shared structure behind every sublinear routine in this
//! crate. A mapping `K → V` whose only legal keys are "small" (`0 <= k < U`)
//! or "large breakpoints" (`k = ⌊n/i⌋` for some `1 <= i <= n/U`) — the two
//! halves are each a flat, densely-indexed array, so access is `O(1)` and
//! cache-friendly, which is the whole reason to avoid a hash map here (see
//! the design notes: "cache behaviour on the two dense arrays is central to
//! the stated complexities").
//!
//! `reset_max` lets a caller reinterpret the large half under a smaller
//! ceiling `n' <= n` without reallocating — used by `sum_phi_D_L`/`sum_g_L`
//! to evaluate several `n`s while sharing the same preprocessed small region.

use crate::error::{KernelError, Result};

/// Hybrid small/large breakpoint table. See the module docs for the key
/// space this realises.
#[derive(Clone, Debug)]
pub struct SqrtMap<V> {
    u: i64,
    n: i64,
    small: Vec<Option<V>>,
    large: Vec<Option<V>>,
}

enum Slot {
    Small(usize),
    Large(usize),
}

impl<V: Clone> SqrtMap<V> {
    /// Creates a map over ceiling `n` with small-key threshold `u`.
    /// `u` must be at least 1; `n` must be non-negative.
    pub fn new(u: i64, n: i64) -> Result<Self> {
        if u < 1 {
            return Err(KernelError::Domain { detail: format!("sqrt map threshold U={u} must be >= 1") });
        }
        if n < 0 {
            return Err(KernelError::Domain { detail: format!("sqrt map ceiling n={n} must be >= 0") });
        }
        let nq = (n / u) as usize;
        Ok(SqrtMap {
            u,
            n,
            small: vec![None; u as usize],
            large: vec![None; nq + 1],
        })
    }

    /// Small-key threshold `U`.
    pub fn threshold(&self) -> i64 {
        self.u
    }

    /// Current ceiling `n`.
    pub fn ceiling(&self) -> i64 {
        self.n
    }

    fn slot(&self, k: i64) -> Slot {
        if k >= 0 && k < self.u {
            Slot::Small(k as usize)
        } else {
            debug_assert!(k >= 0 && k <= self.n, "sqrt map key {k} out of [0, {}]", self.n);
            let i = (self.n / k) as usize;
            debug_assert!(
                i < self.large.len() && self.n / (i as i64) == k,
                "sqrt map key {k} is not a breakpoint of n={}",
                self.n
            );
            Slot::Large(i)
        }
    }

    /// Reads the value stored at `k`, if any.
    pub fn get(&self, k: i64) -> Option<&V> {
        match self.slot(k) {
            Slot::Small(idx) => self.small[idx].as_ref(),
            Slot::Large(idx) => self.large.get(idx).and_then(|v| v.as_ref()),
        }
    }

    /// True iff a value has been `set` at `k`.
    pub fn contains(&self, k: i64) -> bool {
        self.get(k).is_some()
    }

    /// Stores `v` at `k`. Writing a large key that is not an actual
    /// breakpoint of the current ceiling is a programming error (debug-only
    /// assertion, per the design notes treating it as non-recoverable).
    pub fn set(&mut self, k: i64, v: V) {
        match self.slot(k) {
            Slot::Small(idx) => self.small[idx] = Some(v),
            Slot::Large(idx) => self.large[idx] = Some(v),
        }
    }

    /// Reinterprets the large half under a new ceiling `n' <= n`, reusing
    /// the existing allocation. The small half (and its values) is
    /// untouched: small keys don't depend on the ceiling.
    pub fn reset_max(&mut self, new_n: i64) {
        debug_assert!(new_n <= self.n, "reset_max only narrows the ceiling");
        self.n = new_n;
        let nq = (new_n / self.u) as usize;
        self.large.clear();
        self.large.resize(nq + 1, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_and_large_roundtrip() {
        let n = 100i64;
        let u = crate::intmath::isqrt(n) + 1;
        let mut m: SqrtMap<i64> = SqrtMap::new(u, n).unwrap();
        for k in 1..u {
            m.set(k, k * 10);
        }
        let mut i = 1;
        while n / i >= u {
            m.set(n / i, (n / i) * 10);
            i += 1;
        }
        for k in 1..u {
            assert_eq!(*m.get(k).unwrap(), k * 10);
        }
        assert_eq!(*m.get(n).unwrap(), n * 10);
        assert!(!m.contains(u + 1000));
    }

    #[test]
    fn reset_max_keeps_small_half() {
        let n = 1000i64;
        let u = 10i64;
        let mut m: SqrtMap<i64> = SqrtMap::new(u, n).unwrap();
        m.set(5, 55);
        m.set(n, 999);
        m.reset_max(200);
        assert_eq!(*m.get(5).unwrap(), 55);
        assert!(!m.contains(1000));
        m.set(200, 1);
        assert_eq!(*m.get(200).unwrap(), 1);
    }

    #[test]
    fn rejects_bad_construction() {
        assert!(SqrtMap::<i64>::new(0, 10).is_err());
        assert!(SqrtMap::<i64>::new(1, -1).is_err());
    }
}
