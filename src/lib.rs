//! # Arith Kernel — Sublinear Multiplicative Number Theory
//!
//! A library of sieves and sublinear evaluators for multiplicative and
//! additive arithmetic functions: Dirichlet convolution/division/inverse,
//! the Möbius transform, prefix sums of `mu`/`phi`/`sigma_k` and of prime
//! counting functions, all the way up to `sum_multiplicative`, the general
//! `O(n^(2/3))` evaluator for an arbitrary multiplicative function given only
//! its prime-power values.
//!
//! ## Module Organization
//!
//! **Foundations**:
//! - [`error`] — the crate's error type and `Result` alias
//! - [`coeff`] — the abstract coefficient ring every algorithm is generic over
//! - [`intmath`] — integer square/cube roots and other small integer helpers
//! - [`sqrt_map`] — the hybrid small/large breakpoint table shared by every
//!   sublinear routine
//! - [`fenwick`] — a binary indexed tree, used internally by [`sum_multiplicative`]
//!
//! **Dense sieves** (`O(n log n)` to `O(n)`, every value up to `n`):
//! - [`sieve`] — primes, `pi`, `nu`, `phi`, `mu`, `sigma_0`, `sigma_1`, segmented variants
//! - [`factorize`] — factorization, divisor enumeration, and the arithmetic
//!   functions derivable from a prime factorization
//! - [`dirichlet`] — Dirichlet convolution, division, and inverse, generic and
//!   in the multiplicative/completely-multiplicative fast paths
//! - [`sieve_m`] — a summatory function solved from a divisor-sum recurrence
//! - [`sqfree`] — squarefree counting and a generalized `sigma_k`
//!
//! **Sublinear evaluators** (a single value, without sieving a dense table):
//! - [`sum_m`] — the sublinear counterpart to [`sieve_m`]
//! - [`prime_counting`] — Lucy-Hedgehog prime power sums and mod-4 splits
//! - [`sum_multiplicative`] — the general `O(n^(2/3))` multiplicative-function
//!   evaluator, and its simpler `O(n^(3/4))` DFS fallback
//! - [`mertens`] — the Mertens function family and totient-power sums, built
//!   from [`sieve_m`]/[`sum_m`] plus [`polynom`]'s Faulhaber's-formula kernel
//! - [`polynom`] — dense polynomials over a coefficient ring, and their
//!   discrete integral
//!
//! ## Design Philosophy
//!
//! Every routine is generic over [`coeff::Coeff`], an abstract commutative
//! ring: the same sieve works over `i64`, `Z/mZ`, or `Q` without
//! duplication. Sublinear routines take their memo table as an explicit
//! parameter so callers can share preprocessing across repeated queries
//! rather than reallocating per call.

pub mod coeff;
pub mod dirichlet;
pub mod error;
pub mod factorize;
pub mod fenwick;
pub mod intmath;
pub mod mertens;
pub mod polynom;
pub mod prime_counting;
pub mod sieve;
pub mod sieve_m;
pub mod sqfree;
pub mod sqrt_map;
pub mod sum_m;
pub mod sum_multiplicative;

pub use error::{KernelError, Result};
