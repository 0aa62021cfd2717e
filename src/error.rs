//! # Error — Kernel Error Types
//!
//! Every fatal condition in this crate traces back to one of the four kinds
//! described in the design notes: a bad argument at the call boundary, a
//! non-invertible coefficient where invertibility is a precondition, an
//! integer-width concern that's the caller's to manage, or a sqrt-map access
//! outside its documented key set. None of these are retried or recovered
//! from internally — callers translate as they see fit.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, KernelError>;

/// Errors surfaced by kernel entry points.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Caller passed an out-of-domain argument: negative `n`, `U = 0`,
    /// a prime-count table too short for the requested bound, or an
    /// inconsistent `(p, m)` pair.
    #[error("domain error: {detail}")]
    Domain { detail: String },

    /// A division/inverse routine required `g(1)` (or `p(1)`) to be
    /// invertible in the coefficient ring and it was not.
    #[error("non-invertible coefficient at {at}")]
    Invertibility { at: String },

    /// Documents an `I = 64-bit` lower-bound concern for large-`n` paths.
    /// Not raised by arithmetic itself (the crate uses `i64` throughout) —
    /// raised only where a caller-supplied bound is provably too large for
    /// the chosen integer width to represent breakpoints safely.
    #[error("overflow risk: {detail}")]
    Overflow { detail: String },

    /// The sqrt map's large half only stores keys of the form `⌊n/i⌋`;
    /// any other large-key access is a programming error, not a recoverable
    /// condition.
    #[error("sqrt map resource limit: {detail}")]
    ResourceLimit { detail: String },
}
