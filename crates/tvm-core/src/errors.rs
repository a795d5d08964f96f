//! Error types for tvm-rs.
//!
//! A single `thiserror`-derived enum covers every failure mode in the
//! workspace: numeric domain errors, malformed date strings, the two ways
//! the reference-curve fetch can fail, violated preconditions, and store
//! write failures.  The `ensure!` and `fail!` macros give call sites a
//! compact way to produce the first two.

use thiserror::Error;

/// The top-level error type used throughout tvm-rs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A numeric input is outside the domain of the requested formula.
    #[error("domain error: {0}")]
    Domain(String),

    /// Date-related error (malformed string, out-of-range value).
    #[error("date error: {0}")]
    Date(String),

    /// The reference-curve document could not be retrieved.
    #[error("curve retrieval failed: {0}")]
    Retrieval(String),

    /// The reference-curve document did not contain the expected markers.
    #[error("curve parse failed: {0}")]
    Parse(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// A ledger store rejected a write.
    #[error("store error: {0}")]
    Store(String),
}

/// Shorthand `Result` type used throughout tvm-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use tvm_core::ensure;
/// fn positive(x: f64) -> tvm_core::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Domain(...))` immediately.
///
/// # Example
/// ```
/// use tvm_core::fail;
/// fn always_err() -> tvm_core::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Domain(format!($($msg)*)))
    };
}
