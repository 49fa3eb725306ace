//! Error types for singletons-rs.
//!
//! Every failure an accessor can report is a variant of one
//! `thiserror`-derived enum.  Constructors signal failure by returning
//! `Err(..)`; the `ensure!` and `fail!` macros defined here are the
//! convenient way to do that from inside a constructor body.

use std::fmt::Display;

use thiserror::Error;

/// The top-level error type used throughout singletons-rs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The constructor of the singleton type returned an error.
    #[error("construction of `{type_name}` failed: {message}")]
    Construction {
        /// `std::any::type_name` of the type being constructed.
        type_name: &'static str,
        /// Rendered error returned by the constructor.
        message: String,
    },

    /// An earlier construction failed and the slot no longer accepts
    /// attempts (see [`FailurePolicy::Poison`][crate::FailurePolicy::Poison]).
    #[error("`{type_name}` is poisoned by an earlier failed construction")]
    Poisoned {
        /// `std::any::type_name` of the type that could not be constructed.
        type_name: &'static str,
    },

    /// Precondition violated inside a constructor (see [`ensure!`]).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// General runtime failure inside a constructor (see [`fail!`]).
    #[error("{0}")]
    Runtime(String),
}

impl Error {
    /// Wrap the error returned by the constructor of `T`.
    pub fn construction<T: ?Sized>(cause: impl Display) -> Self {
        Error::Construction {
            type_name: std::any::type_name::<T>(),
            message: cause.to_string(),
        }
    }

    /// The poisoned-slot error for `T`.
    pub fn poisoned<T: ?Sized>() -> Self {
        Error::Poisoned {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Return `true` if this error reports a poisoned slot.
    pub fn is_poisoned(&self) -> bool {
        matches!(self, Error::Poisoned { .. })
    }
}

/// Shorthand `Result` type used throughout singletons-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use sgl_core::{ensure, errors::Error};
/// fn capacity(n: usize) -> sgl_core::Result<usize> {
///     ensure!(n > 0, "capacity must be positive, got {n}");
///     Ok(n)
/// }
/// assert!(capacity(8).is_ok());
/// assert_eq!(
///     capacity(0),
///     Err(Error::Precondition("capacity must be positive, got 0".into()))
/// );
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

/// Return `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use sgl_core::fail;
/// fn always_err() -> sgl_core::Result<()> {
///     fail!("backing store unavailable");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
