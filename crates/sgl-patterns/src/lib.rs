//! # sgl-patterns
//!
//! Five ways to give a type exactly one process-wide instance, side by side.
//!
//! | Type | Module | Instantiation | Guarantee comes from |
//! |------|--------|---------------|----------------------|
//! | [`Limits`] | [`eager`] | compile time | `const` evaluation |
//! | [`IdGenerator`] | [`guarded`] | first access | double-checked locking |
//! | [`BuildInfo`] | [`local_static`] | first access | one-time initialisation |
//! | [`Catalog`] | [`generic_base`] | first access | `Singleton` base, private constructor |
//! | [`Journal`] | [`token_gated`] | first access | `Singleton` base, token-gated public constructor |
//!
//! None of these types implements `Clone` or `Copy`, and callers only ever
//! receive `&'static` references, so an instance can be neither duplicated
//! nor replaced:
//!
//! ```compile_fail
//! use sgl_patterns::Limits;
//!
//! let copy: Limits = *Limits::instance();
//! ```
//!
//! ```compile_fail
//! use sgl_patterns::IdGenerator;
//!
//! let copy: IdGenerator = IdGenerator::instance().clone();
//! ```
//!
//! ```compile_fail
//! use sgl_accessor::Singleton;
//! use sgl_patterns::Journal;
//!
//! let journal: &mut Journal = Journal::instance();
//! ```
//!
//! A hand-rolled "check a pointer, then construct" accessor without a lock
//! is deliberately absent: it races, can construct several instances, and
//! leaks the losers.  The test suite keeps one as a negative fixture.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Instance built at compile time.
pub mod eager;

/// Singleton built on the generic base with a private constructor.
pub mod generic_base;

/// Lazy instance embedded in its type with double-checked locking.
pub mod guarded;

/// Lazy instance in a function-local static.
pub mod local_static;

/// Singleton built on the generic base with a token-gated constructor.
pub mod token_gated;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use eager::Limits;
pub use generic_base::Catalog;
pub use guarded::IdGenerator;
pub use local_static::BuildInfo;
pub use token_gated::Journal;
