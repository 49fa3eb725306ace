//! # singletons
//!
//! Lazily-initialised, process-wide single-instance accessors.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates.  Application code should depend on this
//! crate rather than the individual `sgl-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! singletons = "0.1"
//! ```
//!
//! ```rust
//! use singletons::LazyAccessor;
//!
//! pub struct Pool {
//!     size: usize,
//! }
//!
//! static POOL: LazyAccessor<Pool> = LazyAccessor::new(|| Ok(Pool { size: 4 }));
//!
//! assert_eq!(POOL.instance().size, 4);
//! assert!(std::ptr::eq(POOL.instance(), POOL.instance()));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error type, failure policy, and process-wide settings.
pub use sgl_core as core;

/// Storage slots, `LazyAccessor`, the `Singleton` base, and `AccessToken`.
pub use sgl_accessor as accessor;

/// The five demonstration singletons.
pub use sgl_patterns as patterns;

pub use sgl_accessor::{
    singleton_slot, AccessToken, GuardedSlot, InitSlot, LazyAccessor, OnceSlot, Singleton,
    SingletonSlot,
};
pub use sgl_core::{Error, FailurePolicy, Result, ScopedFailurePolicy, Settings};
