//! # sgl-accessor
//!
//! Lazily-initialised, process-wide single-instance accessors.
//!
//! An accessor constructs its value no earlier than the first call and no
//! more than once, even when many threads make that first call at the same
//! time.  Every caller gets a shared reference to the fully constructed
//! value; nobody else can construct, copy, or replace it.
//!
//! | Building block | Purpose |
//! |----------------|---------|
//! | [`OnceSlot`] | storage using guaranteed one-time initialisation |
//! | [`GuardedSlot`] | storage using double-checked locking |
//! | [`LazyAccessor`] | slot + constructor function, usable as a `static` |
//! | [`Singleton`] | generic base trait, one slot per implementing type |
//! | [`SingletonSlot`] | a `Singleton`'s storage, read-only outside this crate |
//! | [`AccessToken`] | capability minted only for `Singleton::construct` |

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

// ── Public modules ───────────────────────────────────────────────────────────

/// `LazyAccessor`, a static accessor bundled with its constructor.
pub mod accessor;

/// The `Singleton` base trait and `singleton_slot!`.
pub mod singleton;

/// Storage strategies.
pub mod slot;

/// The construction capability.
pub mod token;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use accessor::{Constructor, LazyAccessor};
pub use singleton::{Singleton, SingletonSlot};
pub use slot::{GuardedSlot, InitSlot, OnceSlot};
pub use token::AccessToken;

pub use sgl_core::{Error, FailurePolicy, Result};
