//! # sgl-core
//!
//! Core definitions shared by every crate in the singletons-rs workspace:
//! the error hierarchy, the failure policy applied when a constructor fails,
//! and the process-wide [`Settings`] that hold the default policy.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Behaviour after a failed construction.
pub mod policy;

/// Global library settings (default failure policy).
pub mod settings;

/// `tracing` target used for every event emitted by the workspace.
pub const LOG_TARGET: &str = "singletons";

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use policy::FailurePolicy;
pub use settings::{ScopedFailurePolicy, Settings};
