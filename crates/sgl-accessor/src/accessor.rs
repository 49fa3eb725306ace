//! `LazyAccessor<T>` — a process-wide accessor bundled with its constructor.
//!
//! The accessor owns a storage slot and a plain constructor function.  It
//! never hands out an [`AccessToken`][crate::AccessToken]: whoever can name
//! `T`'s constructor can already build a `T`, so uniqueness comes from where
//! that constructor is visible.  Keep it private to the module that declares
//! the `static`, or implement [`Singleton`][crate::Singleton] for
//! token-gated types.
//!
//! | Constructor | Slot | Strategy |
//! |-------------|------|----------|
//! | [`LazyAccessor::new`] | [`OnceSlot`] | guaranteed one-time initialisation |
//! | [`LazyAccessor::guarded`] | [`GuardedSlot`] | double-checked locking |
//!
//! An accessor is neither `Clone` nor `Copy`, and a `static` one cannot be
//! moved out of:
//!
//! ```compile_fail
//! use sgl_accessor::LazyAccessor;
//!
//! static NAMES: LazyAccessor<Vec<String>> = LazyAccessor::new(|| Ok(Vec::new()));
//!
//! let stolen = NAMES;
//! ```
//!
//! ```compile_fail
//! use sgl_accessor::LazyAccessor;
//!
//! static NAMES: LazyAccessor<Vec<String>> = LazyAccessor::new(|| Ok(Vec::new()));
//!
//! let copy: LazyAccessor<Vec<String>> = NAMES.clone();
//! ```
//!
//! A token-gated constructor cannot be wrapped in a second accessor:
//!
//! ```compile_fail
//! use sgl_accessor::{AccessToken, LazyAccessor};
//!
//! pub struct Journal;
//!
//! impl Journal {
//!     pub fn new(_token: AccessToken<Self>) -> Self {
//!         Journal
//!     }
//! }
//!
//! static SECOND: LazyAccessor<Journal> = LazyAccessor::new(|token| Ok(Journal::new(token)));
//! ```
//!
//! Nor can its slot be reached to fill or poison it:
//!
//! ```compile_fail
//! use sgl_accessor::{InitSlot, LazyAccessor};
//!
//! static NAMES: LazyAccessor<Vec<String>> = LazyAccessor::new(|| Ok(Vec::new()));
//!
//! let _ = NAMES.slot().get_or_try_init(|| Err::<Vec<String>, _>("blocked"));
//! ```

use std::fmt;

use sgl_core::{FailurePolicy, Result};

use crate::slot::{GuardedSlot, InitSlot, OnceSlot};

/// Constructor signature accepted by [`LazyAccessor`].
pub type Constructor<T> = fn() -> Result<T>;

/// A lazily constructed, single-instance value reachable through a `static`.
///
/// ```
/// use sgl_accessor::LazyAccessor;
///
/// pub struct Limits {
///     max_sessions: usize,
/// }
///
/// impl Limits {
///     fn load() -> sgl_core::Result<Self> {
///         Ok(Self { max_sessions: 64 })
///     }
///
///     pub fn max_sessions(&self) -> usize {
///         self.max_sessions
///     }
/// }
///
/// static LIMITS: LazyAccessor<Limits> = LazyAccessor::new(Limits::load);
///
/// assert!(!LIMITS.is_initialized());
/// assert_eq!(LIMITS.instance().max_sessions(), 64);
/// assert!(std::ptr::eq(LIMITS.instance(), LIMITS.instance()));
/// ```
pub struct LazyAccessor<T, S = OnceSlot<T>> {
    slot: S,
    construct: Constructor<T>,
}

impl<T> LazyAccessor<T, OnceSlot<T>> {
    /// Accessor using guaranteed one-time initialisation.
    #[must_use]
    pub const fn new(construct: Constructor<T>) -> Self {
        Self {
            slot: OnceSlot::new(),
            construct,
        }
    }

    /// Same as [`new`][Self::new] with a fixed failure policy.
    #[must_use]
    pub const fn with_policy(construct: Constructor<T>, policy: FailurePolicy) -> Self {
        Self {
            slot: OnceSlot::with_policy(policy),
            construct,
        }
    }
}

impl<T> LazyAccessor<T, GuardedSlot<T>> {
    /// Accessor using double-checked locking.
    #[must_use]
    pub const fn guarded(construct: Constructor<T>) -> Self {
        Self {
            slot: GuardedSlot::new(),
            construct,
        }
    }

    /// Same as [`guarded`][Self::guarded] with a fixed failure policy.
    #[must_use]
    pub const fn guarded_with_policy(construct: Constructor<T>, policy: FailurePolicy) -> Self {
        Self {
            slot: GuardedSlot::with_policy(policy),
            construct,
        }
    }
}

impl<T, S: InitSlot<T>> LazyAccessor<T, S> {
    /// Return the instance, constructing it on first use.
    ///
    /// # Panics
    ///
    /// If construction fails or the slot is poisoned.  Use
    /// [`try_instance`][Self::try_instance] to handle those cases.
    pub fn instance(&self) -> &T {
        match self.try_instance() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Return the instance, constructing it on first use.
    pub fn try_instance(&self) -> Result<&T> {
        self.slot.get_or_try_init(self.construct)
    }

    /// Return the instance if it has already been constructed.
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    /// `true` once the instance exists.
    pub fn is_initialized(&self) -> bool {
        self.slot.is_initialized()
    }

    /// `true` if a failed construction poisoned the accessor.
    pub fn is_poisoned(&self) -> bool {
        self.slot.is_poisoned()
    }

    /// Failure policy in effect for the next construction attempt.
    pub fn policy(&self) -> FailurePolicy {
        self.slot.policy()
    }
}

impl<T: fmt::Debug, S: InitSlot<T>> fmt::Debug for LazyAccessor<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyAccessor")
            .field("value", &self.slot.get())
            .field("poisoned", &self.slot.is_poisoned())
            .finish()
    }
}
