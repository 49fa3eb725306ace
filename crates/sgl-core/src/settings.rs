//! Process-wide library settings.
//!
//! [`Settings`] holds the **default failure policy**, consulted by every slot
//! that was not given an explicit [`FailurePolicy`].  It is itself a
//! process-wide singleton accessed through a `std::sync::OnceLock`.
//!
//! Thread safety: the policy is stored in an atomic so it can be changed from
//! any thread.  Code that changes the default should restore it when done;
//! [`ScopedFailurePolicy`] does that automatically.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;

use crate::policy::FailurePolicy;
use crate::LOG_TARGET;

/// Process-wide settings used by singletons-rs.
pub struct Settings {
    failure_policy: AtomicU8,
}

static INSTANCE: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// Return a reference to the global singleton.
    pub fn instance() -> &'static Settings {
        INSTANCE.get_or_init(|| Settings {
            failure_policy: AtomicU8::new(FailurePolicy::default().to_u8()),
        })
    }

    /// The failure policy used by slots created without an explicit one.
    pub fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::from_u8(self.failure_policy.load(Ordering::Acquire))
    }

    /// Change the default failure policy, returning the previous one.
    ///
    /// Only failures that happen after the change observe the new value.
    pub fn set_failure_policy(&self, policy: FailurePolicy) -> FailurePolicy {
        let previous =
            FailurePolicy::from_u8(self.failure_policy.swap(policy.to_u8(), Ordering::AcqRel));
        tracing::debug!(target: LOG_TARGET, %previous, current = %policy, "default failure policy changed");
        previous
    }

    /// Restore the built-in default ([`FailurePolicy::Retry`]).
    pub fn reset_failure_policy(&self) {
        self.set_failure_policy(FailurePolicy::default());
    }
}

/// RAII guard that sets the default failure policy for its lifetime.
///
/// ```
/// use sgl_core::{FailurePolicy, ScopedFailurePolicy, Settings};
///
/// {
///     let _guard = ScopedFailurePolicy::new(FailurePolicy::Poison);
///     assert_eq!(Settings::instance().failure_policy(), FailurePolicy::Poison);
/// }
/// assert_eq!(Settings::instance().failure_policy(), FailurePolicy::Retry);
/// ```
#[must_use = "the previous policy is restored as soon as the guard is dropped"]
pub struct ScopedFailurePolicy {
    previous: FailurePolicy,
}

impl ScopedFailurePolicy {
    /// Install `policy` as the default until the guard is dropped.
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            previous: Settings::instance().set_failure_policy(policy),
        }
    }
}

impl Drop for ScopedFailurePolicy {
    fn drop(&mut self) {
        Settings::instance().set_failure_policy(self.previous);
    }
}
