//! Storage slots: the process-wide cell an instance lives in.
//!
//! Two strategies provide the same guarantee (at most one construction, and
//! every caller that gets a reference observes the fully built value):
//!
//! | Slot | Strategy | Fast path |
//! |------|----------|-----------|
//! | [`OnceSlot`] | guaranteed one-time initialisation (`once_cell`) | one atomic load |
//! | [`GuardedSlot`] | check, lock, re-check, construct | one `Acquire` load |
//!
//! Both are `const`-constructible so they can be placed in a `static`, and
//! both drop their instance when the slot itself is dropped.  A `static` is
//! never dropped, so an instance stored in one lives until the process exits.

mod guarded;
mod once;

pub use guarded::GuardedSlot;
pub use once::OnceSlot;

use std::convert::Infallible;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

use sgl_core::{Error, FailurePolicy, Result, Settings, LOG_TARGET};

/// Common interface of the storage strategies.
pub trait InitSlot<T> {
    /// Return the instance if it has been constructed.  Never blocks.
    fn get(&self) -> Option<&T>;

    /// Return the instance, constructing it with `f` if this is the first
    /// call.
    ///
    /// Concurrent first callers block until one of them has finished; `f`
    /// runs at most once per successful construction.  A failure is reported
    /// as [`Error::Construction`] to the caller whose `f` failed; what other
    /// callers see depends on [`policy`][Self::policy].
    fn get_or_try_init<F, E>(&self, f: F) -> Result<&T>
    where
        F: FnOnce() -> std::result::Result<T, E>,
        E: Display;

    /// Infallible form of [`get_or_try_init`][Self::get_or_try_init].
    ///
    /// # Panics
    ///
    /// If the slot is poisoned, or if `f` panics.
    fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        match self.get_or_try_init(|| Ok::<T, Infallible>(f())) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// `true` once an instance has been constructed.
    fn is_initialized(&self) -> bool {
        self.get().is_some()
    }

    /// `true` after a failure under [`FailurePolicy::Poison`].
    fn is_poisoned(&self) -> bool;

    /// Failure policy in effect for the next construction attempt.
    fn policy(&self) -> FailurePolicy;
}

/// Resolve an optional per-slot policy against the process default.
fn effective_policy(policy: Option<FailurePolicy>) -> FailurePolicy {
    policy.unwrap_or_else(|| Settings::instance().failure_policy())
}

/// Marks a slot poisoned if the constructor unwinds under the poison policy.
///
/// The policy is resolved while unwinding, not when the guard is armed.
struct PoisonOnUnwind<'a> {
    flag: &'a AtomicBool,
    policy: Option<FailurePolicy>,
    armed: bool,
}

impl Drop for PoisonOnUnwind<'_> {
    fn drop(&mut self) {
        if self.armed && effective_policy(self.policy) == FailurePolicy::Poison {
            self.flag.store(true, Ordering::Release);
            tracing::error!(target: LOG_TARGET, "constructor panicked, slot poisoned");
        }
    }
}

/// Run a constructor on behalf of a slot, applying the failure policy.
///
/// `policy` is the slot's own override; without one, the process default is
/// looked up once `f` has failed.  Callers must already hold whatever
/// exclusion their strategy uses.
fn construct<T, F, E>(poisoned: &AtomicBool, policy: Option<FailurePolicy>, f: F) -> Result<T>
where
    F: FnOnce() -> std::result::Result<T, E>,
    E: Display,
{
    let type_name = std::any::type_name::<T>();
    if poisoned.load(Ordering::Acquire) {
        tracing::error!(target: LOG_TARGET, type_name, "access to poisoned slot");
        return Err(Error::poisoned::<T>());
    }

    tracing::debug!(target: LOG_TARGET, type_name, ?policy, "constructing instance");
    let mut guard = PoisonOnUnwind {
        flag: poisoned,
        policy,
        armed: true,
    };
    let outcome = f();
    guard.armed = false;

    match outcome {
        Ok(value) => {
            tracing::debug!(target: LOG_TARGET, type_name, "instance constructed");
            Ok(value)
        }
        Err(cause) => {
            let err = Error::construction::<T>(cause);
            match effective_policy(policy) {
                FailurePolicy::Retry => {
                    tracing::warn!(target: LOG_TARGET, type_name, error = %err, "construction failed, slot left empty");
                }
                FailurePolicy::Poison => {
                    poisoned.store(true, Ordering::Release);
                    tracing::error!(target: LOG_TARGET, type_name, error = %err, "construction failed, slot poisoned");
                }
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Probe;

    #[test]
    fn poisoned_flag_short_circuits() {
        let flag = AtomicBool::new(true);
        let mut ran = false;
        let out = construct::<Probe, _, Error>(&flag, Some(FailurePolicy::Retry), || {
            ran = true;
            Ok(Probe)
        });
        assert_eq!(out.unwrap_err(), Error::poisoned::<Probe>());
        assert!(!ran);
    }

    #[test]
    fn retry_failure_leaves_flag_clear() {
        let flag = AtomicBool::new(false);
        let out = construct::<Probe, _, _>(&flag, Some(FailurePolicy::Retry), || Err("offline"));
        assert!(matches!(out, Err(Error::Construction { .. })));
        assert!(!flag.load(Ordering::Acquire));
    }

    #[test]
    fn poison_failure_sets_flag() {
        let flag = AtomicBool::new(false);
        let out = construct::<Probe, _, _>(&flag, Some(FailurePolicy::Poison), || Err("offline"));
        assert!(matches!(out, Err(Error::Construction { .. })));
        assert!(flag.load(Ordering::Acquire));
    }

    #[test]
    fn panic_under_poison_sets_flag() {
        let flag = AtomicBool::new(false);
        let result = std::panic::catch_unwind(|| {
            let _ = construct::<Probe, _, Error>(&flag, Some(FailurePolicy::Poison), || panic!("boom"));
        });
        assert!(result.is_err());
        assert!(flag.load(Ordering::Acquire));
    }

    #[test]
    fn panic_under_retry_leaves_flag_clear() {
        let flag = AtomicBool::new(false);
        let result = std::panic::catch_unwind(|| {
            let _ = construct::<Probe, _, Error>(&flag, Some(FailurePolicy::Retry), || panic!("boom"));
        });
        assert!(result.is_err());
        assert!(!flag.load(Ordering::Acquire));
    }
}
