use std::fmt;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::OnceCell;
use sgl_core::{FailurePolicy, Result};

use super::{construct, effective_policy, InitSlot};

/// Slot backed by guaranteed one-time initialisation.
///
/// This is the Rust counterpart of a function-local static: threads that
/// reach the slot while it is being filled park until the winner is done,
/// and then all of them see the finished value.  There is no user-managed
/// lock and no flag to order by hand.
///
/// ```
/// use sgl_accessor::{InitSlot, OnceSlot};
///
/// struct Registry {
///     names: Vec<&'static str>,
/// }
///
/// fn registry() -> &'static Registry {
///     static SLOT: OnceSlot<Registry> = OnceSlot::new();
///     SLOT.get_or_init(|| Registry { names: vec!["alpha", "beta"] })
/// }
///
/// assert!(std::ptr::eq(registry(), registry()));
/// assert_eq!(registry().names.len(), 2);
/// ```
pub struct OnceSlot<T> {
    cell: OnceCell<T>,
    poisoned: AtomicBool,
    policy: Option<FailurePolicy>,
}

impl<T> OnceSlot<T> {
    /// An empty slot that follows the process-wide default failure policy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
            poisoned: AtomicBool::new(false),
            policy: None,
        }
    }

    /// An empty slot with a fixed failure policy.
    #[must_use]
    pub const fn with_policy(policy: FailurePolicy) -> Self {
        Self {
            cell: OnceCell::new(),
            poisoned: AtomicBool::new(false),
            policy: Some(policy),
        }
    }

    /// Consume the slot, returning the instance if one was constructed.
    pub fn into_inner(self) -> Option<T> {
        self.cell.into_inner()
    }
}

impl<T> InitSlot<T> for OnceSlot<T> {
    #[inline]
    fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    fn get_or_try_init<F, E>(&self, f: F) -> Result<&T>
    where
        F: FnOnce() -> std::result::Result<T, E>,
        E: Display,
    {
        if let Some(value) = self.cell.get() {
            return Ok(value);
        }
        self.cell
            .get_or_try_init(|| construct(&self.poisoned, self.policy, f))
    }

    fn is_poisoned(&self) -> bool {
        self.poisoned.load(Ordering::Acquire)
    }

    fn policy(&self) -> FailurePolicy {
        effective_policy(self.policy)
    }
}

impl<T> Default for OnceSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for OnceSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnceSlot")
            .field("value", &self.cell.get())
            .field("poisoned", &self.is_poisoned())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sgl_core::Error;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn empty_until_first_access() {
        let slot: OnceSlot<u32> = OnceSlot::with_policy(FailurePolicy::Retry);
        assert!(slot.get().is_none());
        assert!(!slot.is_initialized());
        assert_eq!(*slot.get_or_init(|| 7), 7);
        assert!(slot.is_initialized());
        assert_eq!(*slot.get_or_init(|| 8), 7);
    }

    #[test]
    fn retry_runs_constructor_again() {
        let attempts = AtomicUsize::new(0);
        let slot: OnceSlot<u32> = OnceSlot::with_policy(FailurePolicy::Retry);

        let first = slot.get_or_try_init(|| {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err("not yet")
        });
        assert!(matches!(first, Err(Error::Construction { .. })));
        assert!(!slot.is_poisoned());

        let second = slot.get_or_try_init(|| {
            attempts.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Error>(42)
        });
        assert_eq!(second, Ok(&42));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn poison_never_reruns_constructor() {
        let attempts = AtomicUsize::new(0);
        let slot: OnceSlot<u32> = OnceSlot::with_policy(FailurePolicy::Poison);

        let first = slot.get_or_try_init(|| {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err("not yet")
        });
        assert!(matches!(first, Err(Error::Construction { .. })));
        assert!(slot.is_poisoned());

        let second = slot.get_or_try_init(|| {
            attempts.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Error>(42)
        });
        assert_eq!(second, Err(Error::poisoned::<u32>()));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert!(!slot.is_initialized());
    }

    #[test]
    #[should_panic(expected = "poisoned")]
    fn get_or_init_panics_on_poisoned_slot() {
        let slot: OnceSlot<u32> = OnceSlot::with_policy(FailurePolicy::Poison);
        let _ = slot.get_or_try_init(|| Err("broken"));
        slot.get_or_init(|| 1);
    }

    #[test]
    fn into_inner_returns_instance() {
        let slot: OnceSlot<String> = OnceSlot::with_policy(FailurePolicy::Retry);
        slot.get_or_init(|| String::from("kept"));
        assert_eq!(slot.into_inner().as_deref(), Some("kept"));
    }
}
