use std::fmt;
use std::fmt::Display;
use std::marker::PhantomData;
use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicPtr, Ordering};
use std::sync::{Mutex, PoisonError};

use sgl_core::{FailurePolicy, Result};

use super::{construct, effective_policy, InitSlot};

/// Slot guarded by double-checked locking.
///
/// The fast path is a single `Acquire` load of the instance pointer.  When
/// the pointer is null the caller takes the construction lock and checks
/// again, because several threads can pass the first check before any of
/// them owns the lock.  The winner boxes the new value and publishes the
/// pointer with `Release`, so any thread that later loads a non-null pointer
/// also sees every write the constructor made.
///
/// ```
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use sgl_accessor::{GuardedSlot, InitSlot};
///
/// struct Sequence(AtomicU64);
///
/// static SEQUENCE: GuardedSlot<Sequence> = GuardedSlot::new();
///
/// let seq = SEQUENCE.get_or_init(|| Sequence(AtomicU64::new(1)));
/// assert_eq!(seq.0.fetch_add(1, Ordering::Relaxed), 1);
/// assert!(std::ptr::eq(seq, SEQUENCE.get().unwrap()));
/// ```
pub struct GuardedSlot<T> {
    instance: AtomicPtr<T>,
    lock: Mutex<()>,
    poisoned: AtomicBool,
    policy: Option<FailurePolicy>,
    _owns: PhantomData<Box<T>>,
}

// SAFETY: the slot hands out `&T` to any thread and drops the boxed `T` on
// whichever thread drops the slot, so it needs `T: Sync` and `T: Send`.  The
// pointer itself is only written while holding `lock`.
unsafe impl<T: Send + Sync> Sync for GuardedSlot<T> {}

impl<T> GuardedSlot<T> {
    /// An empty slot that follows the process-wide default failure policy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            instance: AtomicPtr::new(ptr::null_mut()),
            lock: Mutex::new(()),
            poisoned: AtomicBool::new(false),
            policy: None,
            _owns: PhantomData,
        }
    }

    /// An empty slot with a fixed failure policy.
    #[must_use]
    pub const fn with_policy(policy: FailurePolicy) -> Self {
        Self {
            instance: AtomicPtr::new(ptr::null_mut()),
            lock: Mutex::new(()),
            poisoned: AtomicBool::new(false),
            policy: Some(policy),
            _owns: PhantomData,
        }
    }

    /// Consume the slot, returning the instance if one was constructed.
    pub fn into_inner(mut self) -> Option<T> {
        let raw = std::mem::replace(self.instance.get_mut(), ptr::null_mut());
        if raw.is_null() {
            return None;
        }
        // SAFETY: `raw` came from `Box::into_raw` in `get_or_try_init` and
        // was just detached from the slot, so `Drop` will not free it again.
        Some(*unsafe { Box::from_raw(raw) })
    }
}

impl<T> InitSlot<T> for GuardedSlot<T> {
    #[inline]
    fn get(&self) -> Option<&T> {
        let raw = self.instance.load(Ordering::Acquire);
        // SAFETY: a non-null pointer was produced by `Box::into_raw` after the
        // value was fully written and published with `Release`; the `Acquire`
        // load above synchronises with that store.  The box is only freed
        // through `&mut self`, which cannot coexist with the returned borrow.
        unsafe { raw.as_ref() }
    }

    fn get_or_try_init<F, E>(&self, f: F) -> Result<&T>
    where
        F: FnOnce() -> std::result::Result<T, E>,
        E: Display,
    {
        if let Some(value) = self.get() {
            return Ok(value);
        }

        // The lock protects no data, only the construction window, so a
        // panic inside an earlier constructor leaves nothing inconsistent.
        let _held = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(value) = self.get() {
            return Ok(value);
        }

        let value = construct(&self.poisoned, self.policy, f)?;
        let raw = Box::into_raw(Box::new(value));
        self.instance.store(raw, Ordering::Release);
        // SAFETY: `raw` is a live, uniquely owned allocation now owned by the
        // slot; it outlives `&self` for the same reason as in `get`.
        Ok(unsafe { &*raw })
    }

    fn is_poisoned(&self) -> bool {
        self.poisoned.load(Ordering::Acquire)
    }

    fn policy(&self) -> FailurePolicy {
        effective_policy(self.policy)
    }
}

impl<T> Drop for GuardedSlot<T> {
    fn drop(&mut self) {
        let raw = *self.instance.get_mut();
        if !raw.is_null() {
            // SAFETY: exclusive access; `raw` came from `Box::into_raw` and
            // has not been freed.
            drop(unsafe { Box::from_raw(raw) });
        }
    }
}

impl<T> Default for GuardedSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for GuardedSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedSlot")
            .field("value", &self.get())
            .field("poisoned", &self.is_poisoned())
            .finish()
    }
}
