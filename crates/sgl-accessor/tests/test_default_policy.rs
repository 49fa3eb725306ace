//! Slots created without an explicit policy follow the process default.
//!
//! Kept in its own test binary: it changes process-wide settings.

use sgl_accessor::{Error, FailurePolicy, GuardedSlot, InitSlot, OnceSlot};
use sgl_core::{ScopedFailurePolicy, Settings};

#[test]
fn default_policy_is_read_at_failure_time() {
    let once: OnceSlot<u8> = OnceSlot::new();
    let guarded: GuardedSlot<u8> = GuardedSlot::new();
    let pinned: OnceSlot<u8> = OnceSlot::with_policy(FailurePolicy::Retry);

    assert_eq!(once.policy(), FailurePolicy::Retry);
    assert!(once.get_or_try_init(|| Err("first")).is_err());
    assert!(!once.is_poisoned());

    {
        let _scope = ScopedFailurePolicy::new(FailurePolicy::Poison);
        assert_eq!(once.policy(), FailurePolicy::Poison);
        assert_eq!(guarded.policy(), FailurePolicy::Poison);
        assert_eq!(pinned.policy(), FailurePolicy::Retry);

        assert!(once.get_or_try_init(|| Err("second")).is_err());
        assert!(guarded.get_or_try_init(|| Err("second")).is_err());
        assert!(pinned.get_or_try_init(|| Err("second")).is_err());
    }

    assert_eq!(Settings::instance().failure_policy(), FailurePolicy::Retry);
    // Poisoning is permanent even after the default changes back.
    assert!(once.is_poisoned());
    assert!(guarded.is_poisoned());
    assert_eq!(
        once.get_or_try_init(|| Ok::<_, Error>(1)),
        Err(Error::poisoned::<u8>())
    );
    assert!(!pinned.is_poisoned());
    assert_eq!(pinned.get_or_try_init(|| Ok::<_, Error>(3)), Ok(&3));

    // A default changed while the constructor runs applies to that failure.
    let late_once: OnceSlot<u8> = OnceSlot::new();
    let late_guarded: GuardedSlot<u8> = GuardedSlot::new();
    assert_eq!(late_once.policy(), FailurePolicy::Retry);
    let once_result = late_once.get_or_try_init(|| {
        Settings::instance().set_failure_policy(FailurePolicy::Poison);
        Err("default switched mid-construction")
    });
    let guarded_result = late_guarded.get_or_try_init(|| {
        Settings::instance().set_failure_policy(FailurePolicy::Poison);
        Err("default switched mid-construction")
    });
    Settings::instance().reset_failure_policy();

    assert!(matches!(once_result, Err(Error::Construction { .. })));
    assert!(matches!(guarded_result, Err(Error::Construction { .. })));
    assert!(late_once.is_poisoned());
    assert!(late_guarded.is_poisoned());
    assert_eq!(Settings::instance().failure_policy(), FailurePolicy::Retry);
}
