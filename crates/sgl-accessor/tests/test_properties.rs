//! Property tests: uniqueness and visibility hold for any thread count and
//! any value the constructor chooses.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Barrier, Mutex};
use std::thread;

use proptest::prelude::*;
use sgl_accessor::{FailurePolicy, GuardedSlot, InitSlot, OnceSlot};

#[derive(Debug)]
struct Stamp {
    value: u64,
    label: String,
}

fn hammer<S: InitSlot<Stamp> + Sync>(slot: &S, threads: usize, value: u64) -> (usize, HashSet<usize>) {
    let builds = AtomicUsize::new(0);
    let barrier = Barrier::new(threads);
    let addresses = Mutex::new(HashSet::new());
    thread::scope(|scope| {
        for _ in 0..threads {
            scope.spawn(|| {
                barrier.wait();
                let stamp = slot.get_or_init(|| {
                    builds.fetch_add(1, Ordering::SeqCst);
                    Stamp {
                        value,
                        label: format!("stamp-{value}"),
                    }
                });
                assert_eq!(stamp.value, value);
                assert_eq!(stamp.label, format!("stamp-{value}"));
                addresses.lock().unwrap().insert(stamp as *const Stamp as usize);
            });
        }
    });
    (builds.into_inner(), addresses.into_inner().unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn once_slot_single_construction(threads in 2usize..24, value in any::<u64>()) {
        let slot: OnceSlot<Stamp> = OnceSlot::with_policy(FailurePolicy::Retry);
        let (builds, addresses) = hammer(&slot, threads, value);
        prop_assert_eq!(builds, 1);
        prop_assert_eq!(addresses.len(), 1);
        prop_assert_eq!(slot.get().map(|s| s.value), Some(value));
    }

    #[test]
    fn guarded_slot_single_construction(threads in 2usize..24, value in any::<u64>()) {
        let slot: GuardedSlot<Stamp> = GuardedSlot::with_policy(FailurePolicy::Retry);
        let (builds, addresses) = hammer(&slot, threads, value);
        prop_assert_eq!(builds, 1);
        prop_assert_eq!(addresses.len(), 1);
        prop_assert_eq!(slot.get().map(|s| s.value), Some(value));
    }

    #[test]
    fn later_constructors_are_ignored(first in any::<u32>(), rest in proptest::collection::vec(any::<u32>(), 1..64)) {
        let slot: GuardedSlot<u32> = GuardedSlot::with_policy(FailurePolicy::Retry);
        prop_assert_eq!(*slot.get_or_init(|| first), first);
        for candidate in rest {
            prop_assert_eq!(*slot.get_or_init(|| candidate), first);
        }
    }
}
