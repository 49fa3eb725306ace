//! Instance lifetime: the slot owns the instance and drops it exactly once,
//! after every borrower is gone.  A `static` slot is never dropped.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use sgl_accessor::{FailurePolicy, GuardedSlot, InitSlot, LazyAccessor, OnceSlot};

struct Tracked<'a> {
    drops: &'a AtomicUsize,
    uses: &'a AtomicUsize,
}

impl Tracked<'_> {
    fn touch(&self) {
        // A use after teardown would observe a non-zero drop count.
        assert_eq!(self.drops.load(Ordering::SeqCst), 0);
        self.uses.fetch_add(1, Ordering::SeqCst);
    }
}

impl Drop for Tracked<'_> {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn once_slot_drops_after_last_use() {
    let drops = AtomicUsize::new(0);
    let uses = AtomicUsize::new(0);
    let slot: OnceSlot<Tracked<'_>> = OnceSlot::with_policy(FailurePolicy::Retry);

    thread::scope(|scope| {
        for _ in 0..32 {
            scope.spawn(|| {
                slot.get_or_init(|| Tracked { drops: &drops, uses: &uses }).touch();
            });
        }
    });

    assert_eq!(uses.load(Ordering::SeqCst), 32);
    assert_eq!(drops.load(Ordering::SeqCst), 0);
    drop(slot);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn guarded_slot_drops_after_last_use() {
    let drops = AtomicUsize::new(0);
    let uses = AtomicUsize::new(0);
    let slot: GuardedSlot<Tracked<'_>> = GuardedSlot::with_policy(FailurePolicy::Retry);

    thread::scope(|scope| {
        for _ in 0..32 {
            scope.spawn(|| {
                slot.get_or_init(|| Tracked { drops: &drops, uses: &uses }).touch();
            });
        }
    });

    assert_eq!(uses.load(Ordering::SeqCst), 32);
    assert_eq!(drops.load(Ordering::SeqCst), 0);
    drop(slot);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn never_constructed_means_never_dropped() {
    let drops = AtomicUsize::new(0);
    let slot: GuardedSlot<Tracked<'_>> = GuardedSlot::new();
    assert!(slot.get().is_none());
    drop(slot);
    assert_eq!(drops.load(Ordering::SeqCst), 0);
}

static STATIC_DROPS: AtomicUsize = AtomicUsize::new(0);

struct Resident;

impl Drop for Resident {
    fn drop(&mut self) {
        STATIC_DROPS.fetch_add(1, Ordering::SeqCst);
    }
}

static RESIDENT: LazyAccessor<Resident> = LazyAccessor::new(|| Ok(Resident));

#[test]
fn static_instance_outlives_every_caller() {
    let first = RESIDENT.instance() as *const Resident as usize;
    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| RESIDENT.instance() as *const Resident as usize))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), first);
    }
    assert_eq!(STATIC_DROPS.load(Ordering::SeqCst), 0);
}
