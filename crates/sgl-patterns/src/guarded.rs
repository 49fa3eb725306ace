//! Lazy singleton embedded directly in its type, using double-checked
//! locking.
//!
//! `IdGenerator` owns a [`GuardedSlot`] and builds itself through a private
//! constructor on first use.  The slot's pointer is published with
//! `Release` and read with `Acquire`, which is what a hand-written version
//! with a plain pointer and a plain flag gets wrong.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use sgl_accessor::{GuardedSlot, InitSlot};
use sgl_core::LOG_TARGET;

static INSTANCE: GuardedSlot<IdGenerator> = GuardedSlot::new();
static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

/// Process-wide generator of monotonically increasing identifiers.
#[derive(Debug)]
pub struct IdGenerator {
    prefix: &'static str,
    next: AtomicU64,
}

impl IdGenerator {
    /// First value handed out by [`next_raw`][Self::next_raw].
    pub const FIRST_ID: u64 = 1000;

    fn new() -> Self {
        CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(target: LOG_TARGET, "IdGenerator constructed");
        Self {
            prefix: "id",
            next: AtomicU64::new(Self::FIRST_ID),
        }
    }

    /// Return the process-wide instance, creating it on first use.
    pub fn instance() -> &'static IdGenerator {
        INSTANCE.get_or_init(Self::new)
    }

    /// How many times the constructor has run in this process.
    pub fn constructions() -> usize {
        CONSTRUCTIONS.load(Ordering::SeqCst)
    }

    /// Next numeric identifier.
    pub fn next_raw(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Next identifier rendered with the generator's prefix.
    pub fn next_id(&self) -> String {
        format!("{}-{}", self.prefix, self.next_raw())
    }
}
