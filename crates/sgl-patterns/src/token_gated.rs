//! Singleton with a public, token-gated constructor.
//!
//! `Journal::new` is `pub`, yet only `Journal::instance()` can call it: it
//! requires an [`AccessToken<Journal>`], and the only token for `Journal` is
//! the one the [`Singleton`] base hands to `Journal::construct`.  No
//! privileged relationship has to be declared between the type and its
//! accessor.
//!
//! ```compile_fail
//! use sgl_accessor::AccessToken;
//! use sgl_patterns::Journal;
//!
//! let forged = Journal::new(AccessToken::new());
//! ```
//!
//! A token for another type does not fit either:
//!
//! ```compile_fail
//! use sgl_accessor::{AccessToken, Singleton};
//! use sgl_patterns::{Catalog, Journal};
//!
//! fn smuggle(token: AccessToken<Catalog>) -> Journal {
//!     Journal::new(token)
//! }
//! ```
//!
//! A second accessor has no token to pass on:
//!
//! ```compile_fail
//! use sgl_accessor::LazyAccessor;
//! use sgl_patterns::Journal;
//!
//! static SECOND: LazyAccessor<Journal> = LazyAccessor::new(|token| Ok(Journal::new(token)));
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use sgl_accessor::{AccessToken, Singleton};
use sgl_core::{Result, LOG_TARGET};

static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

/// Process-wide append-only log of notable events.
#[derive(Debug)]
pub struct Journal {
    title: &'static str,
    entries: Mutex<Vec<String>>,
}

impl Journal {
    /// Title every journal is created with.
    pub const TITLE: &'static str = "process journal";

    /// Create the journal.  Callable only with the token `instance()` mints.
    pub fn new(_token: AccessToken<Self>) -> Self {
        CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(target: LOG_TARGET, "Journal constructed");
        Self {
            title: Self::TITLE,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// How many times the constructor has run in this process.
    pub fn constructions() -> usize {
        CONSTRUCTIONS.load(Ordering::SeqCst)
    }

    /// Title set by the constructor.
    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Append an entry, returning its position.
    pub fn record(&self, entry: impl Into<String>) -> usize {
        let mut entries = self.entries.lock().expect("Journal mutex poisoned");
        entries.push(entry.into());
        entries.len() - 1
    }

    /// Copy of every entry recorded so far, in order.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().expect("Journal mutex poisoned").clone()
    }
}

impl Singleton for Journal {
    sgl_accessor::singleton_slot!(Journal);

    fn construct(token: AccessToken<Self>) -> Result<Self> {
        Ok(Self::new(token))
    }
}
