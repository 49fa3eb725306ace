//! Singleton built on the generic [`Singleton`] base with a private
//! constructor.
//!
//! `Catalog::load` is private to this module.  The only path from outside to
//! a `Catalog` is `Catalog::instance()`, supplied by the base trait, which
//! calls `construct` with a token nobody else can produce.  The slot behind
//! it can be inspected but not filled.
//!
//! ```compile_fail
//! use sgl_patterns::Catalog;
//!
//! let second = Catalog::load();
//! ```
//!
//! ```compile_fail
//! use sgl_accessor::{AccessToken, Singleton};
//! use sgl_patterns::Catalog;
//!
//! let second = Catalog::construct(AccessToken::new());
//! ```
//!
//! ```compile_fail
//! use sgl_accessor::{LazyAccessor, Singleton};
//! use sgl_patterns::Catalog;
//!
//! static SECOND: LazyAccessor<Catalog> = LazyAccessor::new(<Catalog as Singleton>::construct);
//! ```
//!
//! ```compile_fail
//! use sgl_accessor::{InitSlot, Singleton};
//! use sgl_patterns::Catalog;
//!
//! let _ = Catalog::slot().get_or_try_init(|| Err::<Catalog, _>("blocked"));
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use sgl_accessor::{AccessToken, Singleton};
use sgl_core::{ensure, Result, LOG_TARGET};

static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

/// Entries every catalog starts with.
const SEED: [(&str, &str); 3] = [
    ("eur", "Euro"),
    ("gbp", "Pound sterling"),
    ("usd", "US dollar"),
];

/// Process-wide, thread-safe code → description registry.
///
/// The registry is mutable after construction; the `RwLock` inside makes
/// that safe, independently of how the instance itself was created.
#[derive(Debug)]
pub struct Catalog {
    entries: RwLock<BTreeMap<String, String>>,
}

impl Catalog {
    fn load() -> Result<Self> {
        CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        let entries: BTreeMap<String, String> = SEED
            .iter()
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect();
        ensure!(
            entries.len() == SEED.len(),
            "duplicate code in catalog seed"
        );
        tracing::debug!(target: LOG_TARGET, entries = entries.len(), "Catalog loaded");
        Ok(Self {
            entries: RwLock::new(entries),
        })
    }

    /// How many times the constructor has run in this process.
    pub fn constructions() -> usize {
        CONSTRUCTIONS.load(Ordering::SeqCst)
    }

    /// Description registered under `code`.
    pub fn lookup(&self, code: &str) -> Option<String> {
        self.entries
            .read()
            .expect("Catalog lock poisoned")
            .get(code)
            .cloned()
    }

    /// Register or replace an entry, returning the previous description.
    pub fn register(&self, code: impl Into<String>, name: impl Into<String>) -> Option<String> {
        self.entries
            .write()
            .expect("Catalog lock poisoned")
            .insert(code.into(), name.into())
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.read().expect("Catalog lock poisoned").len()
    }

    /// `true` if no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All codes in sorted order.
    pub fn codes(&self) -> Vec<String> {
        self.entries
            .read()
            .expect("Catalog lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

impl Singleton for Catalog {
    sgl_accessor::singleton_slot!(Catalog);

    fn construct(_token: AccessToken<Self>) -> Result<Self> {
        Self::load()
    }
}
