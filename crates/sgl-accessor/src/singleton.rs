//! Generic singleton base.
//!
//! [`Singleton`] plays the role of a base class parameterised by the concrete
//! type: the implementor supplies a storage slot (generated by
//! [`singleton_slot!`]) and a constructor taking an [`AccessToken<Self>`]; the
//! trait supplies `instance()`.  The token is minted in exactly one place,
//! [`Singleton::try_instance`], and handed straight to `Self::construct`.
//! Coherence means only the crate that defines a type can implement
//! `Singleton` for it, so `construct` may be public and is still unusable
//! from the outside.  The [`SingletonSlot`] behind `slot()` is read-only to
//! everyone else.
//!
//! The instance lives in a `static`, and Rust never drops statics: its
//! destructor does not run at process exit, and resources it holds are
//! reclaimed by the operating system.  A type that must flush or release
//! something on shutdown needs an explicit method for it.
//!
//! ```
//! use sgl_accessor::{AccessToken, Singleton};
//!
//! mod catalog {
//!     use sgl_accessor::{AccessToken, Singleton};
//!
//!     pub struct Catalog {
//!         entries: Vec<&'static str>,
//!     }
//!
//!     impl Catalog {
//!         fn load() -> Self {
//!             Self { entries: vec!["bonds", "swaps"] }
//!         }
//!
//!         pub fn entries(&self) -> &[&'static str] {
//!             &self.entries
//!         }
//!     }
//!
//!     impl Singleton for Catalog {
//!         sgl_accessor::singleton_slot!(Catalog);
//!
//!         fn construct(_token: AccessToken<Self>) -> sgl_accessor::Result<Self> {
//!             Ok(Self::load())
//!         }
//!     }
//! }
//!
//! use catalog::Catalog;
//!
//! assert!(Catalog::get().is_none());
//! assert_eq!(Catalog::instance().entries(), ["bonds", "swaps"]);
//! assert!(std::ptr::eq(Catalog::instance(), Catalog::instance()));
//! ```
//!
//! Code outside the accessor cannot build an instance, copy one out, or
//! overwrite it:
//!
//! ```compile_fail
//! # use sgl_accessor::{AccessToken, Singleton};
//! # pub struct Catalog;
//! # impl Singleton for Catalog {
//! #     sgl_accessor::singleton_slot!(Catalog);
//! #     fn construct(_token: AccessToken<Self>) -> sgl_accessor::Result<Self> { Ok(Catalog) }
//! # }
//! let second = Catalog::construct(AccessToken::new());
//! ```
//!
//! ```compile_fail
//! # use sgl_accessor::{AccessToken, Singleton};
//! # mod catalog {
//! #     use sgl_accessor::{AccessToken, Singleton};
//! #     pub struct Catalog { entries: Vec<&'static str> }
//! #     impl Singleton for Catalog {
//! #         sgl_accessor::singleton_slot!(Catalog);
//! #         fn construct(_token: AccessToken<Self>) -> sgl_accessor::Result<Self> {
//! #             Ok(Catalog { entries: Vec::new() })
//! #         }
//! #     }
//! # }
//! # use catalog::Catalog;
//! let second = Catalog { entries: Vec::new() };
//! ```
//!
//! ```compile_fail
//! # use sgl_accessor::{AccessToken, Singleton};
//! # pub struct Catalog;
//! # impl Singleton for Catalog {
//! #     sgl_accessor::singleton_slot!(Catalog);
//! #     fn construct(_token: AccessToken<Self>) -> sgl_accessor::Result<Self> { Ok(Catalog) }
//! # }
//! let owned: Catalog = *Catalog::instance();
//! ```
//!
//! ```compile_fail
//! # use sgl_accessor::{AccessToken, Singleton};
//! # pub struct Catalog;
//! # impl Singleton for Catalog {
//! #     sgl_accessor::singleton_slot!(Catalog);
//! #     fn construct(_token: AccessToken<Self>) -> sgl_accessor::Result<Self> { Ok(Catalog) }
//! # }
//! let copy: Catalog = Catalog::instance().clone();
//! ```
//!
//! ```compile_fail
//! # use sgl_accessor::{AccessToken, InitSlot, Singleton};
//! # pub struct Catalog;
//! # impl Singleton for Catalog {
//! #     sgl_accessor::singleton_slot!(Catalog);
//! #     fn construct(_token: AccessToken<Self>) -> sgl_accessor::Result<Self> { Ok(Catalog) }
//! # }
//! let _ = Catalog::slot().get_or_try_init(|| Err::<Catalog, _>("poisoned from outside"));
//! ```
//!
//! ```compile_fail
//! # use sgl_accessor::{AccessToken, Singleton};
//! # pub struct Catalog(u32);
//! # impl Singleton for Catalog {
//! #     sgl_accessor::singleton_slot!(Catalog);
//! #     fn construct(_token: AccessToken<Self>) -> sgl_accessor::Result<Self> { Ok(Catalog(1)) }
//! # }
//! let slot: &mut Catalog = Catalog::instance();
//! ```

use std::fmt;

use sgl_core::{FailurePolicy, Result};

use crate::slot::{InitSlot, OnceSlot};
use crate::token::AccessToken;

/// Storage behind a [`Singleton`] implementation.
///
/// Anyone may inspect it, but only [`Singleton::try_instance`] can fill it.
pub struct SingletonSlot<T> {
    inner: OnceSlot<T>,
}

impl<T> SingletonSlot<T> {
    /// An empty slot that follows the process-wide default failure policy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: OnceSlot::new(),
        }
    }

    /// An empty slot with a fixed failure policy.
    #[must_use]
    pub const fn with_policy(policy: FailurePolicy) -> Self {
        Self {
            inner: OnceSlot::with_policy(policy),
        }
    }

    /// Return the instance if it has been constructed.
    pub fn get(&self) -> Option<&T> {
        self.inner.get()
    }

    /// `true` once an instance has been constructed.
    pub fn is_initialized(&self) -> bool {
        self.inner.is_initialized()
    }

    /// `true` after a failure under [`FailurePolicy::Poison`].
    pub fn is_poisoned(&self) -> bool {
        self.inner.is_poisoned()
    }

    /// Failure policy in effect for the next construction attempt.
    pub fn policy(&self) -> FailurePolicy {
        self.inner.policy()
    }
}

impl<T> Default for SingletonSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SingletonSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonSlot")
            .field("value", &self.get())
            .field("poisoned", &self.is_poisoned())
            .finish()
    }
}

/// Base for types with exactly one process-wide instance.
///
/// Implementations are statically dispatched: each implementor owns its own
/// slot, so `Catalog::instance()` and `Journal::instance()` never share
/// state.
pub trait Singleton: Sized + Send + Sync + 'static {
    /// Storage for the instance.  Generate with [`singleton_slot!`].
    fn slot() -> &'static SingletonSlot<Self>;

    /// Build the instance.  Called at most once per successful construction,
    /// and only by this trait's provided methods.
    fn construct(token: AccessToken<Self>) -> Result<Self>;

    /// Return the instance, constructing it on first use.
    ///
    /// # Panics
    ///
    /// If construction fails or the slot is poisoned.
    fn instance() -> &'static Self {
        match Self::try_instance() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Return the instance, constructing it on first use.
    fn try_instance() -> Result<&'static Self> {
        Self::slot()
            .inner
            .get_or_try_init(|| Self::construct(AccessToken::new()))
    }

    /// Return the instance if it has already been constructed.
    fn get() -> Option<&'static Self> {
        Self::slot().get()
    }

    /// `true` once the instance exists.
    fn is_initialized() -> bool {
        Self::slot().is_initialized()
    }
}

/// Implement [`Singleton::slot`] with a dedicated `static` [`SingletonSlot`].
///
/// Use inside an `impl Singleton for Type` block.  The optional
/// `policy = ..` argument fixes the slot's
/// [`FailurePolicy`][sgl_core::FailurePolicy]; without it the slot follows
/// the process-wide default.
///
/// A `static` cannot depend on generic parameters, so generic types must
/// write `slot()` by hand for each concrete instantiation.
#[macro_export]
macro_rules! singleton_slot {
    ($ty:ty) => {
        fn slot() -> &'static $crate::SingletonSlot<$ty> {
            static SLOT: $crate::SingletonSlot<$ty> = $crate::SingletonSlot::new();
            &SLOT
        }
    };
    ($ty:ty, policy = $policy:expr) => {
        fn slot() -> &'static $crate::SingletonSlot<$ty> {
            static SLOT: $crate::SingletonSlot<$ty> = $crate::SingletonSlot::with_policy($policy);
            &SLOT
        }
    };
}
