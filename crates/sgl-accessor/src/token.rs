//! Construction capability for singleton types.
//!
//! A constructor that takes an [`AccessToken<Self>`] can be `pub` and still be
//! unreachable for ordinary code: the token has no public constructor, and
//! the only place one is minted is [`Singleton::try_instance`], which passes
//! it straight to the type's own `construct`.
//!
//! [`Singleton::try_instance`]: crate::Singleton::try_instance
//!
//! Forging a token outside this crate does not compile:
//!
//! ```compile_fail
//! use sgl_accessor::AccessToken;
//!
//! struct Journal;
//! let _token: AccessToken<Journal> = AccessToken::new();
//! ```
//!
//! ```compile_fail
//! use sgl_accessor::AccessToken;
//!
//! struct Journal;
//! let _token: AccessToken<Journal> = AccessToken { _capability: std::marker::PhantomData };
//! ```
//!
//! Nor can a token be defaulted or duplicated:
//!
//! ```compile_fail
//! use sgl_accessor::AccessToken;
//!
//! struct Journal;
//! let _token: AccessToken<Journal> = Default::default();
//! ```
//!
//! ```compile_fail
//! use sgl_accessor::AccessToken;
//!
//! struct Journal;
//! fn twice(token: AccessToken<Journal>) -> (AccessToken<Journal>, AccessToken<Journal>) {
//!     (token.clone(), token)
//! }
//! ```

use std::fmt;
use std::marker::PhantomData;

/// Proof that the caller is `T`'s own singleton constructor.
///
/// Zero-sized; the type parameter stops a token minted for one type from
/// being used to construct another.
pub struct AccessToken<T: ?Sized> {
    _capability: PhantomData<fn() -> T>,
}

impl<T: ?Sized> AccessToken<T> {
    pub(crate) const fn new() -> Self {
        Self {
            _capability: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for AccessToken<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken<{}>", std::any::type_name::<T>())
    }
}
