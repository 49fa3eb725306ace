//! What a slot does after its constructor fails.

use std::fmt;

/// Behaviour of a slot after a failed construction.
///
/// | Policy | Failing caller | Waiting and later callers | Constructor re-run |
/// |--------|----------------|---------------------------|--------------------|
/// | `Retry` | `Error::Construction` | try again | yes |
/// | `Poison` | `Error::Construction` | `Error::Poisoned` | never |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FailurePolicy {
    /// Leave the slot empty so the next caller attempts construction again.
    #[default]
    Retry,
    /// Remember the failure; the constructor is never invoked again.
    Poison,
}

impl FailurePolicy {
    pub(crate) const fn to_u8(self) -> u8 {
        match self {
            FailurePolicy::Retry => 0,
            FailurePolicy::Poison => 1,
        }
    }

    pub(crate) const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => FailurePolicy::Poison,
            _ => FailurePolicy::Retry,
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Retry => f.write_str("retry"),
            FailurePolicy::Poison => f.write_str("poison"),
        }
    }
}
