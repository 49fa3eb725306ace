//! Eager singleton.
//!
//! The instance is a `static` built by a `const fn`, so it exists before the
//! program starts running.  There is no first-access race to guard against
//! and no construction cost at run time; the trade-off is that the value must
//! be computable at compile time.

/// Hard limits shared by the whole process.
#[derive(Debug, PartialEq, Eq)]
pub struct Limits {
    max_sessions: usize,
    max_payload_bytes: usize,
    max_retries: u32,
}

/// The single [`Limits`] instance.
static LIMITS: Limits = Limits::DEFAULT;

impl Limits {
    const DEFAULT: Limits = Limits {
        max_sessions: 256,
        max_payload_bytes: 4 * 1024 * 1024,
        max_retries: 3,
    };

    /// Return the process-wide instance.
    #[inline]
    pub fn instance() -> &'static Limits {
        &LIMITS
    }

    /// Maximum number of concurrent sessions.
    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    /// Maximum size of a single payload in bytes.
    pub fn max_payload_bytes(&self) -> usize {
        self.max_payload_bytes
    }

    /// How many times a failed operation is retried.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// `true` if a payload of `len` bytes is within limits.
    pub fn accepts_payload(&self, len: usize) -> bool {
        len <= self.max_payload_bytes
    }
}
