//! Lazy singleton stored in a function-local static.
//!
//! The slot is declared inside `instance()` itself, so nothing else in the
//! module can even name it.  Guaranteed one-time initialisation makes
//! concurrent first callers wait for the winner; there is no explicit lock
//! or flag in this file.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use sgl_accessor::{InitSlot, OnceSlot};
use sgl_core::LOG_TARGET;

static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

/// Facts about the running build, captured on first access.
#[derive(Debug)]
pub struct BuildInfo {
    package: &'static str,
    version: &'static str,
    started: Instant,
}

impl BuildInfo {
    fn capture() -> Self {
        CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        let info = Self {
            package: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            started: Instant::now(),
        };
        tracing::debug!(target: LOG_TARGET, package = info.package, version = info.version, "BuildInfo captured");
        info
    }

    /// Return the process-wide instance, capturing it on first use.
    pub fn instance() -> &'static BuildInfo {
        static INSTANCE: OnceSlot<BuildInfo> = OnceSlot::new();
        INSTANCE.get_or_init(Self::capture)
    }

    /// How many times the constructor has run in this process.
    pub fn constructions() -> usize {
        CONSTRUCTIONS.load(Ordering::SeqCst)
    }

    /// Name of the package that defines this type.
    pub fn package(&self) -> &'static str {
        self.package
    }

    /// Version of that package.
    pub fn version(&self) -> &'static str {
        self.version
    }

    /// Time since the instance was first requested.
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_package_metadata() {
        let info = BuildInfo::instance();
        assert_eq!(info.package(), "sgl-patterns");
        assert!(!info.version().is_empty());
    }

    #[test]
    fn start_time_is_fixed_at_first_access() {
        let first = BuildInfo::instance().started;
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(BuildInfo::instance().started, first);
        assert!(BuildInfo::instance().uptime() >= Duration::from_millis(5));
        assert_eq!(BuildInfo::constructions(), 1);
    }
}
