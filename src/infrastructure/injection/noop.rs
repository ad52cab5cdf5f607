//! Logging-only keystroke injector.
//!
//! Used when real injection is unavailable: headless builds
//! (`--no-default-features`) and machines without a display session.  The
//! relay keeps serving — messages are received, logged, and discarded — so
//! connection handling can be exercised anywhere.

use std::time::Duration;

use tracing::debug;

use crate::application::{InjectionError, KeystrokeInjector};

/// An injector that logs each call and performs no OS input.
pub struct NoOpInjector;

impl KeystrokeInjector for NoOpInjector {
    fn type_text(&self, text: &str, _key_interval: Duration) -> Result<(), InjectionError> {
        // Log the length, not the content — received text may be sensitive.
        debug!("[noop] would type {} chars", text.chars().count());
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_injector_always_succeeds() {
        let injector = NoOpInjector;
        assert!(injector.type_text("hello", Duration::ZERO).is_ok());
        assert!(injector.type_text("", Duration::from_millis(5)).is_ok());
    }
}
