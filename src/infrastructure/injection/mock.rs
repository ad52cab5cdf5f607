//! Recording keystroke injector for tests.
//!
//! # Why a mock injector?
//!
//! The real injector ([`EnigoInjector`](super::enigo::EnigoInjector)) makes
//! OS API calls that:
//!
//! - Require a desktop session to run.
//! - Actually press keys on the test machine.
//! - Cannot be observed directly from Rust test code.
//!
//! The `RecordingInjector` replaces the OS calls with in-memory recording.
//! Each call is pushed into a `Mutex<Vec<...>>` so test assertions can
//! inspect exactly what was typed and in what order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let injector = Arc::new(RecordingInjector::new());
//! let typer = TypeText::new(Arc::clone(&injector) as _, Duration::ZERO);
//!
//! typer.type_message("hello").unwrap();
//!
//! let typed = injector.typed.lock().unwrap();
//! assert_eq!(typed[0].0, "hello");
//! ```
//!
//! # `should_fail` flag
//!
//! Set `should_fail = true` before calling to simulate OS failures.  This
//! lets you test error-handling paths without needing a broken OS.

use std::sync::Mutex;
use std::time::Duration;

use crate::application::{InjectionError, KeystrokeInjector};

/// An injector that records all calls without performing OS input.
///
/// The record lives in a `Mutex<Vec<...>>` so tests can safely share the
/// injector across threads (e.g., when wrapping it in an `Arc` and handing
/// it to the relay).
#[derive(Default)]
pub struct RecordingInjector {
    /// Records each `(text, key_interval)` pair passed to `type_text`,
    /// in call order.
    pub typed: Mutex<Vec<(String, Duration)>>,
    /// When `true`, every call immediately returns an
    /// [`InjectionError::Platform`].  Use this to test error-handling paths
    /// in callers.
    pub should_fail: bool,
}

impl RecordingInjector {
    /// Creates a new `RecordingInjector` with an empty record and
    /// `should_fail = false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the texts typed so far, in call order.
    pub fn typed_texts(&self) -> Vec<String> {
        self.typed
            .lock()
            .unwrap()
            .iter()
            .map(|(text, _)| text.clone())
            .collect()
    }
}

impl KeystrokeInjector for RecordingInjector {
    /// Records the call, or returns an error if `should_fail` is set.
    fn type_text(&self, text: &str, key_interval: Duration) -> Result<(), InjectionError> {
        if self.should_fail {
            return Err(InjectionError::Platform("mock failure".into()));
        }
        self.typed
            .lock()
            .unwrap()
            .push((text.to_string(), key_interval));
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_injector_records_in_order() {
        // Arrange
        let injector = RecordingInjector::new();

        // Act
        injector.type_text("a", Duration::ZERO).unwrap();
        injector.type_text("b", Duration::from_millis(1)).unwrap();

        // Assert
        assert_eq!(injector.typed_texts(), vec!["a", "b"]);
        assert_eq!(injector.typed.lock().unwrap()[1].1, Duration::from_millis(1));
    }

    #[test]
    fn test_recording_injector_should_fail_returns_platform_error() {
        // Arrange
        let injector = RecordingInjector {
            should_fail: true,
            ..Default::default()
        };

        // Act
        let result = injector.type_text("a", Duration::ZERO);

        // Assert — error surfaced, nothing recorded
        assert!(matches!(result, Err(InjectionError::Platform(_))));
        assert!(injector.typed.lock().unwrap().is_empty());
    }
}
