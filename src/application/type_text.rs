//! TypeText use case: forwards received message text to the keystroke injector.
//!
//! This use case sits at the application layer and delegates to a
//! [`KeystrokeInjector`] trait object for OS-level keystroke synthesis.
//! The platform-specific implementations live in the infrastructure layer.
//!
//! There is intentionally no transformation step: the relay's contract is
//! "whatever text arrives is typed verbatim".  The use case exists so the
//! session loop in the infrastructure layer talks to a seam that tests can
//! replace with a recording double.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

/// Error type for keystroke injection operations.
#[derive(Debug, Error)]
pub enum InjectionError {
    /// The OS automation call failed (e.g., no display or focus available).
    #[error("platform error: {0}")]
    Platform(String),
    /// The injector could not be constructed at all.
    #[error("injector unavailable: {0}")]
    Unavailable(String),
}

/// Platform-agnostic keystroke injection trait.
///
/// Synthesizes one key press-and-release event per character of `text` into
/// whichever application currently holds input focus, waiting `key_interval`
/// between characters.  A zero interval means "as fast as the OS allows".
///
/// Each supported backend provides an implementation in the infrastructure
/// layer (`enigo`, `noop`, and the test-only `mock`).
pub trait KeystrokeInjector: Send + Sync {
    /// Types `text` into the focused window.
    ///
    /// An empty `text` must be a no-op that still returns `Ok(())`: zero
    /// characters means zero key events, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`InjectionError`] if the OS event synthesis fails.
    fn type_text(&self, text: &str, key_interval: Duration) -> Result<(), InjectionError>;
}

/// The TypeText use case.
///
/// Receives message payloads from the session loop and dispatches them to the
/// injector with the configured key interval.  One instance is shared by all
/// sessions; the injector itself serializes access to the OS keyboard state.
pub struct TypeText {
    injector: Arc<dyn KeystrokeInjector>,
    key_interval: Duration,
}

impl TypeText {
    /// Creates a new use case with the given injector and key interval.
    pub fn new(injector: Arc<dyn KeystrokeInjector>, key_interval: Duration) -> Self {
        Self {
            injector,
            key_interval,
        }
    }

    /// Types one message's text, unmodified.
    ///
    /// The call returns only after the injector has finished, which is what
    /// gives each session its in-order emission guarantee: the session loop
    /// does not read frame N+1 until this call for frame N has returned.
    ///
    /// # Errors
    ///
    /// Returns [`InjectionError`] if the OS keystroke synthesis fails.  The
    /// caller treats this as fatal for that session only.
    pub fn type_message(&self, text: &str) -> Result<(), InjectionError> {
        self.injector.type_text(text, self.key_interval)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // ── Recording injector ────────────────────────────────────────────────────

    #[derive(Default)]
    struct RecordingInjector {
        typed: Mutex<Vec<(String, Duration)>>,
        should_fail: bool,
    }

    impl KeystrokeInjector for RecordingInjector {
        fn type_text(&self, text: &str, key_interval: Duration) -> Result<(), InjectionError> {
            if self.should_fail {
                return Err(InjectionError::Platform("injected failure".to_string()));
            }
            self.typed
                .lock()
                .unwrap()
                .push((text.to_string(), key_interval));
            Ok(())
        }
    }

    fn make_use_case(key_interval: Duration) -> (TypeText, Arc<RecordingInjector>) {
        let injector = Arc::new(RecordingInjector::default());
        let uc = TypeText::new(
            Arc::clone(&injector) as Arc<dyn KeystrokeInjector>,
            key_interval,
        );
        (uc, injector)
    }

    // ── Forwarding ────────────────────────────────────────────────────────────

    #[test]
    fn test_type_message_forwards_text_verbatim() {
        // Arrange
        let (uc, inj) = make_use_case(Duration::ZERO);

        // Act
        uc.type_message("hello").unwrap();

        // Assert — exactly one injection call with the exact text and zero delay
        let typed = inj.typed.lock().unwrap();
        assert_eq!(*typed, vec![("hello".to_string(), Duration::ZERO)]);
    }

    #[test]
    fn test_type_message_preserves_order() {
        // Arrange
        let (uc, inj) = make_use_case(Duration::ZERO);

        // Act — two messages in sequence
        uc.type_message("a").unwrap();
        uc.type_message("b").unwrap();

        // Assert — injector saw them in send order
        let typed = inj.typed.lock().unwrap();
        assert_eq!(typed[0].0, "a");
        assert_eq!(typed[1].0, "b");
    }

    #[test]
    fn test_type_message_passes_configured_interval() {
        // Arrange
        let (uc, inj) = make_use_case(Duration::from_millis(7));

        // Act
        uc.type_message("x").unwrap();

        // Assert
        assert_eq!(inj.typed.lock().unwrap()[0].1, Duration::from_millis(7));
    }

    #[test]
    fn test_type_message_forwards_empty_text() {
        // Arrange — an empty frame is still one injection call (a no-op one)
        let (uc, inj) = make_use_case(Duration::ZERO);

        // Act
        uc.type_message("").unwrap();

        // Assert
        assert_eq!(inj.typed.lock().unwrap()[0].0, "");
    }

    #[test]
    fn test_type_message_forwards_unicode_unmodified() {
        // Arrange — non-ASCII and control characters pass through untouched
        let (uc, inj) = make_use_case(Duration::ZERO);

        // Act
        uc.type_message("héllo\tworld\u{1F600}").unwrap();

        // Assert
        assert_eq!(inj.typed.lock().unwrap()[0].0, "héllo\tworld\u{1F600}");
    }

    #[test]
    fn test_type_message_propagates_injector_error() {
        // Arrange
        let injector = Arc::new(RecordingInjector {
            should_fail: true,
            ..Default::default()
        });
        let uc = TypeText::new(
            Arc::clone(&injector) as Arc<dyn KeystrokeInjector>,
            Duration::ZERO,
        );

        // Act
        let result = uc.type_message("hello");

        // Assert — the error reaches the caller; nothing was recorded
        assert!(matches!(result, Err(InjectionError::Platform(_))));
        assert!(injector.typed.lock().unwrap().is_empty());
    }
}
