//! Keystroke injector implementations.
//!
//! Three implementations of the
//! [`KeystrokeInjector`](crate::application::KeystrokeInjector) seam:
//!
//! - [`enigo::EnigoInjector`] — real OS input synthesis (feature `"enigo"`,
//!   enabled by default).
//! - [`noop::NoOpInjector`] — logs and does nothing; used when the real
//!   injector cannot start (headless build, no display).
//! - [`mock::RecordingInjector`] — records calls for test assertions.

pub mod mock;
pub mod noop;

#[cfg(feature = "enigo")]
pub mod enigo;

use std::sync::Arc;

use crate::application::KeystrokeInjector;

/// Creates the best available keystroke injector.
///
/// With the `enigo` feature enabled (the default), this tries to open a
/// connection to the OS input system.  If that fails — typically because
/// there is no display session — the relay still starts, with a
/// [`noop::NoOpInjector`] that logs each message instead of typing it.
pub fn create_injector() -> Arc<dyn KeystrokeInjector> {
    #[cfg(feature = "enigo")]
    {
        match enigo::EnigoInjector::new() {
            Ok(injector) => {
                tracing::info!("keystroke injector ready (enigo)");
                return Arc::new(injector);
            }
            Err(e) => {
                tracing::warn!("failed to initialise enigo injector, falling back to noop: {e}");
            }
        }
    }
    Arc::new(noop::NoOpInjector)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_factory_always_yields_a_usable_injector() {
        // With or without a display, the factory must hand back something
        // that accepts a type_text call (noop fallback at worst).
        let injector = create_injector();
        assert!(injector.type_text("", Duration::ZERO).is_ok());
    }
}
