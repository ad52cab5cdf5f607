//! Real OS keystroke injection via the `enigo` crate.
//!
//! `enigo` abstracts over the platform input-synthesis APIs:
//!
//! | Platform | Backing API                  |
//! |----------|------------------------------|
//! | Windows  | `SendInput`                  |
//! | Linux    | X11 XTest / Wayland virtual keyboard |
//! | macOS    | CGEvent                      |
//!
//! The synthesized events are delivered to whichever window currently holds
//! input focus, exactly like physical keystrokes — the receiving application
//! cannot distinguish them from real typing.
//!
//! # Permissions
//!
//! - macOS requires the Accessibility permission for the process.
//! - Linux requires an X11 session (or a Wayland compositor that implements
//!   the virtual-keyboard protocol).
//! - If no input session is available, [`EnigoInjector::new`] fails and the
//!   caller falls back to the noop injector.
//!
//! # Pacing
//!
//! A zero key interval uses `enigo`'s batch [`Keyboard::text`] call, which
//! types as fast as the OS allows.  A nonzero interval clicks one
//! `Key::Unicode` per character and sleeps in between.  The sleep
//! intentionally blocks the calling session task: in-order emission within a
//! session is the whole point of pacing.

use std::sync::Mutex;
use std::time::Duration;

// Leading `::` disambiguates the extern crate from this module's own name.
use ::enigo::{Direction, Enigo, Key, Keyboard, Settings};
use tracing::debug;

use crate::application::{InjectionError, KeystrokeInjector};

/// Keystroke injector backed by `enigo`.
///
/// `Enigo` is `Send` but not `Sync`, so it lives behind a `Mutex`.  The lock
/// also serializes typing across sessions: two sessions cannot interleave
/// characters *within* each other's injection calls, only between calls.
pub struct EnigoInjector {
    enigo: Mutex<Enigo>,
}

impl EnigoInjector {
    /// Opens a connection to the OS input system.
    ///
    /// # Errors
    ///
    /// Returns [`InjectionError::Unavailable`] if `enigo` cannot initialise
    /// (no display session, missing permissions).
    pub fn new() -> Result<Self, InjectionError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| InjectionError::Unavailable(e.to_string()))?;
        Ok(Self {
            enigo: Mutex::new(enigo),
        })
    }
}

impl KeystrokeInjector for EnigoInjector {
    fn type_text(&self, text: &str, key_interval: Duration) -> Result<(), InjectionError> {
        if text.is_empty() {
            // Zero characters, zero key events.
            return Ok(());
        }

        let mut enigo = self
            .enigo
            .lock()
            .map_err(|_| InjectionError::Platform("injector mutex poisoned".to_string()))?;

        if key_interval.is_zero() {
            // Fast path: hand the whole string to the OS in one batch.
            debug!("typing {} chars (batch)", text.chars().count());
            enigo
                .text(text)
                .map_err(|e| InjectionError::Platform(e.to_string()))?;
        } else {
            // Paced path: one press-and-release per character, sleeping in
            // between.  The final character is not followed by a sleep.
            debug!(
                "typing {} chars ({}ms interval)",
                text.chars().count(),
                key_interval.as_millis()
            );
            let mut chars = text.chars().peekable();
            while let Some(ch) = chars.next() {
                enigo
                    .key(Key::Unicode(ch), Direction::Click)
                    .map_err(|e| InjectionError::Platform(e.to_string()))?;
                if chars.peek().is_some() {
                    std::thread::sleep(key_interval);
                }
            }
        }

        Ok(())
    }
}
