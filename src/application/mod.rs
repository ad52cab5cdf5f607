//! Application layer for keyrelay.
//!
//! The application layer orchestrates the business logic: it knows *what* to
//! do with a received message (type it, verbatim, at the configured pace),
//! but delegates *how* keystrokes reach the OS to the infrastructure layer
//! through the [`KeystrokeInjector`] trait.
//!
//! # Responsibilities
//!
//! - Defining the [`KeystrokeInjector`] seam between "a message arrived" and
//!   "keys were pressed"
//! - Forwarding each message's text, unmodified, to the injector
//! - Defining the [`InjectionError`] type for injection-level failures
//!
//! # What does NOT belong here?
//!
//! - Opening sockets or listening for connections (that is infrastructure)
//! - Tokio task spawning (that happens in the infrastructure layer)
//! - WebSocket framing (handled by tokio-tungstenite)
//! - OS API calls (the infrastructure injectors implement the trait)

pub mod type_text;

// Re-export so callers can write `application::TypeText` etc. concisely.
pub use type_text::{InjectionError, KeystrokeInjector, TypeText};
