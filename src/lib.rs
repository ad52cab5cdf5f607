//! keyrelay library crate.
//!
//! This crate provides a localhost WebSocket-to-keyboard relay: text frames
//! received on a loopback WebSocket are replayed as synthetic keystrokes into
//! whatever window currently holds input focus.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Browser script (text over WebSocket, ws://localhost:59764)
//!         ↕
//! [keyrelay]
//!   ├── domain/           Pure types: RelayConfig
//!   ├── application/      TypeText use case, KeystrokeInjector seam
//!   └── infrastructure/
//!         ├── ws_server/  WebSocket accept loop (tokio-tungstenite)
//!         └── injection/  OS keystroke injection (enigo / noop / mock)
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no external dependencies (no I/O, no async, no frameworks).
//! - `application` depends on `domain` only.
//! - `infrastructure` depends on all other layers plus `tokio`,
//!   `tungstenite`, and (optionally) `enigo`.
//!
//! Keeping the OS injection behind the narrow [`application::KeystrokeInjector`]
//! trait is what makes the relay testable: the end-to-end tests drive a real
//! WebSocket connection against a recording injector instead of the host
//! keyboard.

/// Domain layer: pure configuration types (no I/O).
pub mod domain;

/// Application layer: the type-text use case and the injection seam.
pub mod application;

/// Infrastructure layer: WebSocket server and keystroke injectors.
pub mod infrastructure;
