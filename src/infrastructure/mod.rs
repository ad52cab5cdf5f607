//! Infrastructure layer for keyrelay.
//!
//! The infrastructure layer handles all I/O: accepting WebSocket connections
//! from the browser script and synthesizing OS keystrokes.
//!
//! # Responsibilities
//!
//! - Binding the loopback TCP listener
//! - Performing the WebSocket HTTP upgrade handshake
//! - Spawning per-session Tokio tasks and running their receive loops
//! - Implementing [`KeystrokeInjector`](crate::application::KeystrokeInjector)
//!   against the OS automation APIs (and providing the noop/mock doubles)
//! - Handling the shutdown signal flag
//!
//! # What does NOT belong here?
//!
//! - Deciding what to do with a message (that is the application layer)
//! - Configuration types (that is the domain layer)

pub mod injection;
pub mod ws_server;

// Re-export the primary entry points so `main.rs` can call them concisely.
pub use injection::create_injector;
pub use ws_server::Relay;
