//! Relay configuration types.
//!
//! [`RelayConfig`] is the single source of truth for all runtime settings.
//! The relay's entire configuration surface is two values: where to listen
//! and how fast to type.  The defaults are the production values; tests
//! override them (port 0 for an ephemeral port, nonzero intervals to
//! exercise the paced typing path).
//!
//! # Design rationale
//!
//! Keeping configuration as a plain struct (no global state, no environment
//! variable reads inside the domain) makes the relay easy to embed in tests.
//! There are deliberately no CLI flags, config files, or environment
//! variables: the companion browser script hardcodes the port, so the two
//! sides stay in lockstep by convention.

use std::net::SocketAddr;
use std::time::Duration;

/// The fixed loopback port the companion browser script connects to.
pub const RELAY_PORT: u16 = 59764;

/// All runtime configuration for the relay.
///
/// Build this struct once at startup and hand it to
/// [`Relay::bind`](crate::infrastructure::ws_server::Relay::bind).
///
/// # Example
///
/// ```rust
/// use keyrelay::domain::RelayConfig;
///
/// let cfg = RelayConfig::default();
/// assert_eq!(cfg.bind_addr.port(), 59764);
/// assert!(cfg.key_interval.is_zero());
/// ```
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// The address and port the WebSocket listener binds to.
    ///
    /// Defaults to loopback only — the relay types into whatever window has
    /// focus, so it must never be reachable from other machines.
    pub bind_addr: SocketAddr,

    /// Delay between synthesized characters within one message.
    ///
    /// Zero means "type as fast as the OS automation layer allows", which is
    /// the production setting.  Note that at zero interval a very large or
    /// rapid message may be dropped or coalesced by the OS automation layer;
    /// this is a known limitation of host-level input synthesis.
    pub key_interval: Duration,
}

impl Default for RelayConfig {
    /// Returns the production configuration.
    ///
    /// | Field        | Default           |
    /// |--------------|-------------------|
    /// | bind_addr    | `127.0.0.1:59764` |
    /// | key_interval | 0 (no pacing)     |
    fn default() -> Self {
        Self {
            // Safe to unwrap: compile-time-known valid socket address parts.
            bind_addr: SocketAddr::from(([127, 0, 0, 1], RELAY_PORT)),
            key_interval: Duration::ZERO,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port_is_59764() {
        // Arrange / Act
        let cfg = RelayConfig::default();
        // Assert
        assert_eq!(cfg.bind_addr.port(), RELAY_PORT);
        assert_eq!(cfg.bind_addr.port(), 59764);
    }

    #[test]
    fn test_default_bind_ip_is_loopback() {
        let cfg = RelayConfig::default();
        // Loopback only: the relay must not accept connections from the LAN.
        assert!(cfg.bind_addr.ip().is_loopback());
    }

    #[test]
    fn test_default_key_interval_is_zero() {
        let cfg = RelayConfig::default();
        assert!(cfg.key_interval.is_zero());
    }

    #[test]
    fn test_config_can_be_cloned() {
        let cfg = RelayConfig::default();
        let cloned = cfg.clone();
        assert_eq!(cfg.bind_addr, cloned.bind_addr);
        assert_eq!(cfg.key_interval, cloned.key_interval);
    }

    #[test]
    fn test_config_custom_values() {
        // Verify that custom values are stored correctly.
        let cfg = RelayConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            key_interval: Duration::from_millis(5),
        };
        assert_eq!(cfg.bind_addr.port(), 0);
        assert_eq!(cfg.key_interval, Duration::from_millis(5));
    }
}
