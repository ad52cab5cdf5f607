//! keyrelay — entry point.
//!
//! A long-running localhost service that relays text received over a
//! WebSocket into synthetic keyboard input on the host machine.  The
//! intended client is a browser script (it connects to
//! `ws://localhost:59764` and sends strings); whatever window currently has
//! focus receives the keystrokes.
//!
//! # Why does this exist?
//!
//! Sandboxed in-page scripts can open WebSockets but cannot synthesize
//! OS-level keyboard input.  This process is the missing half: the script
//! sends the text it wants typed, and the relay performs the host-level
//! injection the page cannot.
//!
//! # Usage
//!
//! ```text
//! keyrelay
//! ```
//!
//! No flags, no config file, no environment variables (apart from the usual
//! `RUST_LOG` for log filtering).  The listening port (59764) and the
//! per-character delay (0) are fixed constants shared by convention with the
//! browser-side script.  The process runs until terminated externally
//! (Ctrl+C / signal / kill).
//!
//! # Architecture overview
//!
//! ```text
//! Browser script  (text frames over WebSocket)
//!       ↕
//! keyrelay  ← this process
//!   domain/          RelayConfig
//!   application/     TypeText use case, KeystrokeInjector trait
//!   infrastructure/
//!     ws_server/     accept loop + per-session receive loops
//!     injection/     enigo-backed OS injection (noop fallback)
//!       ↓
//! OS input queue → focused window
//! ```

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tracing::info;
use tracing_subscriber::EnvFilter;

use keyrelay::application::TypeText;
use keyrelay::domain::RelayConfig;
use keyrelay::infrastructure::{create_injector, Relay};

/// Program entry point.
///
/// The `#[tokio::main]` attribute sets up the Tokio multi-threaded async
/// runtime.  All async tasks (the accept loop and one task per session) run
/// on this runtime's thread pool.
///
/// # What happens at startup
///
/// 1. `tracing_subscriber` is initialised; the log level is controlled by
///    the `RUST_LOG` environment variable (e.g., `RUST_LOG=debug`).
/// 2. The keystroke injector is constructed (real `enigo` injection, or the
///    logging noop fallback when no display is available).
/// 3. A Ctrl+C handler is spawned; it clears a shared `AtomicBool` when the
///    user interrupts the process.
/// 4. The relay binds its loopback port — failure here is fatal — and then
///    accepts connections until the shutdown flag is cleared.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `EnvFilter::try_from_default_env()` reads the `RUST_LOG` environment
    // variable.  If it is absent or invalid, we fall back to `info` level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RelayConfig::default();

    info!(
        "keyrelay starting — listen={}, key_interval={:?}",
        config.bind_addr, config.key_interval
    );

    // The use case shared by every session: injector + configured pace.
    let typer = Arc::new(TypeText::new(create_injector(), config.key_interval));

    // ── Shutdown flag ─────────────────────────────────────────────────────────
    //
    // `AtomicBool` is a thread-safe boolean that can be read and written from
    // multiple threads without a Mutex.  `Relaxed` ordering is enough here —
    // the value only needs to eventually propagate to the accept loop.
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    // Spawn a task that listens for Ctrl+C (SIGINT on Unix).  When received,
    // it clears `running`.  The accept loop checks the flag every 200 ms and
    // exits cleanly, releasing the port.
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C — shutting down");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    // ── Bind and serve ────────────────────────────────────────────────────────
    //
    // Bind failure (port already in use) aborts startup: a relay that cannot
    // own its port must not pretend to serve.
    let relay = Relay::bind(config, typer).await?;
    relay.run(running).await?;

    info!("keyrelay stopped");
    Ok(())
}
