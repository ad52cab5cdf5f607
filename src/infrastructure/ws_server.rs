//! WebSocket server: accept loop and per-session receive loops.
//!
//! This module is responsible for:
//!
//! 1. Binding a TCP listener on the configured loopback address.
//! 2. Accepting incoming TCP connections from the browser script.
//! 3. Upgrading each connection to a WebSocket session.
//! 4. Running one receive loop per session: each text frame is handed to the
//!    [`TypeText`] use case, which types it into the focused window.
//! 5. Stopping the accept loop when the `running` flag is cleared.
//!
//! # Ordering
//!
//! Within one session, frames are processed strictly in arrival order: the
//! receive loop does not read frame N+1 until the injection call for frame N
//! has returned.  Across sessions there is no coordination — the host
//! keyboard is a global resource, and concurrent sessions may interleave
//! their keystrokes at the OS level.  That is accepted: the expected client
//! is a single browser script.
//!
//! # Failure scoping
//!
//! - A bind failure is fatal (returned from [`Relay::bind`]).
//! - A handshake, read, or injection failure ends that session only; the
//!   accept loop and every other session keep running.
//!
//! # Portability
//!
//! Uses only `tokio::net` APIs which are portable across Windows, Linux, and
//! macOS.  Shutdown is triggered by a shared `AtomicBool` that is set by a
//! Ctrl+C signal handler (see `main.rs`), which is also cross-platform.

use std::net::SocketAddr;
use std::string::FromUtf8Error;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use futures_util::StreamExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::{
    accept_async,
    tungstenite::{Error as WsError, Message as WsMessage},
};
use tracing::{debug, error, info, warn};

use crate::application::TypeText;
use crate::domain::RelayConfig;

// ── Public API ────────────────────────────────────────────────────────────────

/// The relay: a bound WebSocket listener plus the use case every session
/// forwards its frames to.
///
/// Binding and running are split so callers (and tests) can learn the bound
/// address before the accept loop starts:
///
/// ```ignore
/// let relay = Relay::bind(config, typer).await?;
/// info!("listening on {}", relay.local_addr()?);
/// relay.run(running).await?;
/// ```
pub struct Relay {
    listener: TcpListener,
    typer: Arc<TypeText>,
}

impl Relay {
    /// Binds the TCP listener for the relay.
    ///
    /// `TcpListener::bind` is the async equivalent of `bind()` + `listen()`.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound (e.g., the port is
    /// already in use or the process lacks permission to bind).  This is the
    /// one fatal startup error: a relay that cannot own its port must not
    /// pretend to serve.
    pub async fn bind(config: RelayConfig, typer: Arc<TypeText>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(config.bind_addr)
            .await
            .with_context(|| format!("failed to bind relay listener on {}", config.bind_addr))?;

        info!("keyrelay listening on {}", config.bind_addr);

        Ok(Self { listener, typer })
    }

    /// Returns the address the listener actually bound to.
    ///
    /// Useful when the configured port is 0 (tests bind an ephemeral port).
    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("failed to read relay local address")
    }

    /// Runs the main accept loop until `running` is set to `false`.
    ///
    /// Each accepted connection is handed off to a dedicated Tokio task so
    /// that one slow or stuck session never blocks new connections.  Dropping
    /// the returned future (or letting it finish) closes the listener and
    /// releases the port, so a subsequent [`Relay::bind`] on the same port
    /// succeeds.
    pub async fn run(self, running: Arc<AtomicBool>) -> anyhow::Result<()> {
        let Relay { listener, typer } = self;

        loop {
            // Check the shutdown flag before each accept attempt.
            if !running.load(Ordering::Relaxed) {
                info!("shutdown flag set; stopping accept loop");
                break;
            }

            // Use a short timeout on `accept()` so the loop can periodically
            // check the `running` flag even when no clients are connecting.
            // Without this timeout, the loop would block forever on `accept()`.
            let accept_result = timeout(Duration::from_millis(200), listener.accept()).await;

            match accept_result {
                Ok(Ok((stream, peer_addr))) => {
                    info!("new connection from {peer_addr}");
                    let typer = Arc::clone(&typer);

                    // Spawn a dedicated Tokio task for this session.
                    // `tokio::spawn` is non-blocking: it queues the task and
                    // returns immediately, so the accept loop is never delayed
                    // by a session's I/O or typing.
                    tokio::spawn(async move {
                        handle_session(stream, peer_addr, typer).await;
                    });
                }
                Ok(Err(e)) => {
                    // Transient accept error (e.g., too many open file
                    // descriptors).  Log it and continue rather than taking
                    // down the whole relay.
                    error!("accept error: {e}");
                }
                Err(_) => {
                    // Timeout — no new connection in the last 200 ms.
                    // Loop back to check the `running` flag.
                }
            }
        }

        Ok(())
    }
}

// ── Per-session handler ───────────────────────────────────────────────────────

/// Top-level handler for a single WebSocket session.
///
/// Wraps [`run_session`] and logs the outcome.  This function is the entry
/// point for each per-session Tokio task spawned by [`Relay::run`].
///
/// Using a separate outer/inner function pair lets us use `?` for clean error
/// propagation inside `run_session` while logging errors in this outer
/// function — a session error must never escape its task.
async fn handle_session(raw_stream: TcpStream, peer_addr: SocketAddr, typer: Arc<TypeText>) {
    match run_session(raw_stream, peer_addr, typer).await {
        Ok(()) => info!("session {peer_addr} closed normally"),
        Err(e) => warn!("session {peer_addr} closed with error: {e:#}"),
    }
}

/// Runs the complete lifecycle of a single WebSocket session.
///
/// 1. Completes the WebSocket HTTP upgrade handshake.
/// 2. Loops: wait for the next frame, hand its text to the use case.
/// 3. Returns when the peer closes the connection or an error occurs.
///
/// # Errors
///
/// Returns an error if the handshake fails, a frame carries invalid UTF-8,
/// or the injection call fails.  All of these are fatal for this session
/// only.
async fn run_session(
    raw_stream: TcpStream,
    peer_addr: SocketAddr,
    typer: Arc<TypeText>,
) -> anyhow::Result<()> {
    // `accept_async` reads the client's HTTP Upgrade request and sends the
    // "101 Switching Protocols" response.  After this, `ws_stream` speaks
    // WebSocket frames instead of raw HTTP.
    let mut ws_stream = accept_async(raw_stream)
        .await
        .with_context(|| format!("WebSocket handshake failed with {peer_addr}"))?;

    info!("WebSocket session established: {peer_addr}");

    loop {
        // Read the next WebSocket frame.  `next()` returns `None` when the
        // underlying stream is closed.
        let ws_msg = match ws_stream.next().await {
            Some(Ok(msg)) => msg,
            Some(Err(WsError::ConnectionClosed | WsError::Protocol(_))) => {
                debug!("session {peer_addr}: WebSocket closed normally");
                break;
            }
            Some(Err(e)) => {
                // Abrupt disconnect or malformed frame: fatal for this
                // session, invisible to every other session.
                return Err(e).with_context(|| format!("session {peer_addr}: read error"));
            }
            None => {
                debug!("session {peer_addr}: stream ended");
                break;
            }
        };

        match classify_frame(ws_msg)? {
            FramePayload::Text(text) => {
                debug!(
                    "session {peer_addr}: typing message of {} chars",
                    text.chars().count()
                );

                // This call returns only once the whole message has been
                // typed, so the next frame is not read until then — the
                // in-order emission guarantee for this session.
                typer
                    .type_message(&text)
                    .with_context(|| format!("session {peer_addr}: injection failed"))?;
            }
            FramePayload::Control(kind) => {
                // Protocol-level ping/pong frames; tokio-tungstenite queues
                // the pong reply automatically.  Nothing to type.
                debug!("session {peer_addr}: {kind} frame");
            }
            FramePayload::Close => {
                debug!("session {peer_addr}: Close frame received");
                break;
            }
        }
    }

    Ok(())
}

// ── Frame classification ──────────────────────────────────────────────────────

/// What a received WebSocket frame means to the relay.
#[derive(Debug, PartialEq, Eq)]
enum FramePayload {
    /// A message to type, verbatim.
    Text(String),
    /// A protocol-level frame with nothing to type (ping/pong/raw).
    Control(&'static str),
    /// The peer is closing the session.
    Close,
}

/// Maps a WebSocket frame onto the relay's view of it.
///
/// Text frames carry the message directly.  Binary frames are accepted too —
/// the relay types whatever arrives — but their bytes must decode as UTF-8;
/// a payload that is not text at all cannot be typed and fails the session.
fn classify_frame(msg: WsMessage) -> Result<FramePayload, FromUtf8Error> {
    Ok(match msg {
        WsMessage::Text(text) => FramePayload::Text(text),
        WsMessage::Binary(bytes) => FramePayload::Text(String::from_utf8(bytes)?),
        WsMessage::Ping(_) => FramePayload::Control("ping"),
        WsMessage::Pong(_) => FramePayload::Control("pong"),
        WsMessage::Close(_) => FramePayload::Close,
        WsMessage::Frame(_) => FramePayload::Control("raw"),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
