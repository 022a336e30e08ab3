//! Connection engine.
//!
//! Owns one transport and the registration state of the connection. Inbound
//! lines are decoded and interpreted into [`EngineEvent`]s; outbound lines
//! pass the pre-send hooks before they reach the transport.
//!
//! The engine is synchronous. Whoever owns it feeds transport readiness,
//! lines and closure in through the `on_transport_*` and `on_line_received`
//! entry points; [`crate::session::run`] does that for a tokio transport.
//!
//! ```text
//!  Disconnected ──connect()──▶ Connecting ──376/422──▶ Connected
//!       ▲                          │                       │
//!       └────── closed / failed / disconnect() ◀───────────┘
//! ```

mod dispatch;
mod event;

use std::time::Duration;

use parley_proto::{Command, decode, normalize_channel_name};
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

pub use dispatch::interpret;
pub use event::EngineEvent;

use crate::error::{EngineError, EngineResult, TransportError};
use crate::notify::{Observers, SendDecision, SendHooks, SubscriptionId};
use crate::transport::Transport;

/// Default server port.
pub const DEFAULT_PORT: u16 = 6667;

/// Default pause between scheduling a connection and opening it.
pub const DEFAULT_CONNECT_DELAY: Duration = Duration::from_millis(100);

/// Default placeholder for the USER command's username and unused fields.
pub const DEFAULT_USER_PLACEHOLDER: &str = "parley";

/// Registration state of the connection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Result of a send that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    /// A pre-send hook cancelled the line; nothing was written.
    Vetoed,
}

/// Connection parameters and identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    /// Sent as `PASS` when non-empty.
    pub password: Option<String>,
    pub nick: String,
    pub realname: String,
    pub user_placeholder: String,
    pub connect_delay: Duration,
}

impl EngineConfig {
    /// Configuration with default port, delay and placeholder.
    pub fn new(server_host: impl Into<String>, nick: impl Into<String>) -> Self {
        Self {
            server_host: server_host.into(),
            server_port: DEFAULT_PORT,
            password: None,
            nick: nick.into(),
            realname: String::new(),
            user_placeholder: DEFAULT_USER_PLACEHOLDER.to_string(),
            connect_delay: DEFAULT_CONNECT_DELAY,
        }
    }
}

/// The protocol engine for one server connection.
pub struct ConnectionEngine {
    config: EngineConfig,
    state: ConnectionState,
    transport: Box<dyn Transport>,
    events: Observers<EngineEvent>,
    send_hooks: SendHooks,
}

impl std::fmt::Debug for ConnectionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("events", &self.events)
            .field("send_hooks", &self.send_hooks)
            .finish_non_exhaustive()
    }
}

impl ConnectionEngine {
    pub fn new(config: EngineConfig, transport: Box<dyn Transport>) -> Self {
        Self {
            config,
            state: ConnectionState::Disconnected,
            transport,
            events: Observers::new(),
            send_hooks: SendHooks::default(),
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Our own nickname.
    pub fn nick(&self) -> &str {
        &self.config.nick
    }

    // ------------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------------

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&EngineEvent) + Send + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn forward_to(&mut self, tx: mpsc::UnboundedSender<EngineEvent>) -> SubscriptionId {
        self.events.forward_to(tx)
    }

    /// Register a hook that sees every outbound line first and may veto it.
    pub fn add_send_hook<F>(&mut self, hook: F) -> SubscriptionId
    where
        F: FnMut(&str) -> SendDecision + Send + 'static,
    {
        self.send_hooks.add(hook)
    }

    pub fn remove_send_hook(&mut self, id: SubscriptionId) -> bool {
        self.send_hooks.remove(id)
    }

    // ------------------------------------------------------------------------
    // Connection lifecycle
    // ------------------------------------------------------------------------

    /// Open the transport. Does nothing unless disconnected.
    pub fn connect(&mut self) -> EngineResult<()> {
        if self.state != ConnectionState::Disconnected {
            debug!(state = ?self.state, "Connect ignored");
            return Ok(());
        }

        info!(
            host = %self.config.server_host,
            port = self.config.server_port,
            "Connecting"
        );
        self.state = ConnectionState::Connecting;
        let opened = self.transport.open(
            &self.config.server_host,
            self.config.server_port,
            self.config.connect_delay,
        );
        opened.map_err(|e| self.fail(e))
    }

    /// The transport is up: register with the server.
    ///
    /// Sends `PASS` (only with a non-empty password), `NICK`, then `USER`.
    /// Ignored unless a connection attempt is in progress.
    pub fn on_transport_ready(&mut self) -> EngineResult<()> {
        if self.state != ConnectionState::Connecting {
            debug!(state = ?self.state, "Transport ready ignored");
            return Ok(());
        }

        if let Some(password) = self.config.password.clone().filter(|p| !p.is_empty()) {
            self.send_command(Command::Pass(password))?;
        }
        self.send_command(Command::Nick(self.config.nick.clone()))?;
        self.send_command(Command::User {
            placeholder: self.config.user_placeholder.clone(),
            realname: self.config.realname.clone(),
        })?;
        Ok(())
    }

    /// The peer closed the connection.
    pub fn on_transport_closed(&mut self) {
        if self.state == ConnectionState::Disconnected {
            return;
        }
        info!("Connection closed by peer");
        self.teardown();
    }

    /// The transport failed. Returns the error for the caller to report.
    pub fn on_transport_failed(&mut self, err: TransportError) -> EngineError {
        self.fail(err)
    }

    /// Send `QUIT` if registered, then close the transport.
    pub fn disconnect(&mut self) {
        if self.state == ConnectionState::Disconnected {
            return;
        }
        if self.state == ConnectionState::Connected
            && let Err(e) = self.send_command(Command::Quit)
        {
            debug!(error = %e, "QUIT not delivered");
        }
        info!("Disconnecting");
        self.teardown();
    }

    // ------------------------------------------------------------------------
    // Inbound
    // ------------------------------------------------------------------------

    /// Process one received line.
    ///
    /// The server's exact keep-alive probe (`PING :<server host>`) is
    /// answered here. Every other line is decoded and interpreted; the
    /// resulting event, if any, is published and returned.
    pub fn on_line_received(&mut self, line: &str) -> EngineResult<Option<EngineEvent>> {
        trace!(line = %line, "Received");

        if self.is_keepalive_probe(line) {
            let event = EngineEvent::PingReceived {
                line: line.to_string(),
            };
            self.events.publish(&event);
            self.pong()?;
            return Ok(Some(event));
        }

        let Some(event) = interpret(decode(line)) else {
            return Ok(None);
        };

        if event == EngineEvent::Connected && self.state != ConnectionState::Connected {
            info!(nick = %self.config.nick, "Registered");
            self.state = ConnectionState::Connected;
        }
        debug!(event = event.kind(), "Engine event");
        self.events.publish(&event);
        Ok(Some(event))
    }

    fn is_keepalive_probe(&self, line: &str) -> bool {
        line.strip_prefix("PING :") == Some(self.config.server_host.as_str())
    }

    // ------------------------------------------------------------------------
    // Outbound
    // ------------------------------------------------------------------------

    /// Send one raw line, subject to the pre-send hooks.
    ///
    /// A veto is not an error. A transport failure is: the engine is then
    /// disconnected.
    pub fn send_message(&mut self, line: &str) -> EngineResult<SendOutcome> {
        if self.send_hooks.check(line) == SendDecision::Veto {
            debug!(line = %line, "Outbound line vetoed");
            return Ok(SendOutcome::Vetoed);
        }

        if let Err(e) = self.transport.write_line(line) {
            return Err(self.fail(e));
        }
        trace!(line = %line, "Sent");
        self.events.publish(&EngineEvent::MessageSent {
            line: line.to_string(),
        });
        Ok(SendOutcome::Sent)
    }

    /// Send a PRIVMSG to a channel or nickname.
    pub fn send_privmsg(&mut self, destination: &str, text: &str) -> EngineResult<SendOutcome> {
        let outcome = self.send_command(Command::privmsg(destination, text))?;
        if outcome == SendOutcome::Sent {
            self.events.publish(&EngineEvent::PrivmsgSent {
                destination: destination.to_string(),
                sender: self.config.nick.clone(),
                text: text.to_string(),
            });
        }
        Ok(outcome)
    }

    /// Send `JOIN`. The name is normalized to carry a channel prefix.
    pub fn join(&mut self, channel: &str) -> EngineResult<SendOutcome> {
        self.send_command(Command::join(channel))
    }

    /// Send `PART` and announce that we left.
    pub fn leave(&mut self, channel: &str) -> EngineResult<SendOutcome> {
        let channel = normalize_channel_name(channel);
        let outcome = self.send_command(Command::Part(channel.clone()))?;
        if outcome == SendOutcome::Sent {
            self.events.publish(&EngineEvent::ChannelLeft { channel });
        }
        Ok(outcome)
    }

    pub fn whois(&mut self, nickname: &str) -> EngineResult<SendOutcome> {
        self.send_command(Command::Whois(nickname.to_string()))
    }

    /// Answer the keep-alive probe.
    pub fn pong(&mut self) -> EngineResult<SendOutcome> {
        let line = Command::Pong(self.config.server_host.clone()).to_string();
        let outcome = self.send_message(&line)?;
        if outcome == SendOutcome::Sent {
            self.events.publish(&EngineEvent::PongSent { line });
        }
        Ok(outcome)
    }

    fn send_command(&mut self, command: Command) -> EngineResult<SendOutcome> {
        self.send_message(&command.to_string())
    }

    // ------------------------------------------------------------------------
    // Teardown
    // ------------------------------------------------------------------------

    fn fail(&mut self, err: TransportError) -> EngineError {
        warn!(error = %err, code = err.error_code(), "Transport failed");
        self.teardown();
        EngineError::Transport(err)
    }

    fn teardown(&mut self) {
        self.transport.close();
        if self.state != ConnectionState::Disconnected {
            self.state = ConnectionState::Disconnected;
            self.events.publish(&EngineEvent::Disconnected);
        }
    }
}
