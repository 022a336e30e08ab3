//! Session orchestration.
//!
//! [`SessionManager`] sits on top of one [`ConnectionEngine`] and owns the
//! [`ChannelDirectory`]. It turns engine events into channel and member
//! mutations, and tracks the join/leave lifecycle of each channel.
//!
//! Engine events are collected through a subscription into a local queue and
//! applied after every engine call, so events published from any engine path
//! (replies, sends, failures) reach the directory in order.

mod driver;

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use parley_proto::{ChannelExt, normalize_channel_name};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub use driver::run;

use crate::engine::{ConnectionEngine, EngineEvent, SendOutcome};
use crate::error::{EngineError, EngineResult, TransportError};
use crate::model::{Channel, ChannelDirectory, ChannelHandle};
use crate::notify::{Observers, SubscriptionId};

/// Session-level notifications.
#[derive(Clone, Debug)]
pub enum SessionEvent {
    Connected,
    Disconnected,
    /// The server confirmed a join. Carries the channel itself.
    ChannelJoined(ChannelHandle),
    /// We left a channel; it is no longer tracked.
    ChannelLeft(String),
}

/// Channel lifecycle on top of a connection engine.
#[derive(Debug)]
pub struct SessionManager {
    engine: ConnectionEngine,
    directory: ChannelDirectory,
    events: Observers<SessionEvent>,
    pending: Arc<Mutex<VecDeque<EngineEvent>>>,
    autojoin: Vec<String>,
    /// Set on the first registration reply, cleared on disconnect.
    registered: bool,
}

impl SessionManager {
    pub fn new(mut engine: ConnectionEngine) -> Self {
        let pending = Arc::new(Mutex::new(VecDeque::new()));
        let queue = pending.clone();
        engine.subscribe(move |event| queue.lock().push_back(event.clone()));

        Self {
            engine,
            directory: ChannelDirectory::new(),
            events: Observers::new(),
            pending,
            autojoin: Vec::new(),
            registered: false,
        }
    }

    /// Channels to join whenever registration completes.
    pub fn with_autojoin<I, S>(mut self, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.autojoin = channels
            .into_iter()
            .map(|name| normalize_channel_name(name.as_ref()))
            .collect();
        self
    }

    pub fn engine(&self) -> &ConnectionEngine {
        &self.engine
    }

    /// Direct engine access, e.g. to install send hooks. Events the engine
    /// publishes meanwhile are applied on the next session call.
    pub fn engine_mut(&mut self) -> &mut ConnectionEngine {
        &mut self.engine
    }

    pub fn directory(&self) -> &ChannelDirectory {
        &self.directory
    }

    /// Directory access for subscribing to channel events.
    pub fn directory_mut(&mut self) -> &mut ChannelDirectory {
        &mut self.directory
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&SessionEvent) + Send + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn forward_to(&mut self, tx: mpsc::UnboundedSender<SessionEvent>) -> SubscriptionId {
        self.events.forward_to(tx)
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    pub fn connect(&mut self) -> EngineResult<()> {
        let result = self.engine.connect();
        let applied = self.apply_pending();
        result.and(applied)
    }

    pub fn disconnect(&mut self) {
        self.engine.disconnect();
        self.settle();
    }

    /// Track a channel and send `JOIN` for it.
    ///
    /// Idempotent: a channel that is already tracked is returned as is and
    /// no command is sent. A new channel starts out not joined; it is marked
    /// joined when the server's end-of-names reply arrives.
    pub fn join(&mut self, name: &str) -> EngineResult<ChannelHandle> {
        let name = normalize_channel_name(name);
        if let Some(existing) = self.directory.get(&name) {
            return Ok(existing);
        }

        let handle = self.directory.add(Channel::new(&name));
        let sent = self.engine.join(&name);
        let applied = self.apply_pending();
        sent.and(applied)?;
        Ok(handle)
    }

    /// Stop tracking a channel and send `PART` for it. Returns `false` (and
    /// sends nothing) if the channel was not tracked.
    pub fn leave(&mut self, name: &str) -> EngineResult<bool> {
        let name = normalize_channel_name(name);
        if self.directory.remove(&name).is_none() {
            return Ok(false);
        }

        let sent = self.engine.leave(&name);
        let applied = self.apply_pending();
        sent.and(applied)?;
        Ok(true)
    }

    /// Exact-key lookup.
    pub fn find_channel(&self, name: &str) -> Option<ChannelHandle> {
        self.directory.get(name)
    }

    /// Send a PRIVMSG to a channel or nickname. A message to a tracked channel
    /// we are in is also appended to that channel's log.
    pub fn send_privmsg(&mut self, destination: &str, text: &str) -> EngineResult<SendOutcome> {
        let result = self.engine.send_privmsg(destination, text);
        let applied = self.apply_pending();
        result.and_then(|outcome| applied.map(|()| outcome))
    }

    pub fn whois(&mut self, nickname: &str) -> EngineResult<SendOutcome> {
        let result = self.engine.whois(nickname);
        let applied = self.apply_pending();
        result.and_then(|outcome| applied.map(|()| outcome))
    }

    // ------------------------------------------------------------------------
    // Transport ingress
    // ------------------------------------------------------------------------

    pub fn on_transport_ready(&mut self) -> EngineResult<()> {
        let result = self.engine.on_transport_ready();
        let applied = self.apply_pending();
        result.and(applied)
    }

    /// Process one received line. Fails if the line, or a join it
    /// triggered on registration, could not be written.
    pub fn on_line_received(&mut self, line: &str) -> EngineResult<()> {
        let result = self.engine.on_line_received(line);
        let applied = self.apply_pending();
        result.map(|_| ()).and(applied)
    }

    pub fn on_transport_closed(&mut self) {
        self.engine.on_transport_closed();
        self.settle();
    }

    pub fn on_transport_failed(&mut self, err: TransportError) -> EngineError {
        let err = self.engine.on_transport_failed(err);
        self.settle();
        err
    }

    // ------------------------------------------------------------------------
    // Event application
    // ------------------------------------------------------------------------

    fn next_pending(&self) -> Option<EngineEvent> {
        self.pending.lock().pop_front()
    }

    /// Apply every queued event. The queue is always drained; the first
    /// send failure among them is returned.
    fn apply_pending(&mut self) -> EngineResult<()> {
        let mut first_err = None;
        while let Some(event) = self.next_pending() {
            if let Err(e) = self.apply(event) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Apply queued events on a path that is already tearing down.
    fn settle(&mut self) {
        if let Err(e) = self.apply_pending() {
            debug!(error = %e, "Send failed while settling");
        }
    }

    fn apply(&mut self, event: EngineEvent) -> EngineResult<()> {
        match event {
            EngineEvent::Connected => {
                if self.registered {
                    debug!("Repeated registration reply");
                    return Ok(());
                }
                self.registered = true;
                self.events.publish(&SessionEvent::Connected);
                return self.join_on_connect();
            }
            EngineEvent::Disconnected => {
                self.registered = false;
                for name in self.directory.names() {
                    if let Some(channel) = self.directory.get(&name) {
                        channel.write().set_joined(false);
                    }
                }
                self.events.publish(&SessionEvent::Disconnected);
            }
            EngineEvent::ChannelJoined { channel } => match self.directory.mark_joined(&channel) {
                Some(handle) => {
                    info!(channel = %channel, "Joined");
                    self.events.publish(&SessionEvent::ChannelJoined(handle));
                }
                None => debug!(channel = %channel, "Join confirmed for untracked channel"),
            },
            EngineEvent::ChannelLeft { channel } => {
                info!(channel = %channel, "Left");
                self.events.publish(&SessionEvent::ChannelLeft(channel));
            }
            EngineEvent::NameList { channel, nicknames } => {
                self.directory.add_members(&channel, &nicknames);
            }
            EngineEvent::TopicChanged { channel, topic } => {
                self.directory.set_topic(&channel, &topic);
            }
            EngineEvent::PrivmsgReceived {
                destination,
                sender,
                text,
            }
            | EngineEvent::PrivmsgSent {
                destination,
                sender,
                text,
            } => {
                if destination.is_channel_name()
                    && !self.directory.add_message(&destination, &sender, &text)
                {
                    debug!(channel = %destination, sender = %sender, "Message dropped");
                }
            }
            EngineEvent::MemberJoinedChannel { channel, nickname } => {
                self.directory.add_member(&channel, &nickname);
            }
            EngineEvent::MemberLeftChannel { channel, nickname } => {
                self.directory.remove_member(&channel, &nickname);
            }
            EngineEvent::MemberQuit { nickname, .. } => {
                self.directory.remove_member_everywhere(&nickname);
            }
            EngineEvent::DirectoryEntryReceived(decoded) => {
                if let Some(whois) = &decoded.whois {
                    self.directory.update_member(whois);
                }
            }
            EngineEvent::PingReceived { .. }
            | EngineEvent::PongSent { .. }
            | EngineEvent::MessageSent { .. } => {}
        }
        Ok(())
    }

    /// Re-join tracked channels and join configured ones after registration.
    /// Stops at the first failed write; the engine is disconnected by then.
    fn join_on_connect(&mut self) -> EngineResult<()> {
        let rejoin: Vec<String> = self
            .directory
            .names()
            .into_iter()
            .filter(|name| self.directory.get(name).is_some_and(|c| !c.read().is_joined()))
            .collect();
        for name in rejoin {
            if let Err(e) = self.engine.join(&name) {
                warn!(channel = %name, error = %e, "Rejoin failed");
                return Err(e);
            }
        }

        for name in self.autojoin.clone() {
            if self.directory.contains(&name) {
                continue;
            }
            self.directory.add(Channel::new(&name));
            if let Err(e) = self.engine.join(&name) {
                warn!(channel = %name, error = %e, "Auto-join failed");
                return Err(e);
            }
        }
        Ok(())
    }
}
