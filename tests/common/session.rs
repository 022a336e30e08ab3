//! In-memory test sessions.
//!
//! A [`TestSession`] wires a [`SessionManager`] to a [`MemoryTransport`] and
//! records every engine, session and directory event in arrival order.

use std::sync::Arc;

use parking_lot::Mutex;
use parley::{
    ConnectionEngine, DirectoryEvent, EngineConfig, EngineEvent, MemoryTransport, SessionEvent,
    SessionManager,
};

pub const SERVER: &str = "irc.local";
pub const NICK: &str = "rarrarrar";

/// Shared, append-only event log.
pub struct Recorder<E> {
    events: Arc<Mutex<Vec<E>>>,
}

impl<E: Clone> Recorder<E> {
    fn new() -> (Self, Arc<Mutex<Vec<E>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                events: events.clone(),
            },
            events,
        )
    }

    pub fn all(&self) -> Vec<E> {
        self.events.lock().clone()
    }

    pub fn take(&self) -> Vec<E> {
        std::mem::take(&mut *self.events.lock())
    }
}

/// A session over an in-memory transport.
pub struct TestSession {
    pub session: SessionManager,
    pub transport: MemoryTransport,
    pub engine_events: Recorder<EngineEvent>,
    pub session_events: Recorder<SessionEvent>,
    pub channel_events: Recorder<DirectoryEvent>,
}

impl TestSession {
    /// A fresh session that has not connected yet.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::new(SERVER, NICK))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let transport = MemoryTransport::new();
        let mut engine = ConnectionEngine::new(config, Box::new(transport.clone()));

        let (engine_events, sink) = Recorder::new();
        engine.subscribe(move |e| sink.lock().push(e.clone()));

        let mut session = SessionManager::new(engine);
        let (session_events, sink) = Recorder::new();
        session.subscribe(move |e| sink.lock().push(e.clone()));
        let (channel_events, sink) = Recorder::new();
        session
            .directory_mut()
            .subscribe(move |e| sink.lock().push(e.clone()));

        Self {
            session,
            transport,
            engine_events,
            session_events,
            channel_events,
        }
    }

    /// Connect and complete registration; clears the outbound log.
    pub fn registered() -> Self {
        let mut test = Self::new();
        test.session.connect().expect("connect");
        test.session.on_transport_ready().expect("ready");
        test.feed(&format!(":{SERVER} 376 {NICK} :End of /MOTD command."));
        test.transport.take_written();
        test.engine_events.take();
        test.session_events.take();
        test
    }

    /// Deliver inbound lines.
    pub fn feed(&mut self, line: &str) {
        self.session.on_line_received(line).expect("line processed");
    }

    /// Engine event names seen so far.
    pub fn engine_kinds(&self) -> Vec<&'static str> {
        self.engine_events.all().iter().map(EngineEvent::kind).collect()
    }
}
