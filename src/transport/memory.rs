//! In-memory transport.
//!
//! Records every written line instead of sending it. Clones share state, so
//! a caller can hand one clone to the engine and inspect another.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::Transport;
use crate::error::TransportError;

#[derive(Debug, Default)]
struct MemoryState {
    open: bool,
    opened: Vec<(String, u16, Duration)>,
    written: Vec<String>,
    fail_writes: bool,
}

/// A [`Transport`] that keeps written lines in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryTransport {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that is already open and accepts writes.
    pub fn connected() -> Self {
        let transport = Self::new();
        transport.state.lock().open = true;
        transport
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().open
    }

    /// Every `open` call as `(host, port, delay)`.
    pub fn opened(&self) -> Vec<(String, u16, Duration)> {
        self.state.lock().opened.clone()
    }

    /// Lines written so far.
    pub fn written(&self) -> Vec<String> {
        self.state.lock().written.clone()
    }

    /// Lines written so far, clearing the record.
    pub fn take_written(&self) -> Vec<String> {
        std::mem::take(&mut self.state.lock().written)
    }

    /// Make every following write fail with a broken-pipe error.
    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }
}

impl Transport for MemoryTransport {
    fn open(&mut self, host: &str, port: u16, delay: Duration) -> Result<(), TransportError> {
        let mut state = self.state.lock();
        state.opened.push((host.to_string(), port, delay));
        state.open = true;
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<(), TransportError> {
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "write failed").into());
        }
        if !state.open {
            return Err(TransportError::NotOpen);
        }
        state.written.push(line.to_string());
        Ok(())
    }

    fn close(&mut self) {
        self.state.lock().open = false;
    }
}
