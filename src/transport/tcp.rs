//! Plain TCP transport on tokio.
//!
//! `open` spawns one task per connection. The task sleeps for the requested
//! delay, connects, then shuttles lines between the socket and two unbounded
//! channels until either side goes away.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use parley_proto::LineCodec;
use tokio::net::TcpStream;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, warn};

use super::{Transport, TransportEvent};
use crate::error::TransportError;

/// A [`Transport`] over a tokio `TcpStream`.
pub struct TcpTransport {
    events: mpsc::UnboundedSender<TransportEvent>,
    outbound: Option<mpsc::UnboundedSender<String>>,
    task: Option<JoinHandle<()>>,
    max_line_len: usize,
}

impl TcpTransport {
    /// Create a transport and the receiver its events arrive on.
    pub fn new(max_line_len: usize) -> (Self, mpsc::UnboundedReceiver<TransportEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let transport = Self {
            events,
            outbound: None,
            task: None,
            max_line_len,
        };
        (transport, rx)
    }
}

impl Transport for TcpTransport {
    fn open(&mut self, host: &str, port: u16, delay: Duration) -> Result<(), TransportError> {
        let runtime = Handle::try_current().map_err(|_| TransportError::NoRuntime)?;

        self.close();
        let (tx, rx) = mpsc::unbounded_channel();
        self.outbound = Some(tx);

        let addr = format!("{host}:{port}");
        let events = self.events.clone();
        let max_line_len = self.max_line_len;
        self.task = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            match TcpStream::connect(&addr).await {
                Ok(stream) => {
                    info!(addr = %addr, "Connected");
                    pump(stream, rx, &events, max_line_len).await;
                }
                Err(e) => {
                    warn!(addr = %addr, error = %e, "Connect failed");
                    let _ = events.send(TransportEvent::Failed(e.into()));
                }
            }
        }));
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<(), TransportError> {
        let outbound = self.outbound.as_ref().ok_or(TransportError::NotOpen)?;
        outbound
            .send(line.to_string())
            .map_err(|_| TransportError::Closed)
    }

    fn close(&mut self) {
        // Dropping the sender lets the task flush what is queued and exit.
        self.outbound = None;
        self.task = None;
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn pump(
    stream: TcpStream,
    mut outbound: mpsc::UnboundedReceiver<String>,
    events: &mpsc::UnboundedSender<TransportEvent>,
    max_line_len: usize,
) {
    let _ = stream.set_nodelay(true);
    let (read_half, write_half) = stream.into_split();
    let mut reader = FramedRead::new(read_half, LineCodec::with_max_len(max_line_len));
    let mut writer = FramedWrite::new(write_half, LineCodec::with_max_len(max_line_len));

    if events.send(TransportEvent::Ready).is_err() {
        return;
    }

    loop {
        tokio::select! {
            inbound = reader.next() => match inbound {
                Some(Ok(line)) => {
                    if events.send(TransportEvent::Line(line)).is_err() {
                        break;
                    }
                }
                Some(Err(e)) => {
                    let _ = events.send(TransportEvent::Failed(e.into()));
                    break;
                }
                None => {
                    debug!("Peer closed connection");
                    let _ = events.send(TransportEvent::Closed);
                    break;
                }
            },
            line = outbound.recv() => match line {
                Some(line) => {
                    if let Err(e) = writer.send(line).await {
                        let _ = events.send(TransportEvent::Failed(e.into()));
                        break;
                    }
                }
                None => {
                    debug!("Transport closed locally");
                    break;
                }
            },
        }
    }
}
