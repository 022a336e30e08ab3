//! Async driver: feeds transport events into a session.

use tokio::sync::mpsc;
use tracing::info;

use super::SessionManager;
use crate::error::EngineResult;
use crate::transport::TransportEvent;

/// Process transport events until the connection ends.
///
/// Lines are handled one at a time, each to completion before the next is
/// read. Returns `Ok` when the peer closes the connection or the event
/// stream ends, and the transport error when the connection fails.
pub async fn run(
    session: &mut SessionManager,
    events: &mut mpsc::UnboundedReceiver<TransportEvent>,
) -> EngineResult<()> {
    while let Some(event) = events.recv().await {
        match event {
            TransportEvent::Ready => session.on_transport_ready()?,
            TransportEvent::Line(line) => session.on_line_received(&line)?,
            TransportEvent::Closed => {
                session.on_transport_closed();
                info!("Session ended");
                return Ok(());
            }
            TransportEvent::Failed(e) => return Err(session.on_transport_failed(e)),
        }
    }
    Ok(())
}
