//! parley - an IRC client protocol engine.
//!
//! Layers, bottom up:
//! - [`parley_proto`]: decoding server lines and formatting commands.
//! - [`model`]: channels, members and messages, plus the [`ChannelDirectory`].
//! - [`engine`]: the [`ConnectionEngine`] state machine over a [`Transport`].
//! - [`session`]: the [`SessionManager`] that keeps the directory in step
//!   with the engine, and the async [`session::run`] driver.
//!
//! ```
//! use parley::{ConnectionEngine, EngineConfig, MemoryTransport, SessionManager};
//!
//! let transport = MemoryTransport::connected();
//! let engine = ConnectionEngine::new(
//!     EngineConfig::new("irc.example.net", "parley"),
//!     Box::new(transport.clone()),
//! );
//! let mut session = SessionManager::new(engine);
//!
//! let channel = session.join("rust").unwrap();
//! session
//!     .on_line_received(":irc.example.net 366 parley #rust :End of /NAMES list.")
//!     .unwrap();
//!
//! assert!(channel.read().is_joined());
//! assert_eq!(transport.written(), vec!["JOIN #rust"]);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod notify;
pub mod session;
pub mod telemetry;
pub mod transport;

pub use engine::{ConnectionEngine, ConnectionState, EngineConfig, EngineEvent, SendOutcome};
pub use error::{EngineError, EngineResult, TransportError};
pub use model::{
    Channel, ChannelDirectory, ChannelEvent, ChannelHandle, DirectoryEvent, Member, MemberHandle,
    Message,
};
pub use notify::{Observers, SendDecision, SendHooks, SubscriptionId};
pub use session::{SessionEvent, SessionManager};
pub use transport::{MemoryTransport, TcpTransport, Transport, TransportEvent};
