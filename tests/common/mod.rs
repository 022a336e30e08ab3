//! Integration test common infrastructure.
//!
//! Provides in-memory sessions with event recording, and a scripted TCP
//! server for exercising the tokio transport end to end.

#[allow(dead_code)]
pub mod server;
#[allow(dead_code)]
pub mod session;

#[allow(unused_imports)]
pub use server::TestServer;
#[allow(unused_imports)]
pub use session::{Recorder, TestSession};
