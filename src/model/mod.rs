//! In-memory conversation model: members, messages, channels and the
//! directory of tracked channels.
//!
//! Members and channels are shared behind `Arc<RwLock<_>>` handles so that
//! messages can refer to their sender and observers can hold on to a channel
//! after the notification that introduced it.

mod channel;
mod directory;
mod member;
mod message;

pub use channel::{Channel, ChannelEvent, ChannelHandle};
pub use directory::{ChannelDirectory, DirectoryEvent};
pub use member::{Member, MemberHandle};
pub use message::Message;
