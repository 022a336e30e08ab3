//! Notifications published by the connection engine.

use parley_proto::DecodedEvent;

/// Something the engine observed or did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    /// Registration completed (end of MOTD, or no MOTD).
    Connected,
    /// The connection ended, locally or remotely.
    Disconnected,
    /// End of the NAMES list for a channel: the join is confirmed.
    ChannelJoined { channel: String },
    /// We parted a channel.
    ChannelLeft { channel: String },
    /// One NAMES reply: space-separated nicknames, possibly status-prefixed.
    NameList { channel: String, nicknames: String },
    TopicChanged { channel: String, topic: String },
    /// `destination` is a channel name or our own nickname.
    PrivmsgReceived {
        destination: String,
        sender: String,
        text: String,
    },
    /// A PRIVMSG we sent; `sender` is our own nickname.
    PrivmsgSent {
        destination: String,
        sender: String,
        text: String,
    },
    MemberJoinedChannel { channel: String, nickname: String },
    MemberLeftChannel { channel: String, nickname: String },
    /// A user left the network. Carries the quit message.
    MemberQuit { nickname: String, reason: String },
    /// A WHOIS user reply. `whois` is filled in when the reply was complete.
    DirectoryEntryReceived(Box<DecodedEvent>),
    /// The server's keep-alive probe, exactly as received.
    PingReceived { line: String },
    /// Our keep-alive answer, as written.
    PongSent { line: String },
    /// Any line that was written to the transport.
    MessageSent { line: String },
}

impl EngineEvent {
    /// Event name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::ChannelJoined { .. } => "channel-joined",
            Self::ChannelLeft { .. } => "channel-left",
            Self::NameList { .. } => "name-list",
            Self::TopicChanged { .. } => "topic-changed",
            Self::PrivmsgReceived { .. } => "privmsg-received",
            Self::PrivmsgSent { .. } => "privmsg-sent",
            Self::MemberJoinedChannel { .. } => "member-joined-channel",
            Self::MemberLeftChannel { .. } => "member-left-channel",
            Self::MemberQuit { .. } => "member-quit",
            Self::DirectoryEntryReceived(_) => "directory-entry-received",
            Self::PingReceived { .. } => "ping-received",
            Self::PongSent { .. } => "pong-sent",
            Self::MessageSent { .. } => "message-sent",
        }
    }
}
