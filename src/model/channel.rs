//! A single channel: roster, message log and topic.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use parley_proto::{WhoisUser, normalize_channel_name, strip_membership_prefix};

use super::member::{Member, MemberHandle};
use super::message::Message;

/// Shared, mutable reference to a [`Channel`].
pub type ChannelHandle = Arc<RwLock<Channel>>;

/// Something that changed in a channel.
///
/// Returned by every mutating [`Channel`] method that had an effect; the
/// [`ChannelDirectory`](super::ChannelDirectory) re-publishes these tagged
/// with the channel name.
#[derive(Clone, Debug)]
pub enum ChannelEvent {
    MessageReceived(Message),
    MemberJoined(MemberHandle),
    MemberLeft(MemberHandle),
    MemberUpdated(MemberHandle),
    TopicChanged(String),
}

impl ChannelEvent {
    /// Event name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MessageReceived(_) => "message-received",
            Self::MemberJoined(_) => "member-joined",
            Self::MemberLeft(_) => "member-left",
            Self::MemberUpdated(_) => "member-updated",
            Self::TopicChanged(_) => "topic-changed",
        }
    }
}

/// A channel the session tracks.
#[derive(Debug)]
pub struct Channel {
    name: String,
    topic: String,
    members: HashMap<String, MemberHandle>,
    messages: Vec<Message>,
    joined: bool,
}

impl Channel {
    /// Create an empty, not-yet-joined channel. The name is normalized to
    /// start with a channel prefix.
    pub fn new(name: &str) -> Self {
        Self {
            name: normalize_channel_name(name),
            topic: String::new(),
            members: HashMap::new(),
            messages: Vec::new(),
            joined: false,
        }
    }

    pub fn into_handle(self) -> ChannelHandle {
        Arc::new(RwLock::new(self))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Whether the server has confirmed the join (end of NAMES seen).
    pub fn is_joined(&self) -> bool {
        self.joined
    }

    pub(crate) fn set_joined(&mut self, joined: bool) {
        self.joined = joined;
    }

    /// Message log in arrival order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn find_member(&self, nickname: &str) -> Option<MemberHandle> {
        self.members.get(nickname).cloned()
    }

    pub fn members(&self) -> impl Iterator<Item = &MemberHandle> {
        self.members.values()
    }

    /// Roster nicknames, sorted.
    pub fn nicknames(&self) -> Vec<String> {
        let mut nicks: Vec<String> = self.members.keys().cloned().collect();
        nicks.sort_unstable();
        nicks
    }

    /// Add a member. No-op for an empty nickname or one already present.
    pub fn add_member(&mut self, nickname: &str) -> Option<ChannelEvent> {
        if nickname.is_empty() || self.members.contains_key(nickname) {
            return None;
        }
        let member = Member::new(nickname).into_handle();
        self.members.insert(nickname.to_string(), member.clone());
        Some(ChannelEvent::MemberJoined(member))
    }

    /// Add every nickname of a space-separated NAMES snapshot.
    ///
    /// Status prefixes (`@op`, `+voice`) are stripped so the member is keyed
    /// by the nickname it sends messages under.
    pub fn add_members(&mut self, names: &str) -> Vec<ChannelEvent> {
        names
            .split_whitespace()
            .filter_map(|entry| self.add_member(strip_membership_prefix(entry)))
            .collect()
    }

    /// Remove a member. No-op if the nickname is not in the roster.
    pub fn remove_member(&mut self, nickname: &str) -> Option<ChannelEvent> {
        self.members
            .remove(nickname)
            .map(ChannelEvent::MemberLeft)
    }

    /// Append a message from a roster member.
    ///
    /// Returns `None` and records nothing when the sender is not in the
    /// roster; such messages are dropped, not queued.
    pub fn add_message(&mut self, sender: &str, text: &str) -> Option<ChannelEvent> {
        let member = self.find_member(sender)?;
        let message = Message::new(member, text);
        self.messages.push(message.clone());
        Some(ChannelEvent::MessageReceived(message))
    }

    /// Overwrite the topic.
    pub fn set_topic(&mut self, topic: &str) -> ChannelEvent {
        self.topic = topic.to_string();
        ChannelEvent::TopicChanged(self.topic.clone())
    }

    /// Apply a WHOIS reply to the matching roster member, if any.
    pub fn update_member(&mut self, whois: &WhoisUser) -> Option<ChannelEvent> {
        let member = self.find_member(&whois.nickname)?;
        let updated = member.write().apply_whois(whois);
        updated.then_some(ChannelEvent::MemberUpdated(member))
    }
}
