//! Channel chat messages.

use chrono::{DateTime, Utc};

use super::member::MemberHandle;

/// A chat message in a channel log. Immutable after creation.
#[derive(Clone, Debug)]
pub struct Message {
    member: MemberHandle,
    text: String,
    timestamp: DateTime<Utc>,
}

impl Message {
    pub(crate) fn new(member: MemberHandle, text: impl Into<String>) -> Self {
        Self {
            member,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// The sender. Shared with the channel roster while the sender is present.
    pub fn member(&self) -> &MemberHandle {
        &self.member
    }

    pub fn sender_nickname(&self) -> String {
        self.member.read().nickname.clone()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// When the message was recorded locally.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
