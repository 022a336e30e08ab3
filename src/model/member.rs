//! Channel participants.

use std::sync::Arc;

use parking_lot::RwLock;
use parley_proto::WhoisUser;

/// Shared, mutable reference to a [`Member`].
pub type MemberHandle = Arc<RwLock<Member>>;

/// One chat participant as seen in a channel roster.
///
/// Created when a nickname is first seen in a channel; hostname, username
/// and realname stay empty until a WHOIS reply for the same nickname arrives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Member {
    pub nickname: String,
    pub hostname: String,
    pub username: String,
    pub realname: String,
}

impl Member {
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            ..Self::default()
        }
    }

    /// Wrap in a shareable handle.
    pub fn into_handle(self) -> MemberHandle {
        Arc::new(RwLock::new(self))
    }

    /// The realname if known, otherwise the nickname.
    pub fn display_name(&self) -> &str {
        if self.realname.is_empty() {
            &self.nickname
        } else {
            &self.realname
        }
    }

    /// Copy WHOIS fields onto this member.
    ///
    /// Returns `false`, leaving the member untouched, when the reply is for a
    /// different nickname.
    pub fn apply_whois(&mut self, whois: &WhoisUser) -> bool {
        if whois.nickname != self.nickname {
            return false;
        }
        self.username.clone_from(&whois.username);
        self.hostname.clone_from(&whois.hostname);
        self.realname.clone_from(&whois.realname);
        true
    }
}
