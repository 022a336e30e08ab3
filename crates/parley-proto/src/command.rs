//! Outbound commands.
//!
//! Each variant formats to exactly one protocol line (without the line
//! terminator; the codec adds CRLF).

use std::fmt;

use crate::chan::normalize_channel_name;

/// A command the client sends to the server.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// `PASS <password>`
    Pass(String),
    /// `NICK <nick>`
    Nick(String),
    /// `USER <p> <p> <p> :<realname>`, the placeholder repeated three times.
    User {
        /// Placeholder used for the username, mode and unused fields.
        placeholder: String,
        /// Real name, sent as the trailing parameter.
        realname: String,
    },
    /// `JOIN <#name>`
    Join(String),
    /// `PART <#name>`
    Part(String),
    /// `PRIVMSG <destination> :<text>`
    Privmsg {
        /// Channel or nickname.
        destination: String,
        /// Message body.
        text: String,
    },
    /// `WHOIS <nickname>`
    Whois(String),
    /// `PONG <serverHost>`
    Pong(String),
    /// `QUIT`
    Quit,
}

impl Command {
    /// `JOIN`, with the channel name normalized to carry a channel prefix.
    pub fn join(name: &str) -> Self {
        Self::Join(normalize_channel_name(name))
    }

    /// `PART`, with the channel name normalized to carry a channel prefix.
    pub fn part(name: &str) -> Self {
        Self::Part(normalize_channel_name(name))
    }

    /// `PRIVMSG` to a channel or nickname.
    pub fn privmsg(destination: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Privmsg {
            destination: destination.into(),
            text: text.into(),
        }
    }

    /// The command verb, e.g. `"PRIVMSG"`.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Pass(_) => "PASS",
            Self::Nick(_) => "NICK",
            Self::User { .. } => "USER",
            Self::Join(_) => "JOIN",
            Self::Part(_) => "PART",
            Self::Privmsg { .. } => "PRIVMSG",
            Self::Whois(_) => "WHOIS",
            Self::Pong(_) => "PONG",
            Self::Quit => "QUIT",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass(p) => write!(f, "PASS {p}"),
            Self::Nick(n) => write!(f, "NICK {n}"),
            Self::User {
                placeholder: p,
                realname,
            } => write!(f, "USER {p} {p} {p} :{realname}"),
            Self::Join(c) => write!(f, "JOIN {c}"),
            Self::Part(c) => write!(f, "PART {c}"),
            Self::Privmsg { destination, text } => write!(f, "PRIVMSG {destination} :{text}"),
            Self::Whois(n) => write!(f, "WHOIS {n}"),
            Self::Pong(host) => write!(f, "PONG {host}"),
            Self::Quit => f.write_str("QUIT"),
        }
    }
}
