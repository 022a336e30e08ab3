//! Numeric reply codes the client engine understands.
//!
//! Servers answer with three-digit numerics. Only the handful that drive
//! channel, member, topic and registration state are named here; every other
//! numeric keeps its literal digits as its name.
//!
//! # Reference
//! - RFC 2812 Section 5: Replies

#![allow(non_camel_case_types)]

/// Known numeric reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Numeric {
    /// 001 - Welcome to the network
    RPL_WELCOME = 1,
    /// 311 - WHOIS user: `<me> <nick> <user> <host> * :<realname>`
    RPL_WHOISUSER = 311,
    /// 331 - No topic is set
    RPL_NOTOPIC = 331,
    /// 332 - Channel topic
    RPL_TOPIC = 332,
    /// 353 - NAMES list entry
    RPL_NAMREPLY = 353,
    /// 366 - End of NAMES list
    RPL_ENDOFNAMES = 366,
    /// 372 - MOTD body line
    RPL_MOTD = 372,
    /// 375 - MOTD start
    RPL_MOTDSTART = 375,
    /// 376 - End of MOTD
    RPL_ENDOFMOTD = 376,
    /// 422 - MOTD file is missing
    ERR_NOMOTD = 422,
}

impl Numeric {
    /// Look up a numeric by its three-digit code.
    pub fn from_code(code: u16) -> Option<Self> {
        let numeric = match code {
            1 => Self::RPL_WELCOME,
            311 => Self::RPL_WHOISUSER,
            331 => Self::RPL_NOTOPIC,
            332 => Self::RPL_TOPIC,
            353 => Self::RPL_NAMREPLY,
            366 => Self::RPL_ENDOFNAMES,
            372 => Self::RPL_MOTD,
            375 => Self::RPL_MOTDSTART,
            376 => Self::RPL_ENDOFMOTD,
            422 => Self::ERR_NOMOTD,
            _ => return None,
        };
        Some(numeric)
    }

    /// The numeric code.
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Symbolic name, e.g. `"RPL_ENDOFMOTD"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::RPL_WELCOME => "RPL_WELCOME",
            Self::RPL_WHOISUSER => "RPL_WHOISUSER",
            Self::RPL_NOTOPIC => "RPL_NOTOPIC",
            Self::RPL_TOPIC => "RPL_TOPIC",
            Self::RPL_NAMREPLY => "RPL_NAMREPLY",
            Self::RPL_ENDOFNAMES => "RPL_ENDOFNAMES",
            Self::RPL_MOTD => "RPL_MOTD",
            Self::RPL_MOTDSTART => "RPL_MOTDSTART",
            Self::RPL_ENDOFMOTD => "RPL_ENDOFMOTD",
            Self::ERR_NOMOTD => "ERR_NOMOTD",
        }
    }

    /// Whether this numeric marks the end of registration.
    ///
    /// Servers without a MOTD send 422 instead of 376.
    pub fn completes_registration(self) -> bool {
        matches!(self, Self::RPL_ENDOFMOTD | Self::ERR_NOMOTD)
    }
}

impl std::fmt::Display for Numeric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
