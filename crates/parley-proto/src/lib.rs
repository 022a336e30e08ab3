//! # parley-proto
//!
//! The stateless protocol layer of the parley IRC client engine: a total
//! line decoder, the numeric reply table, outbound command formatting and a
//! tokio line codec.
//!
//! ## Decoding
//!
//! ```rust
//! use parley_proto::{decode, Numeric};
//!
//! let ev = decode(":srv 366 nick #room :End of /NAMES list.");
//! assert_eq!(ev.reply(), Some(Numeric::RPL_ENDOFNAMES));
//! assert_eq!(ev.params_raw, "nick #room");
//!
//! // Lines that do not match the grammar are not errors.
//! let junk = decode(":irc.example.net");
//! assert!(!junk.is_recognized());
//! assert_eq!(junk.original, ":irc.example.net");
//! ```
//!
//! ## Formatting
//!
//! ```rust
//! use parley_proto::Command;
//!
//! assert_eq!(Command::join("rust").to_string(), "JOIN #rust");
//! assert_eq!(Command::privmsg("#rust", "hi").to_string(), "PRIVMSG #rust :hi");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod chan;
pub mod command;
pub mod decode;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod nick;
pub mod numeric;
pub mod prefix;

pub use self::chan::{normalize_channel_name, strip_membership_prefix, ChannelExt};
pub use self::command::Command;
pub use self::decode::{decode, DecodedEvent, TagKind, WhoisUser};
pub use self::error::ProtocolError;
#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, MAX_LINE_LEN};
pub use self::nick::NickExt;
pub use self::numeric::Numeric;
pub use self::prefix::{nickname_of, Source};
