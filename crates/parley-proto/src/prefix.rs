//! Message source (prefix) splitting.
//!
//! A source is either a server name or a user's `nick!user@host` mask. The
//! client only ever needs the nickname part, but the full split is kept for
//! consumers that want to show hostmasks.

/// The parts of a `nick!user@host` source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Source {
    /// Nickname (or server name for server sources).
    pub nickname: String,
    /// Username, empty if absent.
    pub username: String,
    /// Hostname, empty if absent.
    pub hostname: String,
}

impl Source {
    /// Split a source string. A leading `:` is tolerated.
    ///
    /// This is a lenient parser that does not validate the components.
    pub fn parse(s: &str) -> Self {
        let s = s.strip_prefix(':').unwrap_or(s);
        let (rest, hostname) = match s.split_once('@') {
            Some((rest, host)) => (rest, host),
            None => (s, ""),
        };
        let (nickname, username) = match rest.split_once('!') {
            Some((nick, user)) => (nick, user),
            None => (rest, ""),
        };
        Self {
            nickname: nickname.to_string(),
            username: username.to_string(),
            hostname: hostname.to_string(),
        }
    }
}

/// Nickname of a source, discarding the `!user` and `@host` decorations.
///
/// ```
/// use parley_proto::prefix::nickname_of;
///
/// assert_eq!(nickname_of("eggspencer!eggspencer@82.35.66.18"), "eggspencer");
/// assert_eq!(nickname_of(":nick"), "nick");
/// ```
pub fn nickname_of(source: &str) -> &str {
    let source = source.strip_prefix(':').unwrap_or(source);
    let before_host = source.split('@').next().unwrap_or(source);
    before_host.split('!').next().unwrap_or(before_host)
}
