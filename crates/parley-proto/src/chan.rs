//! Channel name utilities.
//!
//! # Reference
//! - RFC 2812 Section 1.3: Channel names

/// Characters that mark a string as a channel identity.
pub const CHANNEL_PREFIXES: [char; 2] = ['#', '&'];

/// Status prefixes servers put in front of nicknames in NAMES replies.
pub const MEMBERSHIP_PREFIXES: [char; 5] = ['~', '&', '@', '%', '+'];

/// Extension trait for checking if a string is a valid IRC channel name.
pub trait ChannelExt {
    /// Check if this string is a valid IRC channel name.
    ///
    /// Valid channel names:
    /// - Start with '#' or '&'
    /// - Have at least one character after the prefix
    /// - Do not contain space, comma, colon, BEL (0x07), or other control characters
    /// - Are at most 50 characters long
    fn is_channel_name(&self) -> bool;
}

impl ChannelExt for &str {
    fn is_channel_name(&self) -> bool {
        let mut chars = self.chars();

        match chars.next() {
            Some(c) if CHANNEL_PREFIXES.contains(&c) => {}
            _ => return false,
        }

        // RFC 2812 says 50 chars including prefix
        let len = self.chars().count();
        if len < 2 || len > 50 {
            return false;
        }

        chars.all(|c| c != ' ' && c != ',' && c != ':' && !c.is_control())
    }
}

impl ChannelExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }
}

/// Ensure a channel name begins with a channel prefix, prepending `#` if not.
///
/// ```
/// use parley_proto::chan::normalize_channel_name;
///
/// assert_eq!(normalize_channel_name("rust"), "#rust");
/// assert_eq!(normalize_channel_name("#rust"), "#rust");
/// assert_eq!(normalize_channel_name("&local"), "&local");
/// ```
pub fn normalize_channel_name(name: &str) -> String {
    let name = name.trim();
    match name.chars().next() {
        Some(c) if CHANNEL_PREFIXES.contains(&c) => name.to_string(),
        _ => format!("#{name}"),
    }
}

/// Strip NAMES status prefixes (`@op`, `+voice`, `~@owner`) from a nickname.
pub fn strip_membership_prefix(entry: &str) -> &str {
    entry.trim_start_matches(&MEMBERSHIP_PREFIXES[..])
}
