//! Nickname validation utilities.
//!
//! # Reference
//! - RFC 2812 Section 2.3.1: Message format (nickname definition)

/// Extension trait for checking if a string is a valid IRC nickname.
pub trait NickExt {
    /// Check if this string is a valid IRC nickname per RFC 2812.
    ///
    /// Valid nicknames:
    /// - First character: letter (a-z, A-Z) or special character `[\]^_`{|}`
    /// - Subsequent characters: letter, digit (0-9), special, or hyphen (-)
    /// - Maximum length: 30 characters
    ///
    /// # Examples
    ///
    /// ```
    /// use parley_proto::NickExt;
    ///
    /// assert!("bob".is_valid_nick());
    /// assert!("[cool]".is_valid_nick());
    ///
    /// assert!(!"123nick".is_valid_nick());
    /// assert!(!"#room".is_valid_nick());
    /// assert!(!"".is_valid_nick());
    /// ```
    fn is_valid_nick(&self) -> bool;
}

/// Default maximum nickname length per RFC 2812 (modern servers).
pub const DEFAULT_NICK_MAX_LEN: usize = 30;

/// Per RFC 2812: `[ ] \ ` ^ _ { | }`
#[inline]
fn is_special(c: char) -> bool {
    matches!(c, '[' | ']' | '\\' | '`' | '_' | '^' | '{' | '|' | '}')
}

impl NickExt for &str {
    fn is_valid_nick(&self) -> bool {
        if self.is_empty() || self.len() > DEFAULT_NICK_MAX_LEN {
            return false;
        }

        let mut chars = self.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || is_special(first) => {}
            _ => return false,
        }

        chars.all(|c| c.is_ascii_alphanumeric() || is_special(c) || c == '-')
    }
}

impl NickExt for String {
    fn is_valid_nick(&self) -> bool {
        self.as_str().is_valid_nick()
    }
}
