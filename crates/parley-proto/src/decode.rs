//! Nom-based line decoder.
//!
//! Turns one raw server line into a [`DecodedEvent`]. Decoding is total: a
//! line that does not match the grammar yields an event with only
//! [`DecodedEvent::original`] set, which callers treat as a no-op.
//!
//! Grammar:
//! ```text
//! [":" source SP] tag [SP params]
//! tag    = 3digit / 1*letter
//! params = *(middle SP) [":" trailing]
//! ```
//!
//! Some servers omit the leading colon on the source. When a line does not
//! start with `:`, the first token is still taken as the source unless it is
//! tag-shaped and the token after it is not (`PING :token` has no source,
//! `nick!user@host JOIN :#chan` does).

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, space0, space1},
    error::ErrorKind,
    sequence::preceded,
    IResult,
};

use crate::numeric::Numeric;
use crate::prefix::nickname_of;

/// Whether the tag token was a numeric reply or a named command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagKind {
    /// Three-digit reply code.
    Numeric,
    /// Alphabetic command name.
    Named,
}

/// Fields extracted from a WHOIS user reply (311).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WhoisUser {
    /// The nickname the reply describes.
    pub nickname: String,
    /// Username (ident).
    pub username: String,
    /// Hostname.
    pub hostname: String,
    /// Real name / GECOS.
    pub realname: String,
}

/// One decoded server line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedEvent {
    /// The line exactly as received.
    pub original: String,
    /// Source of the line (server name or `nick!user@host`), colon stripped.
    pub source: Option<String>,
    /// Symbolic numeric name (`RPL_TOPIC`), literal numeric for unknown
    /// codes (`"999"`), or the literal command name (`PRIVMSG`).
    pub name: Option<String>,
    /// Numeric code, for numeric tags.
    pub code: Option<u16>,
    /// Numeric or named tag.
    pub kind: Option<TagKind>,
    /// Parameter text before the trailing marker, whitespace-trimmed.
    pub params_raw: String,
    /// Text after the trailing marker colon, empty if there is none.
    pub trailing: String,
    /// WHOIS user fields, for `RPL_WHOISUSER` lines that carry them.
    pub whois: Option<WhoisUser>,
}

impl DecodedEvent {
    /// An event for a line that did not match the grammar.
    pub fn unrecognized(line: &str) -> Self {
        Self {
            original: line.to_string(),
            ..Self::default()
        }
    }

    /// Whether the line matched the grammar.
    pub fn is_recognized(&self) -> bool {
        self.name.is_some()
    }

    /// The known numeric this line carries, if any.
    pub fn reply(&self) -> Option<Numeric> {
        self.code.and_then(Numeric::from_code)
    }

    /// Whether this is the named command `verb` (ASCII case-insensitive).
    pub fn is_command(&self, verb: &str) -> bool {
        self.kind == Some(TagKind::Named)
            && self
                .name
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(verb))
    }

    /// Nickname part of the source, if there is a source.
    pub fn source_nickname(&self) -> Option<&str> {
        self.source
            .as_deref()
            .map(nickname_of)
            .filter(|nick| !nick.is_empty())
    }

    /// Whitespace-separated parameters before the trailing field.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.params_raw.split_whitespace()
    }
}

/// Decode one line. Never fails; see the module docs.
pub fn decode(line: &str) -> DecodedEvent {
    let body = line.trim_end_matches(['\r', '\n']);

    let parts = match parse_line(body) {
        Ok((_, parts)) => parts,
        Err(_) => return DecodedEvent::unrecognized(line),
    };

    let (params_raw, trailing) = split_trailing(parts.params);

    let (name, code, kind) = if parts.tag.bytes().all(|b| b.is_ascii_digit()) {
        let code: u16 = match parts.tag.parse() {
            Ok(code) => code,
            Err(_) => return DecodedEvent::unrecognized(line),
        };
        let name = Numeric::from_code(code)
            .map(|n| n.name().to_string())
            .unwrap_or_else(|| parts.tag.to_string());
        (name, Some(code), TagKind::Numeric)
    } else {
        (parts.tag.to_string(), None, TagKind::Named)
    };

    let whois = if code == Some(Numeric::RPL_WHOISUSER.code()) {
        extract_whois(params_raw, trailing)
    } else {
        None
    };

    DecodedEvent {
        original: line.to_string(),
        source: parts.source.map(str::to_string),
        name: Some(name),
        code,
        kind: Some(kind),
        params_raw: params_raw.to_string(),
        trailing: trailing.to_string(),
        whois,
    }
}

/// Borrowed pieces of a line that matched the grammar.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LineParts<'a> {
    source: Option<&'a str>,
    tag: &'a str,
    params: &'a str,
}

/// RFC 2812: command = 1*letter / 3digit
fn is_tag_token(token: &str) -> bool {
    let is_all_letters = !token.is_empty() && token.bytes().all(|b| b.is_ascii_alphabetic());
    let is_three_digits = token.len() == 3 && token.bytes().all(|b| b.is_ascii_digit());
    is_all_letters || is_three_digits
}

/// `:source` up to the first space.
fn parse_prefix(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while1(|c| c != ' '))(input)
}

/// A source written without its leading colon, or nothing.
fn parse_bare_source(input: &str) -> IResult<&str, Option<&str>> {
    let (after_first, first) = take_while1(|c| c != ' ')(input)?;
    let second = after_first.trim_start_matches(' ').split(' ').next().unwrap_or("");

    if is_tag_token(first) && !is_tag_token(second) {
        return Ok((input, None));
    }

    let (rest, _) = space1(after_first)?;
    Ok((rest, Some(first)))
}

fn parse_tag(input: &str) -> IResult<&str, &str> {
    let (rest, tag) = take_while1(|c: char| c.is_ascii_alphanumeric())(input)?;

    if is_tag_token(tag) && (rest.is_empty() || rest.starts_with(' ')) {
        Ok((rest, tag))
    } else {
        Err(nom::Err::Error(nom::error::Error::new(
            input,
            ErrorKind::AlphaNumeric,
        )))
    }
}

fn parse_line(input: &str) -> IResult<&str, LineParts<'_>> {
    let (input, source) = if input.starts_with(':') {
        let (input, source) = parse_prefix(input)?;
        let (input, _) = space1(input)?;
        (input, Some(source))
    } else {
        parse_bare_source(input)?
    };

    let (input, tag) = parse_tag(input)?;
    let (params, _) = space0(input)?;

    Ok((
        "",
        LineParts {
            source,
            tag,
            params,
        },
    ))
}

/// Split parameter text at the trailing marker: the first colon that opens
/// the text or follows a space. Colons inside a token (IPv6 hosts) are kept.
fn split_trailing(params: &str) -> (&str, &str) {
    let bytes = params.as_bytes();
    let marker = bytes
        .iter()
        .enumerate()
        .position(|(i, &b)| b == b':' && (i == 0 || bytes[i - 1] == b' '));

    match marker {
        Some(i) => (params[..i].trim(), &params[i + 1..]),
        None => (params.trim(), ""),
    }
}

/// `<me> <nick> <user> <host> [*]` with the realname as trailing.
fn extract_whois(params_raw: &str, trailing: &str) -> Option<WhoisUser> {
    let mut tokens = params_raw.split_whitespace().skip(1);
    let nickname = tokens.next()?;
    let username = tokens.next()?;
    let hostname = tokens.next()?;

    Some(WhoisUser {
        nickname: nickname.to_string(),
        username: username.to_string(),
        hostname: hostname.to_string(),
        realname: trailing.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER: &str = "my.irc.server.com";

    #[test]
    fn test_motd_start() {
        let line = format!(":{SERVER} 375 nickname :- {SERVER} Message of the Day -");
        let ev = decode(&line);

        assert_eq!(ev.original, line);
        assert_eq!(ev.code, Some(375));
        assert_eq!(ev.name.as_deref(), Some("RPL_MOTDSTART"));
        assert_eq!(ev.source.as_deref(), Some(SERVER));
        assert_eq!(ev.params_raw, "nickname");
        assert_eq!(ev.trailing, format!("- {SERVER} Message of the Day -"));
        assert_eq!(ev.kind, Some(TagKind::Numeric));
    }

    #[test]
    fn test_end_of_motd() {
        let ev = decode(":srv 376 nick :End of /MOTD command.");
        assert_eq!(ev.reply(), Some(Numeric::RPL_ENDOFMOTD));
        assert_eq!(ev.name.as_deref(), Some("RPL_ENDOFMOTD"));
        assert_eq!(ev.trailing, "End of /MOTD command.");
    }

    #[test]
    fn test_topic_reply() {
        let ev = decode(&format!(
            ":{SERVER} 332 nickname #myChannel :You did it Saul - you brought them back"
        ));
        assert_eq!(ev.reply(), Some(Numeric::RPL_TOPIC));
        assert_eq!(ev.params_raw, "nickname #myChannel");
        assert_eq!(ev.trailing, "You did it Saul - you brought them back");
    }

    #[test]
    fn test_whois_user() {
        let ev = decode(":srv 311 nick edNick edUser host.example * :Ed Spencer");
        assert_eq!(ev.name.as_deref(), Some("RPL_WHOISUSER"));
        assert_eq!(
            ev.whois,
            Some(WhoisUser {
                nickname: "edNick".into(),
                username: "edUser".into(),
                hostname: "host.example".into(),
                realname: "Ed Spencer".into(),
            })
        );
    }

    #[test]
    fn test_whois_ipv6_host() {
        let ev = decode(":srv 311 me ed ed 2001:db8::1 * :Ed");
        let whois = ev.whois.unwrap();
        assert_eq!(whois.hostname, "2001:db8::1");
        assert_eq!(whois.realname, "Ed");
    }

    #[test]
    fn test_whois_short_params_leaves_fields_absent() {
        let ev = decode(":srv 311 me ed :Ed");
        assert!(ev.is_recognized());
        assert_eq!(ev.reply(), Some(Numeric::RPL_WHOISUSER));
        assert!(ev.whois.is_none());
    }

    #[test]
    fn test_unknown_numeric_keeps_digits() {
        let ev = decode(":srv 999 me :whatever");
        assert_eq!(ev.name.as_deref(), Some("999"));
        assert_eq!(ev.code, Some(999));
        assert_eq!(ev.reply(), None);
    }

    #[test]
    fn test_privmsg_trailing_keeps_colons_and_prefixes() {
        let ev = decode(":a!a@h PRIVMSG #room :hi: see #other :)");
        assert!(ev.is_command("PRIVMSG"));
        assert_eq!(ev.source.as_deref(), Some("a!a@h"));
        assert_eq!(ev.source_nickname(), Some("a"));
        assert_eq!(ev.params_raw, "#room");
        assert_eq!(ev.trailing, "hi: see #other :)");
    }

    #[test]
    fn test_source_without_colon() {
        let ev = decode("eggspencer!eggspencer@82.35.66.18 JOIN :#rarrar");
        assert!(ev.is_command("JOIN"));
        assert_eq!(ev.source.as_deref(), Some("eggspencer!eggspencer@82.35.66.18"));
        assert_eq!(ev.trailing, "#rarrar");

        let ev = decode("irc.example 376 me :End");
        assert_eq!(ev.source.as_deref(), Some("irc.example"));
        assert_eq!(ev.reply(), Some(Numeric::RPL_ENDOFMOTD));
    }

    #[test]
    fn test_no_source() {
        let ev = decode("PING :host");
        assert!(ev.is_command("PING"));
        assert_eq!(ev.source, None);
        assert_eq!(ev.params_raw, "");
        assert_eq!(ev.trailing, "host");
    }

    #[test]
    fn test_no_trailing() {
        let ev = decode(":n!u@h JOIN #chan");
        assert_eq!(ev.params_raw, "#chan");
        assert_eq!(ev.trailing, "");
    }

    #[test]
    fn test_crlf_stripped_but_original_kept() {
        let ev = decode(":srv 366 me #room :End of /NAMES list.\r\n");
        assert_eq!(ev.original, ":srv 366 me #room :End of /NAMES list.\r\n");
        assert_eq!(ev.trailing, "End of /NAMES list.");
    }

    #[test]
    fn test_malformed_lines() {
        for line in ["", " ", ":", ": 376", "foo!bar", ":srv 37 x", ":srv PRIV-MSG x", "☃"] {
            let ev = decode(line);
            assert_eq!(ev.original, line);
            assert!(!ev.is_recognized(), "{line:?} should be unrecognized");
            assert!(ev.source.is_none());
            assert!(ev.params_raw.is_empty());
            assert!(ev.trailing.is_empty());
        }
    }

    #[test]
    fn test_split_trailing() {
        assert_eq!(split_trailing("a b :c d"), ("a b", "c d"));
        assert_eq!(split_trailing(":only"), ("", "only"));
        assert_eq!(split_trailing("a:b c"), ("a:b c", ""));
        assert_eq!(split_trailing("a :"), ("a", ""));
    }

    #[test]
    fn test_colon_inside_token_is_not_trailing() {
        // An IPv6 host in the params must survive intact.
        let ev = decode(":srv 311 me ed ed 2001:db8::1 * :Ed");
        assert_eq!(ev.params_raw, "me ed ed 2001:db8::1 *");
        assert_eq!(ev.trailing, "Ed");

        let ev = decode(":srv 311 me ed ed fe80::2 *");
        assert_eq!(ev.params_raw, "me ed ed fe80::2 *");
        assert_eq!(ev.trailing, "");

        let ev = decode(":ed!u@h PRIVMSG #c :a:b c");
        assert_eq!(ev.params_raw, "#c");
        assert_eq!(ev.trailing, "a:b c");
    }
}
