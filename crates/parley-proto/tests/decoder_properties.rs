//! Property tests for the line decoder.

use parley_proto::{decode, Command, TagKind};
use proptest::prelude::*;

proptest! {
    #[test]
    fn decode_is_total_and_keeps_original(line in ".{0,200}") {
        let ev = decode(&line);
        prop_assert_eq!(ev.original, line);
    }

    #[test]
    fn unrecognized_lines_carry_nothing_else(line in "[^A-Za-z0-9:]{0,40}") {
        let ev = decode(&line);
        prop_assert!(!ev.is_recognized());
        prop_assert!(ev.source.is_none());
        prop_assert!(ev.kind.is_none());
        prop_assert!(ev.params_raw.is_empty());
        prop_assert!(ev.trailing.is_empty());
    }

    #[test]
    fn privmsg_text_survives_decoding(
        nick in "[a-z][a-z0-9]{0,8}",
        channel in "[a-z][a-z0-9]{0,10}",
        text in "[^\r\n]{0,100}",
    ) {
        let line = format!(":{nick}!{nick}@host {}", Command::privmsg(format!("#{channel}"), text.clone()));
        let ev = decode(&line);
        prop_assert!(ev.is_command("PRIVMSG"));
        prop_assert_eq!(ev.kind, Some(TagKind::Named));
        prop_assert_eq!(ev.source_nickname(), Some(nick.as_str()));
        prop_assert_eq!(ev.params_raw, format!("#{channel}"));
        prop_assert_eq!(ev.trailing, text);
    }

    #[test]
    fn numeric_tags_keep_their_code(code in 100u16..1000, me in "[a-z]{1,8}") {
        let ev = decode(&format!(":srv {code:03} {me} :text"));
        prop_assert_eq!(ev.code, Some(code));
        prop_assert_eq!(ev.kind, Some(TagKind::Numeric));
        prop_assert!(ev.name.is_some());
    }
}

#[test]
fn join_command_round_trip() {
    let outbound = Command::join("x");
    assert_eq!(outbound.to_string(), "JOIN #x");

    let Command::Join(channel) = outbound else {
        panic!("expected a JOIN");
    };
    let ev = decode(&format!(":me!me@host JOIN :{channel}"));
    assert!(ev.is_command("JOIN"));
    assert_eq!(ev.source_nickname(), Some("me"));
    assert_eq!(ev.trailing, "#x");
}
