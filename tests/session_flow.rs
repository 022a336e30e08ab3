//! Integration tests for a full client session over an in-memory transport.
//!
//! Drives the session the way a server would: registration, joins, roster
//! snapshots, messages, keep-alive, and teardown.

mod common;

use common::TestSession;
use common::session::{NICK, SERVER};
use parley::{ChannelEvent, ConnectionState, EngineConfig, EngineEvent, SendDecision, SessionEvent};

#[test]
fn test_registration_sends_credentials_then_connects() {
    let mut config = EngineConfig::new(SERVER, NICK);
    config.password = Some("sekrit".into());
    config.realname = "Rar Rar".into();
    let mut test = TestSession::with_config(config);

    test.session.connect().unwrap();
    assert_eq!(test.session.engine().state(), ConnectionState::Connecting);
    test.session.on_transport_ready().unwrap();
    assert_eq!(
        test.transport.written(),
        vec![
            "PASS sekrit",
            "NICK rarrarrar",
            "USER parley parley parley :Rar Rar"
        ]
    );

    test.feed(":irc.local 001 rarrarrar :Welcome");
    test.feed(":irc.local 375 rarrarrar :- irc.local Message of the day -");
    test.feed(":irc.local 372 rarrarrar :- hello");
    assert_eq!(test.session.engine().state(), ConnectionState::Connecting);

    test.feed(":irc.local 376 rarrarrar :End of /MOTD command.");
    assert_eq!(test.session.engine().state(), ConnectionState::Connected);
    assert!(matches!(
        test.session_events.all().as_slice(),
        [SessionEvent::Connected]
    ));
}

#[test]
fn test_missing_motd_also_connects() {
    let mut test = TestSession::new();
    test.session.connect().unwrap();
    test.feed(":irc.local 422 rarrarrar :MOTD File is missing");
    assert!(test.session.engine().is_connected());
}

#[test]
fn test_join_confirmed_by_end_of_names() {
    let mut test = TestSession::registered();

    let room = test.session.join("room").unwrap();
    assert_eq!(test.transport.take_written(), vec!["JOIN #room"]);
    assert!(!room.read().is_joined());

    test.feed(":irc.local 332 rarrarrar #room :Room topic");
    test.feed(":irc.local 353 rarrarrar = #room :rarrarrar @edspencer +NickP");
    test.feed(":irc.local 366 rarrarrar #room :End of /NAMES list.");

    assert!(test.engine_events.all().contains(&EngineEvent::ChannelJoined {
        channel: "#room".into()
    }));
    let room = room.read();
    assert!(room.is_joined());
    assert_eq!(room.topic(), "Room topic");
    assert_eq!(room.nicknames(), vec!["NickP", "edspencer", "rarrarrar"]);

    let joined: Vec<String> = test
        .session_events
        .all()
        .iter()
        .filter_map(|e| match e {
            SessionEvent::ChannelJoined(handle) => Some(handle.read().name().to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(joined, vec!["#room"]);
}

#[test]
fn test_joining_twice_sends_one_command() {
    let mut test = TestSession::registered();
    test.session.join("#a").unwrap();
    test.session.join("#a").unwrap();

    assert_eq!(test.session.directory().len(), 1);
    assert_eq!(test.transport.written(), vec!["JOIN #a"]);
}

#[test]
fn test_channel_messages_are_attributed() {
    let mut test = TestSession::registered();
    test.session.join("#room").unwrap();
    test.session.join("#other").unwrap();
    test.feed(":irc.local 353 rarrarrar = #room :rarrarrar a");
    test.feed(":irc.local 353 rarrarrar = #other :rarrarrar");
    test.channel_events.take();

    test.feed(":a!a@h PRIVMSG #room :hello");
    test.feed(":a!a@h PRIVMSG #other :not a member here");

    let events = test.channel_events.all();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].channel, "#room");
    let ChannelEvent::MessageReceived(message) = &events[0].event else {
        panic!("expected a message, got {:?}", events[0].event);
    };
    assert_eq!(message.sender_nickname(), "a");
    assert_eq!(message.text(), "hello");

    let other = test.session.find_channel("#other").unwrap();
    assert!(other.read().messages().is_empty());
}

#[test]
fn test_private_message_is_published_not_stored() {
    let mut test = TestSession::registered();
    test.feed(":a!a@h PRIVMSG bob :hi");

    assert_eq!(
        test.engine_events.all(),
        vec![EngineEvent::PrivmsgReceived {
            destination: "bob".into(),
            sender: "a".into(),
            text: "hi".into(),
        }]
    );
    assert!(test.channel_events.all().is_empty());
}

#[test]
fn test_trailing_may_contain_colons_and_prefixes() {
    let mut test = TestSession::registered();
    let room = test.session.join("#room").unwrap();
    test.feed(":irc.local 353 rarrarrar = #room :a");
    test.feed(":a!a@h PRIVMSG #room :see #other at 10:30 :)");

    assert_eq!(room.read().messages()[0].text(), "see #other at 10:30 :)");
}

#[test]
fn test_keepalive_probe() {
    let mut test = TestSession::registered();
    test.feed("PING :irc.local");

    assert_eq!(test.transport.written(), vec!["PONG irc.local"]);
    assert_eq!(
        test.engine_kinds(),
        vec!["ping-received", "message-sent", "pong-sent"]
    );
}

#[test]
fn test_send_hook_veto_is_not_an_error() {
    let mut test = TestSession::registered();
    test.session.engine_mut().add_send_hook(|line| {
        if line.starts_with("PRIVMSG") {
            SendDecision::Veto
        } else {
            SendDecision::Proceed
        }
    });

    let room = test.session.join("#room").unwrap();
    test.feed(":irc.local 353 rarrarrar = #room :rarrarrar");
    let outcome = test.session.send_privmsg("#room", "muted").unwrap();

    assert_eq!(outcome, parley::SendOutcome::Vetoed);
    assert_eq!(test.transport.written(), vec!["JOIN #room"]);
    assert!(room.read().messages().is_empty());
    assert!(test.session.engine().is_connected());
}

#[test]
fn test_write_failure_ends_session() {
    let mut test = TestSession::registered();
    test.transport.fail_writes(true);

    let err = test.session.whois("ed").unwrap_err();
    assert_eq!(err.error_code(), "io");
    assert_eq!(test.session.engine().state(), ConnectionState::Disconnected);
    assert!(matches!(
        test.session_events.all().as_slice(),
        [SessionEvent::Disconnected]
    ));
}

#[test]
fn test_malformed_and_unknown_lines_are_absorbed() {
    let mut test = TestSession::registered();
    test.session.join("#room").unwrap();
    test.engine_events.take();

    for line in [
        "",
        ":",
        "::::",
        ":irc.local",
        ":irc.local 999 rarrarrar :what",
        ":ghost!g@h PART #never-joined",
        ":a!a@h PRIVMSG #untracked :hello?",
        ":irc.local 366 rarrarrar #untracked :End of /NAMES list.",
    ] {
        test.feed(line);
    }

    assert!(test.session.engine().is_connected());
    assert_eq!(test.session.directory().names(), vec!["#room"]);
}

#[test]
fn test_leave_and_disconnect() {
    let mut test = TestSession::registered();
    test.session.join("#room").unwrap();
    assert!(test.session.leave("#room").unwrap());
    assert!(!test.session.leave("#room").unwrap());
    test.session.disconnect();

    assert_eq!(
        test.transport.written(),
        vec!["JOIN #room", "PART #room", "QUIT"]
    );
    assert!(!test.transport.is_open());
    let kinds: Vec<&str> = test
        .session_events
        .all()
        .iter()
        .map(|e| match e {
            SessionEvent::Connected => "connected",
            SessionEvent::Disconnected => "disconnected",
            SessionEvent::ChannelJoined(_) => "channel-joined",
            SessionEvent::ChannelLeft(_) => "channel-left",
        })
        .collect();
    assert_eq!(kinds, vec!["channel-left", "disconnected"]);
}
