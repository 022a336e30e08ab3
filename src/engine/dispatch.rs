//! Mapping decoded lines to engine events.
//!
//! Pure: no state, no I/O. The engine applies state changes (registration)
//! after interpreting.

use parley_proto::{ChannelExt, DecodedEvent, Numeric, TagKind};

use super::EngineEvent;

/// Interpret one decoded line. `None` for anything the engine ignores.
pub fn interpret(decoded: DecodedEvent) -> Option<EngineEvent> {
    if let Some(reply) = decoded.reply() {
        return interpret_reply(reply, decoded);
    }
    if decoded.kind != Some(TagKind::Named) {
        return None;
    }

    let verb = decoded.name.as_deref()?.to_ascii_uppercase();
    match verb.as_str() {
        "PRIVMSG" => {
            let destination =
                channel_in(&decoded.params_raw).or_else(|| nickname_in(&decoded.params_raw))?;
            let sender = decoded.source_nickname()?.to_string();
            Some(EngineEvent::PrivmsgReceived {
                destination,
                sender,
                text: decoded.trailing,
            })
        }
        "JOIN" => {
            let channel = membership_target(&decoded)?;
            let nickname = decoded.source_nickname()?.to_string();
            Some(EngineEvent::MemberJoinedChannel { channel, nickname })
        }
        "PART" => {
            let channel = membership_target(&decoded)?;
            let nickname = decoded.source_nickname()?.to_string();
            Some(EngineEvent::MemberLeftChannel { channel, nickname })
        }
        "QUIT" => {
            let nickname = decoded.source_nickname()?.to_string();
            Some(EngineEvent::MemberQuit {
                nickname,
                reason: decoded.trailing,
            })
        }
        "TOPIC" => {
            let channel = channel_in(&decoded.params_raw)?;
            Some(EngineEvent::TopicChanged {
                channel,
                topic: decoded.trailing,
            })
        }
        _ => None,
    }
}

fn interpret_reply(reply: Numeric, decoded: DecodedEvent) -> Option<EngineEvent> {
    match reply {
        r if r.completes_registration() => Some(EngineEvent::Connected),
        Numeric::RPL_ENDOFNAMES => {
            channel_in(&decoded.params_raw).map(|channel| EngineEvent::ChannelJoined { channel })
        }
        Numeric::RPL_NAMREPLY => {
            let channel = channel_in(&decoded.params_raw)?;
            Some(EngineEvent::NameList {
                channel,
                nicknames: decoded.trailing,
            })
        }
        Numeric::RPL_TOPIC => {
            let channel = channel_in(&decoded.params_raw)?;
            Some(EngineEvent::TopicChanged {
                channel,
                topic: decoded.trailing,
            })
        }
        Numeric::RPL_NOTOPIC => {
            let channel = channel_in(&decoded.params_raw)?;
            Some(EngineEvent::TopicChanged {
                channel,
                topic: String::new(),
            })
        }
        Numeric::RPL_WHOISUSER => Some(EngineEvent::DirectoryEntryReceived(Box::new(decoded))),
        _ => None,
    }
}

/// First parameter token that is a channel name.
fn channel_in(params: &str) -> Option<String> {
    params
        .split_whitespace()
        .find(|token| token.is_channel_name())
        .map(str::to_string)
}

/// First parameter token, taken as a user target. Servers may hand out
/// nicknames outside the registration rules, so the token is not validated.
fn nickname_in(params: &str) -> Option<String> {
    params.split_whitespace().next().map(str::to_string)
}

/// Channel of a JOIN or PART: the first channel parameter, else the trailing
/// field (`:nick JOIN :#chan`).
fn membership_target(decoded: &DecodedEvent) -> Option<String> {
    channel_in(&decoded.params_raw).or_else(|| {
        let trailing = decoded.trailing.trim();
        trailing.is_channel_name().then(|| trailing.to_string())
    })
}
