//! Property-based tests for the line-framed codec.
//!
//! Decoding must never panic on arbitrary input, and every message the
//! server can produce must decode to the event it announces.

use parley_proto::{
    ChannelName, Frame, MessageKind, ServerMessage, SessionEvent, Username,
    payloads::server::{ChannelInfo, ChatDelivery, ChannelsListing, Membership, UserConnected},
};
use proptest::prelude::*;

/// Names as the server produces them: non-empty, any unicode.
fn name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _#\\-\\p{L}]{1,16}"
}

fn membership() -> impl Strategy<Value = Membership> {
    (name(), name()).prop_map(|(channel, username)| Membership {
        channel: ChannelName::from(channel),
        username: Username::from(username),
    })
}

fn server_message() -> impl Strategy<Value = ServerMessage> {
    prop_oneof![
        name().prop_map(|n| ServerMessage::UserConnected(UserConnected { username: n.into() })),
        prop::collection::vec(name(), 0..8).prop_map(|names| {
            ServerMessage::ChannelsList(ChannelsListing {
                channels: names.into_iter().map(ChannelName::from).collect(),
            })
        }),
        membership().prop_map(ServerMessage::ChannelJoined),
        membership().prop_map(ServerMessage::ChannelLeft),
        membership().prop_map(ServerMessage::UserJoin),
        membership().prop_map(ServerMessage::UserLeave),
        (name(), prop::collection::vec(name(), 0..8)).prop_map(|(channel, users)| {
            ServerMessage::ChannelInfo(ChannelInfo {
                name: channel.into(),
                username: None,
                users: users.into_iter().map(Username::from).collect(),
            })
        }),
        (name(), name(), any::<String>()).prop_map(|(sender, channel, message)| {
            ServerMessage::ChannelChat(ChatDelivery {
                sender: sender.into(),
                channel: channel.into(),
                message,
            })
        }),
    ]
}

proptest! {
    #[test]
    fn prop_parse_never_panics(text in any::<String>()) {
        let _ = Frame::parse(&text);
        let _ = ServerMessage::decode(&text);
    }

    #[test]
    fn prop_known_kind_with_garbage_body_is_rejected_not_panicking(
        kind in prop::sample::select(MessageKind::ALL.to_vec()),
        body in "[^\\n]{0,64}",
    ) {
        let text = format!("{kind}\n{body}");
        let _ = ServerMessage::decode(&text);
    }

    #[test]
    fn prop_server_messages_survive_the_wire(msg in server_message()) {
        let text = msg.to_frame().unwrap().encode();
        let decoded = ServerMessage::decode(&text).unwrap();
        prop_assert_eq!(&decoded, &msg);
    }

    #[test]
    fn prop_chat_text_is_delivered_verbatim(text in any::<String>()) {
        let msg = ServerMessage::ChannelChat(ChatDelivery {
            sender: "amy".into(),
            channel: "general".into(),
            message: text.clone(),
        });
        let wire = msg.to_frame().unwrap().encode();

        match ServerMessage::decode(&wire).unwrap().into_event() {
            SessionEvent::ChannelChat { text: delivered, .. } => {
                prop_assert_eq!(&*delivered, text.as_str());
            },
            other => prop_assert!(false, "unexpected event {:?}", other),
        }
    }
}
