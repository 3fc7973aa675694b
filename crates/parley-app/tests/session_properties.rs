//! Property-based tests for the session reducer.
//!
//! Tests verify that invariants hold under arbitrary event sequences, the
//! way a well-behaved consumer (the store) applies them: faults keep the
//! previous snapshot.

use std::sync::Arc;

use parley_app::{
    ChannelEvent, ChannelName, Session, SessionEvent, Username,
    invariants::{InvariantRegistry, check_log_growth},
    reduce,
};
use proptest::prelude::*;

const CHANNELS: [&str; 3] = ["a", "b", "c"];
const USERS: [&str; 3] = ["tom1", "amy", "bob"];

fn channel() -> impl Strategy<Value = ChannelName> {
    prop::sample::select(CHANNELS.to_vec()).prop_map(ChannelName::from)
}

fn user() -> impl Strategy<Value = Username> {
    prop::sample::select(USERS.to_vec()).prop_map(Username::from)
}

/// Events that land on a channel's history.
fn log_event() -> impl Strategy<Value = SessionEvent> {
    prop_oneof![
        (channel(), user()).prop_map(|(channel, username)| SessionEvent::ChannelJoinedByUser {
            channel,
            username
        }),
        (channel(), user()).prop_map(|(channel, username)| SessionEvent::ChannelLeftByUser {
            channel,
            username
        }),
        (channel(), user(), "[a-z ]{0,8}").prop_map(|(channel, sender, text)| {
            SessionEvent::ChannelChat { channel, sender, text: text.into() }
        }),
    ]
}

/// Any event, including lifecycle, directory, and focus.
fn event() -> impl Strategy<Value = SessionEvent> {
    prop_oneof![
        1 => user().prop_map(|identity| SessionEvent::Connected { identity }),
        1 => Just(SessionEvent::Closed),
        1 => Just(SessionEvent::Error { detail: "reset".into() }),
        2 => prop::collection::vec(channel(), 0..3)
            .prop_map(|names| SessionEvent::ChannelsListed { names }),
        6 => log_event(),
        1 => (channel(), prop::collection::vec(user(), 0..3)).prop_map(|(channel, members)| {
            SessionEvent::ChannelMembersSnapshot { channel, members }
        }),
        2 => channel().prop_map(|channel| SessionEvent::SelfJoinedChannel { channel }),
        1 => channel().prop_map(|channel| SessionEvent::SelfLeftChannel { channel }),
        2 => channel().prop_map(|channel| SessionEvent::FocusChanged { channel }),
        1 => Just(SessionEvent::FrameRejected { detail: "bad frame".into() }),
    ]
}

/// Apply an event the way the store does: faults keep the old snapshot.
fn step(session: &Session, event: &SessionEvent) -> Session {
    reduce(session, event).unwrap_or_else(|_| session.clone())
}

/// Connected session that knows every test channel.
fn primed() -> Session {
    let session = step(&Session::new(), &SessionEvent::Connected { identity: "tom1".into() });
    step(&session, &SessionEvent::ChannelsListed {
        names: CHANNELS.iter().map(|n| ChannelName::from(*n)).collect(),
    })
}

/// History entry an event is expected to append.
fn expected_entry(event: &SessionEvent) -> Option<ChannelEvent> {
    match event {
        SessionEvent::ChannelJoinedByUser { username, .. } => {
            Some(ChannelEvent::Joined { username: username.clone() })
        },
        SessionEvent::ChannelLeftByUser { username, .. } => {
            Some(ChannelEvent::Left { username: username.clone() })
        },
        SessionEvent::ChannelChat { sender, text, .. } => {
            Some(ChannelEvent::Chat { sender: sender.clone(), text: text.clone() })
        },
        _ => None,
    }
}

proptest! {
    #[test]
    fn prop_invariants_hold(events in prop::collection::vec(event(), 0..60)) {
        let invariants = InvariantRegistry::standard();
        let mut session = Session::new();

        for event in &events {
            let next = step(&session, event);
            prop_assert!(invariants.check_all(&next).is_ok(), "after {:?}", event);
            prop_assert!(check_log_growth(&session, &next).is_ok(), "after {:?}", event);
            session = next;
        }
    }

    #[test]
    fn prop_listing_is_idempotent(names in prop::collection::vec(channel(), 0..6)) {
        let listed = SessionEvent::ChannelsListed { names };
        let once = step(&primed(), &listed);
        let twice = step(&once, &listed);

        prop_assert_eq!(once.channels(), twice.channels());
        prop_assert!(Arc::ptr_eq(
            once.channel("a").unwrap(),
            twice.channel("a").unwrap()
        ));
    }

    #[test]
    fn prop_history_is_arrival_order(events in prop::collection::vec(log_event(), 0..40)) {
        let mut session = primed();
        for event in &events {
            session = step(&session, event);
        }

        for name in CHANNELS {
            let expected: Vec<_> = events
                .iter()
                .filter(|e| e.channel().is_some_and(|c| c == name))
                .filter_map(expected_entry)
                .collect();
            let history: Vec<_> = session.channel(name).unwrap().events().iter().cloned().collect();
            prop_assert_eq!(history, expected);
        }
    }

    #[test]
    fn prop_activity_tracks_focus(events in prop::collection::vec(log_event(), 1..20)) {
        let focused = ChannelName::from("a");
        let mut session = step(&primed(), &SessionEvent::FocusChanged { channel: focused.clone() });

        for event in &events {
            session = step(&session, event);
        }

        prop_assert!(!session.channel("a").unwrap().has_activity());

        for name in ["b", "c"] {
            let flagged = events.iter().any(|e| {
                e.channel().is_some_and(|c| c == name)
                    && !matches!(e, SessionEvent::ChannelLeftByUser { username, .. } if username == "tom1")
            });
            prop_assert_eq!(session.channel(name).unwrap().has_activity(), flagged);

            let refocused = step(&session, &SessionEvent::FocusChanged { channel: name.into() });
            prop_assert!(!refocused.channel(name).unwrap().has_activity());
        }
    }

    #[test]
    fn prop_untouched_channels_are_shared(event in event()) {
        let before = step(&primed(), &SessionEvent::FocusChanged { channel: "a".into() });
        let after = step(&before, &event);

        for (name, channel) in before.channels() {
            if event.channel() == Some(name) {
                continue;
            }
            prop_assert!(
                Arc::ptr_eq(channel, after.channel(name.as_str()).unwrap()),
                "channel {} copied by {:?}", name, event
            );
        }
    }

    #[test]
    fn prop_leave_clears_focus_only_when_matching(
        focus in channel(),
        leave in channel(),
    ) {
        let session = step(&primed(), &SessionEvent::SelfJoinedChannel { channel: leave.clone() });
        let session = step(&session, &SessionEvent::FocusChanged { channel: focus.clone() });
        let session = step(&session, &SessionEvent::SelfLeftChannel { channel: leave.clone() });

        if focus == leave {
            prop_assert_eq!(session.focused(), None);
        } else {
            prop_assert_eq!(session.focused(), Some(&focus));
        }
        prop_assert!(!session.is_joined(leave.as_str()));
    }
}
