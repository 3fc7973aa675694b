//! Line input parsing.
//!
//! One line of input becomes at most one [`Command`]. Lines starting with
//! `/` are shell commands; anything else is chat text for the focused
//! channel.
//!
//! | Line | Result |
//! |---|---|
//! | `/connect <url> [token]` | `Connect` (token falls back to the configured one) |
//! | `/disconnect` | `Disconnect` |
//! | `/list` | `RequestChannelDirectory` |
//! | `/join <channel>` | `JoinChannel` |
//! | `/leave [channel]` | `LeaveChannel` (defaults to the focused channel) |
//! | `/focus <channel>` | `SetFocus` |
//! | `/quit` | ends the shell |
//! | text | `SendChatMessage` to the focused channel |

use parley_app::{ChannelName, Command, Session};
use thiserror::Error;

/// Parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Command for the runtime.
    Command(Command),
    /// Leave the shell.
    Quit,
}

/// Input that cannot be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Unrecognised `/command`.
    #[error("unknown command: /{0}")]
    UnknownCommand(String),

    /// Required argument missing.
    #[error("usage: /{command} {usage}")]
    MissingArgument {
        /// Command name.
        command: &'static str,
        /// Argument synopsis.
        usage: &'static str,
    },

    /// Chat text or `/leave` with no focused channel.
    #[error("no focused channel; use /focus <channel> first")]
    NoFocus,
}

/// Parses input lines against the current session.
#[derive(Debug, Clone, Default)]
pub struct LineParser {
    default_token: String,
}

impl LineParser {
    /// Create a parser. `default_token` is used by `/connect` without a
    /// token argument.
    pub fn new(default_token: impl Into<String>) -> Self {
        Self { default_token: default_token.into() }
    }

    /// Parse one line.
    ///
    /// Returns `Ok(None)` for blank lines.
    pub fn parse(&self, line: &str, session: &Session) -> Result<Option<Input>, InputError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(None);
        }

        let Some(rest) = line.strip_prefix('/') else {
            let channel = session.focused().ok_or(InputError::NoFocus)?;
            return Ok(Some(chat(channel, line)));
        };

        let mut words = rest.split_whitespace();
        let name = words.next().unwrap_or_default();

        let command = match name {
            "connect" => {
                let endpoint = words.next().ok_or(InputError::MissingArgument {
                    command: "connect",
                    usage: "<url> [token]",
                })?;
                let auth_token = words.next().unwrap_or(&self.default_token);
                Command::Connect { endpoint: endpoint.to_owned(), auth_token: auth_token.to_owned() }
            },
            "disconnect" => Command::Disconnect,
            "list" => Command::RequestChannelDirectory,
            "join" => Command::JoinChannel { channel: required_channel(words.next(), "join")? },
            "leave" => {
                let channel = match words.next() {
                    Some(channel) => ChannelName::from(channel),
                    None => session.focused().cloned().ok_or(InputError::NoFocus)?,
                };
                Command::LeaveChannel { channel }
            },
            "focus" => Command::SetFocus { channel: required_channel(words.next(), "focus")? },
            "quit" => return Ok(Some(Input::Quit)),
            other => return Err(InputError::UnknownCommand(other.to_owned())),
        };

        Ok(Some(Input::Command(command)))
    }
}

fn chat(channel: &ChannelName, text: &str) -> Input {
    Input::Command(Command::SendChatMessage { channel: channel.clone(), text: text.to_owned() })
}

fn required_channel(word: Option<&str>, command: &'static str) -> Result<ChannelName, InputError> {
    word.map(ChannelName::from).ok_or(InputError::MissingArgument { command, usage: "<channel>" })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use parley_app::{SessionEvent, reduce};

    use super::*;

    fn focused_on(channel: &str) -> Session {
        let session = reduce(&Session::new(), &SessionEvent::Connected { identity: "tom1".into() })
            .unwrap();
        let session =
            reduce(&session, &SessionEvent::ChannelsListed { names: vec![channel.into()] }).unwrap();
        reduce(&session, &SessionEvent::FocusChanged { channel: channel.into() }).unwrap()
    }

    fn command(line: &str, session: &Session) -> Command {
        match LineParser::new("cli-token").parse(line, session) {
            Ok(Some(Input::Command(command))) => command,
            other => panic!("expected command for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn blank_lines_are_ignored() {
        let parser = LineParser::default();
        assert_eq!(parser.parse("", &Session::new()), Ok(None));
        assert_eq!(parser.parse("   \r\n", &Session::new()), Ok(None));
    }

    #[test]
    fn connect_uses_configured_token_by_default() {
        let session = Session::new();
        assert_eq!(command("/connect ws://localhost:8080/ws", &session), Command::Connect {
            endpoint: "ws://localhost:8080/ws".into(),
            auth_token: "cli-token".into(),
        });
        assert_eq!(command("/connect ws://localhost:8080/ws other", &session), Command::Connect {
            endpoint: "ws://localhost:8080/ws".into(),
            auth_token: "other".into(),
        });
    }

    #[test]
    fn channel_commands() {
        let session = Session::new();
        assert_eq!(command("/list", &session), Command::RequestChannelDirectory);
        assert_eq!(command("/join general", &session), Command::JoinChannel {
            channel: "general".into()
        });
        assert_eq!(command("/focus general", &session), Command::SetFocus {
            channel: "general".into()
        });
        assert_eq!(command("/leave random", &session), Command::LeaveChannel {
            channel: "random".into()
        });
        assert_eq!(command("/disconnect", &session), Command::Disconnect);
    }

    #[test]
    fn leave_defaults_to_focused_channel() {
        let session = focused_on("general");
        assert_eq!(command("/leave", &session), Command::LeaveChannel {
            channel: "general".into()
        });
        assert_eq!(LineParser::default().parse("/leave", &Session::new()), Err(InputError::NoFocus));
    }

    #[test]
    fn plain_text_goes_to_focused_channel() {
        let session = focused_on("general");
        assert_eq!(command("hello there ", &session), Command::SendChatMessage {
            channel: "general".into(),
            text: "hello there ".into(),
        });
    }

    #[test]
    fn plain_text_without_focus_is_an_error() {
        let result = LineParser::default().parse("hello", &Session::new());
        assert_eq!(result, Err(InputError::NoFocus));
    }

    #[test]
    fn missing_arguments_and_unknown_commands() {
        let parser = LineParser::default();
        let session = Session::new();
        assert_eq!(
            parser.parse("/join", &session),
            Err(InputError::MissingArgument { command: "join", usage: "<channel>" })
        );
        assert_eq!(
            parser.parse("/connect", &session).unwrap_err().to_string(),
            "usage: /connect <url> [token]"
        );
        assert_eq!(parser.parse("/kick amy", &session), Err(InputError::UnknownCommand("kick".into())));
        assert_eq!(parser.parse("/quit", &session), Ok(Some(Input::Quit)));
    }
}
