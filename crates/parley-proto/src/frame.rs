//! Line-framed wire unit.
//!
//! Layout of one WebSocket text message:
//! `<kind>\n<JSON payload>`
//!
//! The kind line is plain ASCII (see [`MessageKind`]); everything after the
//! first newline is the JSON payload for that kind. This is version 1 of the
//! framing. The alternative scheme of a single JSON object with an embedded
//! `type` field is not spoken.
//!
//! A `Frame` only guarantees structural validity (known kind, separator
//! present). Payload schema checks happen in [`crate::payloads`].

use crate::{
    MessageKind,
    errors::{ProtocolError, Result},
};

/// Wire framing version spoken by this crate.
pub const WIRE_VERSION: u8 = 1;

/// Separator between the kind line and the payload.
const SEPARATOR: char = '\n';

/// Payload used when a frame carries no body.
const EMPTY_BODY: &str = "{}";

/// One protocol message: kind plus raw JSON payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    kind: MessageKind,
    body: String,
}

impl Frame {
    /// Largest frame the server accepts from a client, in bytes.
    pub const MAX_SIZE: usize = 4096;

    /// Create a frame from an already-encoded JSON body.
    pub fn new(kind: MessageKind, body: impl Into<String>) -> Self {
        Self { kind, body: body.into() }
    }

    /// Parse a frame from the text of one WebSocket message.
    ///
    /// The kind line is trimmed (servers may emit `\r\n`). An empty payload
    /// is read as `{}`.
    pub fn parse(text: &str) -> Result<Self> {
        let (kind, body) = text.split_once(SEPARATOR).ok_or(ProtocolError::MissingSeparator)?;

        let kind = kind.trim();
        if kind.is_empty() {
            return Err(ProtocolError::EmptyKind);
        }
        let kind = kind.parse::<MessageKind>()?;

        let body = body.trim();
        let body = if body.is_empty() { EMPTY_BODY } else { body };

        Ok(Self { kind, body: body.to_owned() })
    }

    /// Render the two-line wire form.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(self.encoded_len());
        out.push_str(self.kind.as_str());
        out.push(SEPARATOR);
        out.push_str(&self.body);
        out
    }

    /// Render the wire form, refusing frames larger than `limit` bytes.
    pub fn encode_within(&self, limit: usize) -> Result<String> {
        let size = self.encoded_len();
        if size > limit {
            return Err(ProtocolError::FrameTooLarge { size, limit });
        }
        Ok(self.encode())
    }

    /// Size of the wire form in bytes.
    pub fn encoded_len(&self) -> usize {
        self.kind.as_str().len() + SEPARATOR.len_utf8() + self.body.len()
    }

    /// Message kind.
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Raw JSON payload.
    pub fn body(&self) -> &str {
        &self.body
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_line_frame() {
        let frame = Frame::parse("channel.chat\n{\"channel\":\"general\"}").unwrap();
        assert_eq!(frame.kind(), MessageKind::ChannelChat);
        assert_eq!(frame.body(), "{\"channel\":\"general\"}");
    }

    #[test]
    fn tolerates_crlf_and_empty_body() {
        let frame = Frame::parse("channels.list\r\n").unwrap();
        assert_eq!(frame.kind(), MessageKind::ChannelsList);
        assert_eq!(frame.body(), "{}");
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(matches!(Frame::parse("channels.list"), Err(ProtocolError::MissingSeparator)));
    }

    #[test]
    fn rejects_empty_kind() {
        assert!(matches!(Frame::parse("\n{}"), Err(ProtocolError::EmptyKind)));
    }

    #[test]
    fn rejects_prefixed_json_framing() {
        // Single-object framing has no kind line
        let result = Frame::parse("{\"type\":\"channel.chat\"}");
        assert!(matches!(result, Err(ProtocolError::MissingSeparator)));
    }

    #[test]
    fn encode_within_enforces_limit() {
        let frame = Frame::new(MessageKind::ChannelChat, "x".repeat(Frame::MAX_SIZE));
        let err = frame.encode_within(Frame::MAX_SIZE).unwrap_err();
        assert!(matches!(err, ProtocolError::FrameTooLarge { limit: Frame::MAX_SIZE, .. }));

        let small = Frame::new(MessageKind::ChannelsList, "{}");
        assert_eq!(small.encode_within(Frame::MAX_SIZE).unwrap(), "channels.list\n{}");
    }
}
