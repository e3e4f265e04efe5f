//! Discord interaction wire types.
//!
//! Only the fields this worker reads or writes are modelled; everything else
//! Discord sends is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Interaction response type for "channel message with source".
pub const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;

// =============================================================================
// Inbound
// =============================================================================

/// Errors from reading an interaction body.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("body is not JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("body is not a JSON object")]
    NotAnObject,
}

/// Interaction type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// Endpoint handshake sent by Discord when the URL is configured
    Ping,
    /// Slash command invocation
    ApplicationCommand,
    /// Anything else: components, autocomplete, modals, or a missing/odd `type`
    Other,
}

impl InteractionKind {
    /// Classify a raw `type` value. Only the numbers 1 and 2 are recognised.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_f64) {
            Some(t) if t == 1.0 => InteractionKind::Ping,
            Some(t) if t == 2.0 => InteractionKind::ApplicationCommand,
            _ => InteractionKind::Other,
        }
    }
}

/// An inbound interaction, reduced to the parts used for routing.
///
/// Only `type` decides the route; `data` is read for commands and a
/// malformed `data` object is treated as absent.
#[derive(Debug, Clone)]
pub struct Interaction {
    pub kind: InteractionKind,
    /// Raw `type` value as sent, for logging
    pub raw_kind: Option<Value>,
    pub data: Option<CommandData>,
}

impl Interaction {
    /// Parse a raw request body.
    pub fn parse(raw: &str) -> Result<Self, PayloadError> {
        let mut body = match serde_json::from_str::<Value>(raw)? {
            Value::Object(map) => map,
            _ => return Err(PayloadError::NotAnObject),
        };

        let raw_kind = body.remove("type");
        let kind = InteractionKind::from_value(raw_kind.as_ref());

        let data = match kind {
            InteractionKind::ApplicationCommand => body
                .remove("data")
                .and_then(|data| serde_json::from_value::<CommandData>(data).ok()),
            _ => None,
        };

        Ok(Self {
            kind,
            raw_kind,
            data,
        })
    }

    /// Name of the invoked command, if this interaction carries one.
    pub fn command_name(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.name.as_str())
    }
}

/// The `data` object of an application command interaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

/// A single option supplied with a slash command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOption {
    pub name: String,
    /// String, number or boolean depending on the option type
    #[serde(default)]
    pub value: serde_json::Value,
}

impl CommandData {
    /// Look up an option by exact name and render its value as a string.
    ///
    /// Options that are absent, null, or blank strings yield `None`.
    pub fn option_str(&self, name: &str) -> Option<String> {
        let option = self.options.iter().find(|opt| opt.name == name)?;
        match &option.value {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

// =============================================================================
// Outbound
// =============================================================================

/// Acknowledgement returned for a ping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandshakeAck {
    #[serde(rename = "type")]
    pub kind: u8,
}

impl Default for HandshakeAck {
    fn default() -> Self {
        Self { kind: 1 }
    }
}

/// Body returned when authentication fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Interaction response carrying a chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    #[serde(rename = "type")]
    pub kind: u8,
    pub data: ReplyData,
}

/// Message payload of a [`Reply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyData {
    pub content: String,
    #[serde(default)]
    pub flags: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

/// Rich embed attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub url: String,
}

impl Reply {
    /// A message visible to the whole channel.
    pub fn message(content: impl Into<String>) -> Self {
        Self {
            kind: CHANNEL_MESSAGE_WITH_SOURCE,
            data: ReplyData {
                content: content.into(),
                flags: 0,
                embeds: Vec::new(),
            },
        }
    }

    /// Attach an embed.
    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.data.embeds.push(embed);
        self
    }

    pub fn content(&self) -> &str {
        &self.data.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ping() {
        let interaction = Interaction::parse(r#"{"type":1,"id":"123","token":"abc"}"#).unwrap();
        assert_eq!(interaction.kind, InteractionKind::Ping);
        assert!(interaction.command_name().is_none());
    }

    #[test]
    fn test_parse_ping_ignores_odd_fields() {
        for raw in [
            r#"{"type":1,"data":{"id":"5"}}"#,
            r#"{"type":1,"id":123}"#,
            r#"{"type":1.0,"data":"nonsense","token":null}"#,
        ] {
            let interaction = Interaction::parse(raw).unwrap();
            assert_eq!(interaction.kind, InteractionKind::Ping, "{}", raw);
        }
    }

    #[test]
    fn test_parse_command_with_options() {
        let raw = r#"{
            "type": 2,
            "id": "1",
            "application_id": "42",
            "member": {"user": {"id": "7"}},
            "data": {
                "id": "99",
                "name": "wax",
                "type": 1,
                "options": [{"name": "wallet", "type": 3, "value": "abcde.wam"}]
            }
        }"#;
        let interaction = Interaction::parse(raw).unwrap();

        assert_eq!(interaction.kind, InteractionKind::ApplicationCommand);
        assert_eq!(interaction.command_name(), Some("wax"));
        let data = interaction.data.unwrap();
        assert_eq!(data.option_str("wallet").as_deref(), Some("abcde.wam"));
        assert_eq!(data.option_str("missing"), None);
    }

    #[test]
    fn test_parse_unknown_kind() {
        for raw in [
            r#"{"type":3}"#,
            r#"{"type":300}"#,
            r#"{"type":-1}"#,
            r#"{"type":"1"}"#,
            r#"{"data":{"name":"wax"}}"#,
        ] {
            let interaction = Interaction::parse(raw).unwrap();
            assert_eq!(interaction.kind, InteractionKind::Other, "{}", raw);
            assert!(interaction.data.is_none());
        }
    }

    #[test]
    fn test_parse_command_with_malformed_data() {
        let interaction = Interaction::parse(r#"{"type":2,"data":{"id":"5"}}"#).unwrap();
        assert_eq!(interaction.kind, InteractionKind::ApplicationCommand);
        assert!(interaction.command_name().is_none());
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(matches!(Interaction::parse("not json"), Err(PayloadError::Json(_))));
        assert!(matches!(Interaction::parse("[1]"), Err(PayloadError::NotAnObject)));
        assert!(matches!(Interaction::parse("null"), Err(PayloadError::NotAnObject)));
    }

    #[test]
    fn test_option_str_blank_and_scalar_values() {
        let data = CommandData {
            name: "wax".to_string(),
            options: vec![
                CommandOption {
                    name: "wallet".to_string(),
                    value: serde_json::json!("   "),
                },
                CommandOption {
                    name: "count".to_string(),
                    value: serde_json::json!(3),
                },
            ],
        };
        assert_eq!(data.option_str("wallet"), None);
        assert_eq!(data.option_str("count").as_deref(), Some("3"));
    }

    #[test]
    fn test_reply_serialization() {
        let json = serde_json::to_value(Reply::message("hello")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": 4, "data": {"content": "hello", "flags": 0}})
        );
    }

    #[test]
    fn test_reply_round_trip() {
        let reply = Reply::message("🌿 market").with_embed(Embed {
            title: "Buy Beasts on AtomicHub".to_string(),
            description: "Click here".to_string(),
            url: "https://wax.atomichub.io/market".to_string(),
        });
        let json = serde_json::to_string(&reply).unwrap();
        let parsed: Reply = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, reply);
    }

    #[test]
    fn test_handshake_ack_serialization() {
        assert_eq!(serde_json::to_string(&HandshakeAck::default()).unwrap(), r#"{"type":1}"#);
    }
}
