use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Identifier the server assigns to a message.
///
/// Django serializes primary keys as numbers, rendered markup carries them as
/// strings; both compare equal through their string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawMessageId")]
pub struct MessageId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMessageId {
    Number(serde_json::Number),
    Text(String),
}

impl From<RawMessageId> for MessageId {
    fn from(raw: RawMessageId) -> Self {
        match raw {
            RawMessageId::Number(id) => Self(number_key(&id)),
            RawMessageId::Text(id) => Self(id),
        }
    }
}

/// Integral numbers render without a fraction so `7` and `7.0` match.
fn number_key(number: &serde_json::Number) -> String {
    if let Some(id) = number.as_u64() {
        return id.to_string();
    }
    if let Some(id) = number.as_i64() {
        return id.to_string();
    }
    match number.as_f64() {
        Some(id) if id.is_finite() && id.fract() == 0.0 => format!("{id:.0}"),
        _ => number.to_string(),
    }
}

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for MessageId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// One message of a support thread, as the server sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub content: String,
    #[serde(default)]
    pub sender_name: String,
    /// Already formatted for display by the server.
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub is_from_user: bool,
}

/// `POST /messages/send/` reply.
#[derive(Debug, Clone, Deserialize)]
pub struct SendResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<ChatMessage>,
    pub error: Option<String>,
}

/// `GET /messages/get/` reply.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// `POST /ticket/<id>/review/` reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReviewResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
}

/// Validated review form contents, ready to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSubmission {
    pub ticket_id: String,
    pub rating: u8,
    pub title: String,
    pub content: String,
    pub image: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_ids_compare_equal() {
        let from_number: MessageId = serde_json::from_str("42").unwrap();
        let from_text: MessageId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(from_number.as_str(), "42");
    }

    #[test]
    fn ids_beyond_i64_still_parse() {
        let id: MessageId = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(id.as_str(), "18446744073709551615");
    }

    #[test]
    fn integral_float_id_matches_integer_id() {
        let float: MessageId = serde_json::from_str("7.0").unwrap();
        assert_eq!(float, MessageId::from(7));
    }

    #[test]
    fn negative_id_keeps_its_sign() {
        let id: MessageId = serde_json::from_str("-3").unwrap();
        assert_eq!(id.as_str(), "-3");
    }

    #[test]
    fn messages_response_parses_server_payload() {
        let body = r#"{
            "success": true,
            "messages": [
                {"id": 7, "content": "hi", "sender_name": "Support", "created_at": "10:02", "is_from_user": false}
            ]
        }"#;
        let parsed: MessagesResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.messages.len(), 1);
        assert_eq!(parsed.messages[0].id, MessageId::from(7));
        assert!(!parsed.messages[0].is_from_user);
    }

    #[test]
    fn failed_send_response_keeps_error_text() {
        let parsed: SendResponse =
            serde_json::from_str(r#"{"success": false, "error": "Ticket closed"}"#).unwrap();
        assert!(!parsed.success);
        assert!(parsed.message.is_none());
        assert_eq!(parsed.error.as_deref(), Some("Ticket closed"));
    }
}
