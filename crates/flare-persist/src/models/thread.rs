use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Database-agnostic chat thread model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatThread {
    pub id: String,
    pub client_id: String,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

/// A single message embedded in a thread, in insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    #[schema(value_type = String, example = "user")]
    pub role: MessageRole,
    pub content: String,
    pub ts: i64,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, ts: i64) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            ts,
        }
    }

    pub fn assistant(content: impl Into<String>, ts: i64) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            ts,
        }
    }
}

/// Sender of a message. Only `user` and `assistant` are written here; any other
/// stored value is kept verbatim so one odd document cannot break a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageRole {
    User,
    Assistant,
    Other(String),
}

impl From<String> for MessageRole {
    fn from(role: String) -> Self {
        match role.as_str() {
            "user" => MessageRole::User,
            "assistant" => MessageRole::Assistant,
            _ => MessageRole::Other(role),
        }
    }
}

impl From<MessageRole> for String {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::User => "user".to_string(),
            MessageRole::Assistant => "assistant".to_string(),
            MessageRole::Other(role) => role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_thread_serializes_with_wire_field_names() {
        let thread = ChatThread {
            id: "65f0c0ffee0000000000abcd".to_string(),
            client_id: "c1".to_string(),
            title: "Hi".to_string(),
            messages: vec![ChatMessage::user("Hi", 10), ChatMessage::assistant("Echo: Hi", 10)],
            created_at: 10,
            updated_at: 10,
        };

        let value = serde_json::to_value(&thread).unwrap();
        assert_eq!(value["id"], "65f0c0ffee0000000000abcd");
        assert_eq!(value["createdAt"], 10);
        assert_eq!(value["updatedAt"], 10);
        assert_eq!(value["messages"][0], json!({"role": "user", "content": "Hi", "ts": 10}));
        assert_eq!(value["messages"][1]["role"], "assistant");
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn test_unknown_role_round_trips_verbatim() {
        let message: ChatMessage =
            serde_json::from_value(json!({"role": "system", "content": "be brief", "ts": 1})).unwrap();
        assert_eq!(message.role, MessageRole::Other("system".to_string()));

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "system");

        let known: ChatMessage =
            serde_json::from_value(json!({"role": "assistant", "content": "hi", "ts": 1})).unwrap();
        assert_eq!(known.role, MessageRole::Assistant);
    }
}
