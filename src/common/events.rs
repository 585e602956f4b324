use super::types::{ChatMessage, MessageId, ReviewResponse};

/// Results the API worker reports back to the UI.
#[derive(Debug, Clone)]
pub enum ApiEvent {
    MessageSent(ChatMessage),
    SendFailed(String),
    MessagesFetched(Vec<ChatMessage>),
    MessageDeleted(MessageId),
    DeleteFailed { id: MessageId, reason: String },
    ReviewSubmitted(ReviewResponse),
    ReviewFailed(String),
}
