use std::time::Duration;

use super::types::{MessageId, ReviewSubmission};

/// Requests the UI hands to the API worker.
#[derive(Debug, Clone)]
pub enum ApiCommand {
    SendMessage(String),
    FetchMessages,
    /// Form-style delete; the UI only drops the message once the server confirms.
    DeleteMessage(MessageId),
    SubmitReview(ReviewSubmission),
    /// Start the fixed-interval fetch loop. Dormant until sent.
    StartPolling(Duration),
}
