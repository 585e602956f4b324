//! Ticket review dialog.

use crate::common::{ReviewResponse, ReviewSubmission};
use crate::ports::{Notify, ReviewModalPort};

pub const MISSING_FIELDS_ALERT: &str = "Please enter a title and content.";
pub const SUBMITTED_FALLBACK: &str = "Review submitted.";
pub const NETWORK_ERROR_ALERT: &str = "An error occurred, please try again";

pub fn open_review_modal<M: ReviewModalPort>(modal: &mut M, ticket_id: &str) {
    modal.set_ticket_id(ticket_id);
    modal.set_visible(true);
}

pub fn close_review_modal<M: ReviewModalPort>(modal: &mut M) {
    modal.set_visible(false);
}

/// Read and validate the form. Alerts and returns `None` when title or content is blank.
pub fn prepare_review<M, N>(modal: &M, notify: &mut N) -> Option<ReviewSubmission>
where
    M: ReviewModalPort,
    N: Notify,
{
    let title = modal.title().trim().to_string();
    let content = modal.content().trim().to_string();
    if title.is_empty() || content.is_empty() {
        notify.alert(MISSING_FIELDS_ALERT);
        return None;
    }

    Some(ReviewSubmission {
        ticket_id: modal.ticket_id(),
        rating: modal.rating(),
        title,
        content,
        image: modal.image(),
    })
}

/// The server answered. Success closes and clears the form; failure keeps it for a retry.
pub fn review_completed<M, N>(modal: &mut M, notify: &mut N, response: &ReviewResponse)
where
    M: ReviewModalPort,
    N: Notify,
{
    notify.alert(response.message.as_deref().unwrap_or(SUBMITTED_FALLBACK));
    if response.success {
        close_review_modal(modal);
        modal.clear_fields();
    }
}

pub fn review_failed<N: Notify>(notify: &mut N, error: &str) {
    log::error!("Review submission failed: {error}");
    notify.alert(NETWORK_ERROR_ALERT);
}
