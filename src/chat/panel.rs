//! Chat panel behaviour: composer validation, delete confirmation, textarea
//! sizing and merging fetched messages into the thread.

use crate::common::{ChatMessage, MessageId};
use crate::ports::{Confirm, MessageFormPort, MessageListPort};

use super::merge;

pub const EMPTY_MESSAGE_ERROR: &str = "Please enter message content";
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this message?";

/// What a submit attempt led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Trimmed content to hand to the server. The send button is now busy.
    Send(String),
    /// Empty content; the inline error is showing.
    Invalid,
    /// A previous send has not completed yet.
    Busy,
}

/// A confirmed delete, waiting for the server round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub id: MessageId,
}

pub fn initialize<L, F>(list: &mut L, form: &mut F)
where
    L: MessageListPort,
    F: MessageFormPort,
{
    scroll_to_bottom(list);
    auto_resize(form);
    log::debug!("chat panel ready with {} messages", list.rendered_ids().len());
}

pub fn scroll_to_bottom<L: MessageListPort>(list: &mut L) {
    if list.is_present() {
        list.scroll_to_end();
    }
}

pub fn submit<F: MessageFormPort>(form: &mut F) -> SubmitOutcome {
    let content = form.content().trim().to_string();
    if content.is_empty() {
        show_error(form, EMPTY_MESSAGE_ERROR);
        form.focus_textarea();
        return SubmitOutcome::Invalid;
    }

    if form.is_send_busy() {
        return SubmitOutcome::Busy;
    }

    form.set_send_busy(true);
    hide_error(form);
    SubmitOutcome::Send(content)
}

/// Typing clears a stale error and refits the textarea.
pub fn on_input<F: MessageFormPort>(form: &mut F) {
    hide_error(form);
    auto_resize(form);
}

/// Ctrl+Enter, or Cmd+Enter on macOS. `key` follows `KeyboardEvent.key` naming.
pub fn is_submit_shortcut(ctrl: bool, meta: bool, key: &str) -> bool {
    (ctrl || meta) && key == "Enter"
}

/// Runs the regular submit path when the shortcut matches, `None` otherwise.
pub fn on_keydown<F: MessageFormPort>(
    form: &mut F,
    ctrl: bool,
    meta: bool,
    key: &str,
) -> Option<SubmitOutcome> {
    is_submit_shortcut(ctrl, meta, key).then(|| submit(form))
}

pub fn auto_resize<F: MessageFormPort>(form: &mut F) {
    form.reset_textarea_height();
    let height = form.textarea_scroll_height();
    form.set_textarea_height(height);
}

pub fn show_error<F: MessageFormPort>(form: &mut F, message: &str) {
    form.set_error(Some(message));
}

pub fn hide_error<F: MessageFormPort>(form: &mut F) {
    form.set_error(None);
}

/// Ask before deleting; a yes dims the message and yields the request to send.
pub fn request_delete<L, C>(list: &mut L, confirm: &mut C, id: MessageId) -> Option<DeleteRequest>
where
    L: MessageListPort,
    C: Confirm,
{
    if !confirm.confirm(DELETE_CONFIRMATION) {
        return None;
    }
    Some(delete_message(list, id))
}

pub fn delete_message<L: MessageListPort>(list: &mut L, id: MessageId) -> DeleteRequest {
    list.dim_message(&id);
    DeleteRequest { id }
}

/// The server removed the message; only now does it leave the thread.
pub fn message_deleted<L, F>(list: &mut L, form: &mut F, id: &MessageId)
where
    L: MessageListPort,
    F: MessageFormPort,
{
    list.remove_message(id);
    hide_error(form);
}

pub fn delete_failed<L, F>(list: &mut L, form: &mut F, id: &MessageId, reason: &str)
where
    L: MessageListPort,
    F: MessageFormPort,
{
    list.restore_message(id);
    show_error(form, reason);
}

/// The send round trip finished successfully.
pub fn message_sent<L, F>(list: &mut L, form: &mut F, message: ChatMessage)
where
    L: MessageListPort,
    F: MessageFormPort,
{
    form.clear_content();
    form.set_send_busy(false);
    hide_error(form);
    auto_resize(form);
    update_messages(list, std::slice::from_ref(&message));
}

pub fn send_failed<F: MessageFormPort>(form: &mut F, reason: &str) {
    form.set_send_busy(false);
    show_error(form, reason);
}

/// Append every message whose ID is not rendered yet. Returns how many were added.
pub fn update_messages<L: MessageListPort>(list: &mut L, messages: &[ChatMessage]) -> usize {
    let rendered = merge::rendered_ids(list);
    let fresh = merge::missing_messages(&rendered, messages);
    for message in &fresh {
        add_new_message(list, message);
    }
    fresh.len()
}

pub fn add_new_message<L: MessageListPort>(list: &mut L, data: &ChatMessage) {
    list.remove_empty_state();
    list.append_message(data);
    scroll_to_bottom(list);
    if data.is_from_user {
        list.enable_delete(&data.id);
    }
}
