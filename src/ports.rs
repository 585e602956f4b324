//! UI ports the chat panel and review dialog drive.
//!
//! The egui front end implements these over its widget state, the headless
//! transcript implements the message list over rendered markup, and tests use
//! the fakes at the bottom of this file.

use std::path::PathBuf;

use crate::common::{ChatMessage, MessageId};

/// The scrollable thread of rendered messages.
pub trait MessageListPort {
    /// Whether the container exists at all; partial views may lack it.
    fn is_present(&self) -> bool {
        true
    }
    /// IDs of every message currently rendered, in display order.
    fn rendered_ids(&self) -> Vec<MessageId>;
    fn remove_empty_state(&mut self);
    fn append_message(&mut self, message: &ChatMessage);
    fn scroll_to_end(&mut self);
    /// Attach the delete control of a freshly appended message.
    fn enable_delete(&mut self, id: &MessageId);
    /// Fade-out affordance while a delete is in flight.
    fn dim_message(&mut self, id: &MessageId);
    fn restore_message(&mut self, id: &MessageId);
    fn remove_message(&mut self, id: &MessageId);
}

/// The message composer: textarea, send button and inline error line.
pub trait MessageFormPort {
    fn content(&self) -> String;
    fn clear_content(&mut self);
    fn focus_textarea(&mut self);
    fn is_send_busy(&self) -> bool;
    /// Disable the send button and mark it as loading, or undo both.
    fn set_send_busy(&mut self, busy: bool);
    /// `None` hides the error line and empties it.
    fn set_error(&mut self, message: Option<&str>);
    fn reset_textarea_height(&mut self);
    fn textarea_scroll_height(&self) -> f32;
    fn set_textarea_height(&mut self, height: f32);
}

/// The review modal and its form fields.
pub trait ReviewModalPort {
    fn set_visible(&mut self, visible: bool);
    fn is_visible(&self) -> bool;
    fn set_ticket_id(&mut self, ticket_id: &str);
    fn ticket_id(&self) -> String;
    fn rating(&self) -> u8;
    fn title(&self) -> String;
    fn content(&self) -> String;
    fn image(&self) -> Option<PathBuf>;
    /// Empty title, content and image. Rating and ticket stay.
    fn clear_fields(&mut self);
}

/// Blocking yes/no question.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Blocking notice.
pub trait Notify {
    fn alert(&mut self, message: &str);
}

/// A confirmation the user already gave, e.g. through a dialog window.
#[derive(Debug, Clone, Copy)]
pub struct Answer(pub bool);

impl Confirm for Answer {
    fn confirm(&mut self, prompt: &str) -> bool {
        log::debug!("confirm `{prompt}` answered {}", self.0);
        self.0
    }
}

#[cfg(test)]
pub mod fakes {
    use std::collections::HashSet;

    use super::*;

    #[derive(Debug, Default)]
    pub struct FakeList {
        pub absent: bool,
        pub messages: Vec<ChatMessage>,
        pub empty_state: bool,
        pub scrolls: usize,
        pub deletable: HashSet<MessageId>,
        pub dimmed: HashSet<MessageId>,
    }

    impl FakeList {
        pub fn with_ids(ids: &[u64]) -> Self {
            Self {
                messages: ids.iter().map(|id| message(*id, true)).collect(),
                ..Self::default()
            }
        }

        pub fn ids(&self) -> Vec<MessageId> {
            self.rendered_ids()
        }
    }

    impl MessageListPort for FakeList {
        fn is_present(&self) -> bool {
            !self.absent
        }

        fn rendered_ids(&self) -> Vec<MessageId> {
            self.messages.iter().map(|m| m.id.clone()).collect()
        }

        fn remove_empty_state(&mut self) {
            self.empty_state = false;
        }

        fn append_message(&mut self, message: &ChatMessage) {
            self.messages.push(message.clone());
        }

        fn scroll_to_end(&mut self) {
            self.scrolls += 1;
        }

        fn enable_delete(&mut self, id: &MessageId) {
            self.deletable.insert(id.clone());
        }

        fn dim_message(&mut self, id: &MessageId) {
            self.dimmed.insert(id.clone());
        }

        fn restore_message(&mut self, id: &MessageId) {
            self.dimmed.remove(id);
        }

        fn remove_message(&mut self, id: &MessageId) {
            self.messages.retain(|m| &m.id != id);
        }
    }

    #[derive(Debug, Default)]
    pub struct FakeForm {
        pub content: String,
        pub focused: bool,
        pub busy: bool,
        pub error: Option<String>,
        pub height: f32,
        pub scroll_height: f32,
    }

    impl FakeForm {
        pub fn with_content(content: &str) -> Self {
            Self {
                content: content.to_string(),
                ..Self::default()
            }
        }
    }

    impl MessageFormPort for FakeForm {
        fn content(&self) -> String {
            self.content.clone()
        }

        fn clear_content(&mut self) {
            self.content.clear();
        }

        fn focus_textarea(&mut self) {
            self.focused = true;
        }

        fn is_send_busy(&self) -> bool {
            self.busy
        }

        fn set_send_busy(&mut self, busy: bool) {
            self.busy = busy;
        }

        fn set_error(&mut self, message: Option<&str>) {
            self.error = message.map(str::to_string);
        }

        fn reset_textarea_height(&mut self) {
            self.height = 0.0;
        }

        fn textarea_scroll_height(&self) -> f32 {
            self.scroll_height
        }

        fn set_textarea_height(&mut self, height: f32) {
            self.height = height;
        }
    }

    #[derive(Debug, Default)]
    pub struct FakeModal {
        pub visible: bool,
        pub ticket_id: String,
        pub rating: u8,
        pub title: String,
        pub content: String,
        pub image: Option<PathBuf>,
    }

    impl ReviewModalPort for FakeModal {
        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }

        fn is_visible(&self) -> bool {
            self.visible
        }

        fn set_ticket_id(&mut self, ticket_id: &str) {
            self.ticket_id = ticket_id.to_string();
        }

        fn ticket_id(&self) -> String {
            self.ticket_id.clone()
        }

        fn rating(&self) -> u8 {
            self.rating
        }

        fn title(&self) -> String {
            self.title.clone()
        }

        fn content(&self) -> String {
            self.content.clone()
        }

        fn image(&self) -> Option<PathBuf> {
            self.image.clone()
        }

        fn clear_fields(&mut self) {
            self.title.clear();
            self.content.clear();
            self.image = None;
        }
    }

    /// Records every prompt and replies with a fixed answer.
    #[derive(Debug, Default)]
    pub struct ScriptedDialogs {
        pub answer: bool,
        pub prompts: Vec<String>,
        pub alerts: Vec<String>,
    }

    impl Confirm for ScriptedDialogs {
        fn confirm(&mut self, prompt: &str) -> bool {
            self.prompts.push(prompt.to_string());
            self.answer
        }
    }

    impl Notify for ScriptedDialogs {
        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }
    }

    pub fn message(id: u64, is_from_user: bool) -> ChatMessage {
        ChatMessage {
            id: MessageId::from(id),
            content: format!("message {id}"),
            sender_name: if is_from_user { "Me" } else { "Support" }.to_string(),
            created_at: "12:00".to_string(),
            is_from_user,
        }
    }
}
