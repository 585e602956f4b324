use std::collections::VecDeque;
use std::path::PathBuf;

use crate::common::{ChatMessage, MessageId};
use crate::ports::{MessageFormPort, MessageListPort, Notify, ReviewModalPort};

pub const DEFAULT_RATING: u8 = 5;

/// A message as shown in the thread.
#[derive(Debug, Clone)]
pub struct RenderedMessage {
    pub message: ChatMessage,
    pub dimmed: bool,
    pub delete_enabled: bool,
}

/// Message container backing the central panel.
#[derive(Debug)]
pub struct MessageThread {
    pub messages: Vec<RenderedMessage>,
    pub show_empty_state: bool,
    pub scroll_requested: bool,
}

impl Default for MessageThread {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            show_empty_state: true,
            scroll_requested: false,
        }
    }
}

impl MessageThread {
    fn find_mut(&mut self, id: &MessageId) -> Option<&mut RenderedMessage> {
        self.messages.iter_mut().find(|r| &r.message.id == id)
    }
}

impl MessageListPort for MessageThread {
    fn rendered_ids(&self) -> Vec<MessageId> {
        self.messages.iter().map(|r| r.message.id.clone()).collect()
    }

    fn remove_empty_state(&mut self) {
        self.show_empty_state = false;
    }

    fn append_message(&mut self, message: &ChatMessage) {
        self.messages.push(RenderedMessage {
            message: message.clone(),
            dimmed: false,
            delete_enabled: false,
        });
    }

    fn scroll_to_end(&mut self) {
        self.scroll_requested = true;
    }

    fn enable_delete(&mut self, id: &MessageId) {
        if let Some(rendered) = self.find_mut(id) {
            rendered.delete_enabled = true;
        }
    }

    fn dim_message(&mut self, id: &MessageId) {
        if let Some(rendered) = self.find_mut(id) {
            rendered.dimmed = true;
        }
    }

    fn restore_message(&mut self, id: &MessageId) {
        if let Some(rendered) = self.find_mut(id) {
            rendered.dimmed = false;
        }
    }

    fn remove_message(&mut self, id: &MessageId) {
        self.messages.retain(|r| &r.message.id != id);
        if self.messages.is_empty() {
            self.show_empty_state = true;
        }
    }
}

/// Message form at the bottom of the window.
#[derive(Debug)]
pub struct Composer {
    pub input_text: String,
    /// Textarea height, in text rows.
    pub rows: usize,
    pub focus_requested: bool,
    pub send_busy: bool,
    pub error_message: Option<String>,
}

impl Default for Composer {
    fn default() -> Self {
        Self {
            input_text: String::new(),
            rows: 1,
            focus_requested: false,
            send_busy: false,
            error_message: None,
        }
    }
}

impl MessageFormPort for Composer {
    fn content(&self) -> String {
        self.input_text.clone()
    }

    fn clear_content(&mut self) {
        self.input_text.clear();
    }

    fn focus_textarea(&mut self) {
        self.focus_requested = true;
    }

    fn is_send_busy(&self) -> bool {
        self.send_busy
    }

    fn set_send_busy(&mut self, busy: bool) {
        self.send_busy = busy;
    }

    fn set_error(&mut self, message: Option<&str>) {
        self.error_message = message.map(str::to_string);
    }

    fn reset_textarea_height(&mut self) {
        self.rows = 1;
    }

    fn textarea_scroll_height(&self) -> f32 {
        self.input_text.split('\n').count() as f32
    }

    fn set_textarea_height(&mut self, height: f32) {
        self.rows = (height.ceil() as usize).max(1);
    }
}

/// Review modal fields.
#[derive(Debug)]
pub struct ReviewForm {
    pub visible: bool,
    pub ticket_id: String,
    pub rating: u8,
    pub title: String,
    pub content: String,
    pub image_path: String,
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self {
            visible: false,
            ticket_id: String::new(),
            rating: DEFAULT_RATING,
            title: String::new(),
            content: String::new(),
            image_path: String::new(),
        }
    }
}

impl ReviewModalPort for ReviewForm {
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
        let path = self.image_path.trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    }

    fn clear_fields(&mut self) {
        self.title.clear();
        self.content.clear();
        self.image_path.clear();
    }
}

/// Delete confirmation and queued notices.
#[derive(Debug, Default)]
pub struct Dialogs {
    pub pending_delete: Option<MessageId>,
    pub alerts: VecDeque<String>,
}

impl Notify for Dialogs {
    fn alert(&mut self, message: &str) {
        self.alerts.push_back(message.to_string());
    }
}

/// Everything the window shows, split so each port can be borrowed on its own.
#[derive(Debug, Default)]
pub struct AppState {
    pub thread: MessageThread,
    pub composer: Composer,
    pub review: ReviewForm,
    pub dialogs: Dialogs,
    /// Ticket the "Write a review" button opens the dialog for.
    pub ticket_id: Option<String>,
}

impl AppState {
    pub fn new(ticket_id: Option<String>) -> Self {
        Self {
            ticket_id,
            ..Self::default()
        }
    }
}
