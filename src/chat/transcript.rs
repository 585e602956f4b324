use crate::common::{ChatMessage, MessageId};
use crate::ports::MessageListPort;

use super::markup::create_message_html;

const EMPTY_STATE_HTML: &str = r#"<div class="empty-state">No messages yet</div>"#;

#[derive(Debug, Clone)]
struct Fragment {
    id: MessageId,
    html: String,
    dimmed: bool,
}

/// Headless message container holding rendered markup.
///
/// `watch` mode feeds it polled batches and prints whatever got appended.
#[derive(Debug, Default)]
pub struct HtmlTranscript {
    fragments: Vec<Fragment>,
    empty_state: bool,
    /// Index of the first fragment not yet handed out by `take_appended`.
    flushed: usize,
}

impl HtmlTranscript {
    pub fn new() -> Self {
        Self {
            empty_state: true,
            ..Self::default()
        }
    }

    /// Markup appended since the previous call.
    pub fn take_appended(&mut self) -> Vec<String> {
        // removals can pull the cursor past the end
        let start = self.flushed.min(self.fragments.len());
        let fresh = self.fragments[start..]
            .iter()
            .map(|fragment| fragment.html.clone())
            .collect();
        self.flushed = self.fragments.len();
        fresh
    }

    /// Whole container markup.
    pub fn to_html(&self) -> String {
        let mut html = String::from(r#"<div id="messagesContainer">"#);
        if self.empty_state {
            html.push_str(EMPTY_STATE_HTML);
        }
        for fragment in &self.fragments {
            if fragment.dimmed {
                html.push_str(r#"<div style="opacity: 0.5; transform: scale(0.95)">"#);
                html.push_str(&fragment.html);
                html.push_str("</div>");
            } else {
                html.push_str(&fragment.html);
            }
        }
        html.push_str("</div>");
        html
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }
}

impl MessageListPort for HtmlTranscript {
    fn rendered_ids(&self) -> Vec<MessageId> {
        self.fragments.iter().map(|f| f.id.clone()).collect()
    }

    fn remove_empty_state(&mut self) {
        self.empty_state = false;
    }

    fn append_message(&mut self, message: &ChatMessage) {
        self.fragments.push(Fragment {
            id: message.id.clone(),
            html: create_message_html(message),
            dimmed: false,
        });
    }

    fn scroll_to_end(&mut self) {}

    // the rendered delete form is already live markup
    fn enable_delete(&mut self, _id: &MessageId) {}

    fn dim_message(&mut self, id: &MessageId) {
        if let Some(fragment) = self.fragments.iter_mut().find(|f| &f.id == id) {
            fragment.dimmed = true;
        }
    }

    fn restore_message(&mut self, id: &MessageId) {
        if let Some(fragment) = self.fragments.iter_mut().find(|f| &f.id == id) {
            fragment.dimmed = false;
        }
    }

    fn remove_message(&mut self, id: &MessageId) {
        if let Some(index) = self.fragments.iter().position(|f| &f.id == id) {
            self.fragments.remove(index);
            if index < self.flushed {
                self.flushed -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::panel;
    use crate::ports::fakes::message;

    #[test]
    fn polled_batches_print_only_new_markup() {
        let mut transcript = HtmlTranscript::new();
        panel::update_messages(&mut transcript, &[message(1, true), message(2, false)]);
        let first = transcript.take_appended();
        assert_eq!(first.len(), 2);
        assert!(first[0].contains(r#"data-message-id="1""#));

        panel::update_messages(&mut transcript, &[message(2, false), message(3, true)]);
        let second = transcript.take_appended();
        assert_eq!(second.len(), 1);
        assert!(second[0].contains(r#"data-message-id="3""#));
        assert!(transcript.take_appended().is_empty());
    }

    #[test]
    fn empty_state_disappears_with_first_message() {
        let mut transcript = HtmlTranscript::new();
        assert!(transcript.to_html().contains("empty-state"));
        panel::add_new_message(&mut transcript, &message(1, true));
        assert!(!transcript.to_html().contains("empty-state"));
    }

    #[test]
    fn removal_keeps_flush_cursor_in_step() {
        let mut transcript = HtmlTranscript::new();
        panel::update_messages(&mut transcript, &[message(1, true), message(2, true)]);
        transcript.take_appended();
        transcript.remove_message(&MessageId::from(1));
        panel::add_new_message(&mut transcript, &message(3, true));
        let appended = transcript.take_appended();
        assert_eq!(appended.len(), 1);
        assert!(appended[0].contains(r#"data-message-id="3""#));
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn dimmed_message_is_wrapped_until_restored() {
        let mut transcript = HtmlTranscript::new();
        panel::add_new_message(&mut transcript, &message(1, true));
        panel::delete_message(&mut transcript, MessageId::from(1));
        assert!(transcript.to_html().contains("opacity: 0.5"));
        transcript.restore_message(&MessageId::from(1));
        assert!(!transcript.to_html().contains("opacity: 0.5"));
    }
}
