use crate::common::ChatMessage;

/// Replace the five HTML-significant characters with entities.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Bubble markup for one message. Only the user's own messages carry a delete form.
pub fn create_message_html(data: &ChatMessage) -> String {
    let id = escape_html(data.id.as_str());
    let class = if data.is_from_user { "user" } else { "support" };

    let delete_form = if data.is_from_user {
        format!(
            r#"
            <form method="post" action="/messages/delete/{id}/" class="delete-form" data-message-id="{id}">
                <button type="submit" class="btn-delete">
                    <i class="fas fa-trash"></i>
                </button>
            </form>"#
        )
    } else {
        String::new()
    };

    format!(
        r#"<div class="message {class}" data-message-id="{id}">
    <div class="message-bubble">
        <div class="message-content">{content}</div>
        <div class="message-info">
            <span class="message-sender">{sender}</span>
            <span class="message-time">{time}</span>{delete_form}
        </div>
    </div>
</div>"#,
        content = escape_html(&data.content),
        sender = escape_html(&data.sender_name),
        time = escape_html(&data.created_at),
    )
}
