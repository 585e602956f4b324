use std::collections::HashSet;

use crate::common::{ChatMessage, MessageId};
use crate::ports::MessageListPort;

pub fn rendered_ids<L: MessageListPort + ?Sized>(list: &L) -> HashSet<MessageId> {
    list.rendered_ids().into_iter().collect()
}

/// Incoming messages that are not rendered yet, in server order.
///
/// Repeats inside `incoming` are dropped too, so a single batch never renders
/// the same ID twice.
pub fn missing_messages<'a>(
    rendered: &HashSet<MessageId>,
    incoming: &'a [ChatMessage],
) -> Vec<&'a ChatMessage> {
    let mut seen = HashSet::new();
    let mut fresh = Vec::new();
    for message in incoming {
        if !rendered.contains(&message.id) && seen.insert(&message.id) {
            fresh.push(message);
        }
    }
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::fakes::{FakeList, message};

    fn ids(messages: &[&ChatMessage]) -> Vec<String> {
        messages.iter().map(|m| m.id.to_string()).collect()
    }

    #[test]
    fn only_unrendered_ids_survive() {
        let rendered = rendered_ids(&FakeList::with_ids(&[1, 2]));
        let incoming = vec![message(2, true), message(3, false)];
        assert_eq!(ids(&missing_messages(&rendered, &incoming)), ["3"]);
    }

    #[test]
    fn server_order_is_preserved() {
        let rendered = HashSet::new();
        let incoming = vec![message(9, true), message(4, false), message(6, true)];
        assert_eq!(ids(&missing_messages(&rendered, &incoming)), ["9", "4", "6"]);
    }

    #[test]
    fn repeated_ids_in_one_batch_collapse() {
        let rendered = HashSet::new();
        let incoming = vec![message(5, true), message(5, true), message(8, false)];
        assert_eq!(ids(&missing_messages(&rendered, &incoming)), ["5", "8"]);
    }

    #[test]
    fn fully_rendered_batch_yields_nothing() {
        let rendered = rendered_ids(&FakeList::with_ids(&[1, 2, 3]));
        let incoming = vec![message(1, true), message(3, true)];
        assert!(missing_messages(&rendered, &incoming).is_empty());
    }
}
