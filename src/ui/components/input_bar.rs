use eframe::egui;

use crate::chat::panel;
use crate::ui::state::Composer;

const SEND_BUTTON_WIDTH: f32 = 80.0;

#[derive(Default)]
pub struct InputActions {
    pub send_clicked: bool,
    /// Modifiers held when Ctrl/Cmd+Enter was pressed inside the textarea.
    pub shortcut: Option<egui::Modifiers>,
    pub edited: bool,
}

pub fn render(ui: &mut egui::Ui, composer: &mut Composer) -> InputActions {
    let mut actions = InputActions::default();
    let textarea_id = egui::Id::new("message_textarea");

    // Swallow the chord before the textarea turns it into a newline.
    if ui.memory(|memory| memory.has_focus(textarea_id)) {
        actions.shortcut = ui.input_mut(|input| take_submit_chord(&mut input.events));
    }

    if let Some(error) = &composer.error_message {
        ui.colored_label(ui.visuals().error_fg_color, error.as_str());
    }

    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::multiline(&mut composer.input_text)
                .id(textarea_id)
                .desired_rows(composer.rows)
                .desired_width(ui.available_width() - SEND_BUTTON_WIDTH)
                .hint_text("Type your message... (Ctrl+Enter to send)"),
        );
        if composer.focus_requested {
            response.request_focus();
            composer.focus_requested = false;
        }
        actions.edited = response.changed();

        let label = if composer.send_busy { "Sending..." } else { "Send" };
        if ui
            .add_enabled(!composer.send_busy, egui::Button::new(label))
            .clicked()
        {
            actions.send_clicked = true;
        }
    });

    actions
}

/// Removes the first Enter press held with Ctrl or Cmd and returns its modifiers.
/// Checks `ctrl` and `mac_cmd` separately so Ctrl+Enter also counts on macOS.
fn take_submit_chord(events: &mut Vec<egui::Event>) -> Option<egui::Modifiers> {
    let index = events.iter().position(|event| {
        matches!(
            event,
            egui::Event::Key {
                key: egui::Key::Enter,
                pressed: true,
                modifiers,
                ..
            } if panel::is_submit_shortcut(modifiers.ctrl, modifiers.mac_cmd, "Enter")
        )
    })?;
    match events.remove(index) {
        egui::Event::Key { modifiers, .. } => Some(modifiers),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enter(modifiers: egui::Modifiers) -> egui::Event {
        egui::Event::Key {
            key: egui::Key::Enter,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    #[test]
    fn ctrl_enter_is_taken_even_with_mac_cmd_unset() {
        let ctrl = egui::Modifiers {
            ctrl: true,
            command: false,
            mac_cmd: false,
            ..Default::default()
        };
        let mut events = vec![egui::Event::Text("hi".into()), enter(ctrl)];

        assert_eq!(take_submit_chord(&mut events), Some(ctrl));
        assert_eq!(events, vec![egui::Event::Text("hi".into())]);
    }

    #[test]
    fn cmd_enter_is_taken() {
        let cmd = egui::Modifiers::MAC_CMD;
        let mut events = vec![enter(cmd)];

        assert_eq!(take_submit_chord(&mut events), Some(cmd));
        assert!(events.is_empty());
    }

    #[test]
    fn plain_enter_reaches_the_textarea() {
        let mut events = vec![enter(egui::Modifiers::NONE)];

        assert_eq!(take_submit_chord(&mut events), None);
        assert_eq!(events.len(), 1);
    }
}
