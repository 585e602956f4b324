use eframe::egui;

use crate::chat::panel::DELETE_CONFIRMATION;
use crate::common::MessageId;
use crate::ui::state::Dialogs;

/// Delete prompt. Returns the message and the user's answer once they click.
pub fn render_delete_prompt(ctx: &egui::Context, dialogs: &mut Dialogs) -> Option<(MessageId, bool)> {
    let id = dialogs.pending_delete.clone()?;
    let mut answer = None;

    egui::Window::new("Delete message")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(DELETE_CONFIRMATION);
            ui.horizontal(|ui| {
                if ui.button("Delete").clicked() {
                    answer = Some(true);
                }
                if ui.button("Cancel").clicked() {
                    answer = Some(false);
                }
            });
        });

    let answer = answer?;
    dialogs.pending_delete = None;
    Some((id, answer))
}

/// Oldest queued notice, dismissed with OK.
pub fn render_alerts(ctx: &egui::Context, dialogs: &mut Dialogs) {
    let Some(message) = dialogs.alerts.front() else {
        return;
    };
    let mut dismissed = false;

    egui::Window::new("Notice")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message.as_str());
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        dialogs.alerts.pop_front();
    }
}
