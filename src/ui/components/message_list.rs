use eframe::egui;

use crate::common::MessageId;
use crate::ui::state::MessageThread;

const DIMMED_OPACITY: f32 = 0.5;

/// Draws the thread. Returns the message whose delete control was clicked.
pub fn render(ui: &mut egui::Ui, thread: &mut MessageThread) -> Option<MessageId> {
    let mut delete_clicked = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if thread.show_empty_state {
                ui.vertical_centered(|ui| {
                    ui.weak("No messages yet. Describe your issue below.");
                });
            }

            for rendered in &thread.messages {
                let message = &rendered.message;
                let layout = if message.is_from_user {
                    egui::Layout::top_down(egui::Align::Max)
                } else {
                    egui::Layout::top_down(egui::Align::Min)
                };

                ui.with_layout(layout, |ui| {
                    if rendered.dimmed {
                        ui.set_opacity(DIMMED_OPACITY);
                    }
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.label(message.content.as_str());
                        ui.horizontal(|ui| {
                            ui.small(message.sender_name.as_str());
                            ui.small(message.created_at.as_str());
                            if rendered.delete_enabled
                                && ui
                                    .add_enabled(!rendered.dimmed, egui::Button::new("🗑").small())
                                    .on_hover_text("Delete message")
                                    .clicked()
                            {
                                delete_clicked = Some(message.id.clone());
                            }
                        });
                    });
                });
            }

            if thread.scroll_requested {
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                thread.scroll_requested = false;
            }
        });

    delete_clicked
}
