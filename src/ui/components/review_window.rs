use eframe::egui;

use crate::ports::ReviewModalPort;
use crate::ui::state::ReviewForm;

#[derive(Default)]
pub struct ReviewActions {
    pub submit: bool,
    pub close: bool,
}

pub fn render(ctx: &egui::Context, review: &mut ReviewForm) -> ReviewActions {
    let mut actions = ReviewActions::default();
    if !review.is_visible() {
        return actions;
    }

    egui::Window::new("Review your trip")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!("Ticket #{}", review.ticket_id));
            ui.add(egui::Slider::new(&mut review.rating, 1..=5).text("Rating"));

            ui.label("Title");
            ui.text_edit_singleline(&mut review.title);
            ui.label("Content");
            ui.text_edit_multiline(&mut review.content);
            ui.label("Image (optional, file path)");
            ui.text_edit_singleline(&mut review.image_path);

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Submit review").clicked() {
                    actions.submit = true;
                }
                if ui.button("Close").clicked() {
                    actions.close = true;
                }
            });
        });

    actions
}
