use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;

use crate::chat::panel::{self, SubmitOutcome};
use crate::common::{ApiCommand, ApiEvent, MessageId};
use crate::ports::Answer;
use crate::review;

use super::components::{dialogs, input_bar, message_list, review_window};
use super::state::AppState;

const WORKER_UNAVAILABLE: &str = "Connection to the server worker was lost";
const REPAINT_INTERVAL: Duration = Duration::from_millis(100);

pub struct ChatApp {
    state: AppState,
    command_sender: mpsc::Sender<ApiCommand>,
    event_receiver: mpsc::Receiver<ApiEvent>,
}

impl ChatApp {
    pub fn new(
        command_sender: mpsc::Sender<ApiCommand>,
        event_receiver: mpsc::Receiver<ApiEvent>,
        ticket_id: Option<String>,
    ) -> Self {
        let mut state = AppState::new(ticket_id);
        panel::initialize(&mut state.thread, &mut state.composer);
        Self {
            state,
            command_sender,
            event_receiver,
        }
    }

    fn handle_api_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            let state = &mut self.state;
            match event {
                ApiEvent::MessagesFetched(messages) => {
                    let added = panel::update_messages(&mut state.thread, &messages);
                    if added > 0 {
                        log::debug!("Appended {added} new messages");
                    }
                }
                ApiEvent::MessageSent(message) => {
                    panel::message_sent(&mut state.thread, &mut state.composer, message)
                }
                ApiEvent::SendFailed(reason) => panel::send_failed(&mut state.composer, &reason),
                ApiEvent::MessageDeleted(id) => {
                    panel::message_deleted(&mut state.thread, &mut state.composer, &id)
                }
                ApiEvent::DeleteFailed { id, reason } => {
                    panel::delete_failed(&mut state.thread, &mut state.composer, &id, &reason)
                }
                ApiEvent::ReviewSubmitted(response) => {
                    review::review_completed(&mut state.review, &mut state.dialogs, &response)
                }
                ApiEvent::ReviewFailed(error) => review::review_failed(&mut state.dialogs, &error),
            }
        }
    }

    fn send_command(&mut self, command: ApiCommand) -> bool {
        match self.command_sender.try_send(command) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Failed to send command to API worker: {err}");
                false
            }
        }
    }

    fn dispatch_submit(&mut self, outcome: SubmitOutcome) {
        if let SubmitOutcome::Send(content) = outcome {
            if !self.send_command(ApiCommand::SendMessage(content)) {
                panel::send_failed(&mut self.state.composer, WORKER_UNAVAILABLE);
            }
        }
    }

    fn handle_input(&mut self, actions: input_bar::InputActions) {
        if actions.edited {
            panel::on_input(&mut self.state.composer);
        }
        if let Some(modifiers) = actions.shortcut {
            if let Some(outcome) = panel::on_keydown(
                &mut self.state.composer,
                modifiers.ctrl,
                modifiers.mac_cmd,
                "Enter",
            ) {
                self.dispatch_submit(outcome);
            }
        }
        if actions.send_clicked {
            let outcome = panel::submit(&mut self.state.composer);
            self.dispatch_submit(outcome);
        }
    }

    fn handle_delete_answer(&mut self, id: MessageId, confirmed: bool) {
        let Some(request) =
            panel::request_delete(&mut self.state.thread, &mut Answer(confirmed), id)
        else {
            return;
        };
        let id = request.id.clone();
        if !self.send_command(ApiCommand::DeleteMessage(request.id)) {
            panel::delete_failed(
                &mut self.state.thread,
                &mut self.state.composer,
                &id,
                WORKER_UNAVAILABLE,
            );
        }
    }

    fn handle_review(&mut self, actions: review_window::ReviewActions) {
        if actions.close {
            review::close_review_modal(&mut self.state.review);
        }
        if actions.submit {
            let state = &mut self.state;
            if let Some(submission) = review::prepare_review(&state.review, &mut state.dialogs) {
                if !self.send_command(ApiCommand::SubmitReview(submission)) {
                    review::review_failed(&mut self.state.dialogs, WORKER_UNAVAILABLE);
                }
            }
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_api_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Support");
                if let Some(ticket_id) = self.state.ticket_id.clone() {
                    if ui.button("Write a review").clicked() {
                        review::open_review_modal(&mut self.state.review, &ticket_id);
                    }
                }
            });
        });

        let input_actions = egui::TopBottomPanel::bottom("composer")
            .show(ctx, |ui| input_bar::render(ui, &mut self.state.composer))
            .inner;
        self.handle_input(input_actions);

        let delete_clicked = egui::CentralPanel::default()
            .show(ctx, |ui| message_list::render(ui, &mut self.state.thread))
            .inner;
        if let Some(id) = delete_clicked {
            self.state.dialogs.pending_delete = Some(id);
        }

        let review_actions = review_window::render(ctx, &mut self.state.review);
        self.handle_review(review_actions);

        if let Some((id, confirmed)) = dialogs::render_delete_prompt(ctx, &mut self.state.dialogs) {
            self.handle_delete_answer(id, confirmed);
        }
        dialogs::render_alerts(ctx, &mut self.state.dialogs);

        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}
