use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::common::{ApiCommand, ApiEvent, MessageId, ReviewSubmission};

use super::client::SupportApi;

/// Background task that performs every network call on behalf of the UI.
///
/// Each request runs as its own task, so a slow fetch never holds up a send,
/// a delete or a review upload. Poll results may land out of order; the
/// ID-based merge on the UI side keeps that harmless.
pub struct ApiWorker {
    api: SupportApi,
    event_sender: mpsc::Sender<ApiEvent>,
    command_receiver: mpsc::Receiver<ApiCommand>,
    polling: Option<Interval>,
}

impl ApiWorker {
    pub fn new(
        api: SupportApi,
        event_sender: mpsc::Sender<ApiEvent>,
        command_receiver: mpsc::Receiver<ApiCommand>,
    ) -> Self {
        Self {
            api,
            event_sender,
            command_receiver,
            polling: None,
        }
    }

    /// Loads the thread once, then serves commands until the UI hangs up.
    pub async fn run(mut self) {
        self.spawn_request(fetch_new_messages(self.api.clone()));
        log::info!("API worker started");

        loop {
            tokio::select! {
                command = self.command_receiver.recv() => {
                    match command {
                        Some(command) => self.handle_command(command),
                        None => break,
                    }
                }
                _ = next_tick(&mut self.polling) => {
                    self.spawn_request(fetch_new_messages(self.api.clone()));
                }
            }
        }

        log::info!("API worker stopped");
    }

    fn handle_command(&mut self, command: ApiCommand) {
        let api = self.api.clone();
        match command {
            ApiCommand::SendMessage(content) => self.spawn_request(send_message(api, content)),
            ApiCommand::FetchMessages => self.spawn_request(fetch_new_messages(api)),
            ApiCommand::DeleteMessage(id) => self.spawn_request(delete_message(api, id)),
            ApiCommand::SubmitReview(submission) => {
                self.spawn_request(submit_review(api, submission))
            }
            ApiCommand::StartPolling(period) => self.start_polling(period),
        }
    }

    fn start_polling(&mut self, period: Duration) {
        if self.polling.is_some() {
            log::debug!("Polling already running; restarting with {period:?}");
        }
        // first tick after one full period, like setInterval
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.polling = Some(interval);
        log::info!("Polling for new messages every {period:?}");
    }

    /// Run `request` on its own task and forward whatever event it yields.
    fn spawn_request<F>(&self, request: F)
    where
        F: Future<Output = Option<ApiEvent>> + Send + 'static,
    {
        let event_sender = self.event_sender.clone();
        tokio::spawn(async move {
            if let Some(event) = request.await {
                if let Err(err) = event_sender.send(event).await {
                    log::warn!("Failed to notify UI: {err}");
                }
            }
        });
    }
}

async fn send_message(api: SupportApi, content: String) -> Option<ApiEvent> {
    let token = api.csrf_token();
    let event = match api.send_message_ajax(&content, &token).await {
        Ok(message) => ApiEvent::MessageSent(message),
        Err(err) => {
            log::warn!("Send failed: {err}");
            ApiEvent::SendFailed(err.user_message())
        }
    };
    Some(event)
}

async fn fetch_new_messages(api: SupportApi) -> Option<ApiEvent> {
    match api.fetch_new_messages().await {
        Ok(messages) => Some(ApiEvent::MessagesFetched(messages)),
        Err(err) => {
            log::error!("Error fetching messages: {err}");
            None
        }
    }
}

async fn delete_message(api: SupportApi, id: MessageId) -> Option<ApiEvent> {
    let token = api.csrf_token();
    let event = match api.delete_message(&id, &token).await {
        Ok(()) => ApiEvent::MessageDeleted(id),
        Err(err) => {
            log::warn!("Delete of message {id} failed: {err}");
            ApiEvent::DeleteFailed {
                id,
                reason: err.user_message(),
            }
        }
    };
    Some(event)
}

async fn submit_review(api: SupportApi, submission: ReviewSubmission) -> Option<ApiEvent> {
    let token = api.csrf_token();
    let event = match api.submit_review(&submission, &token).await {
        Ok(response) => ApiEvent::ReviewSubmitted(response),
        Err(err) => ApiEvent::ReviewFailed(err.to_string()),
    };
    Some(event)
}

async fn next_tick(polling: &mut Option<Interval>) {
    match polling {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
