mod chat;
mod common;
mod config;
mod error;
mod network;
mod ports;
mod review;
mod ui;

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use network::{ApiWorker, SupportApi};
use tokio::sync::mpsc;
use ui::ChatApp;

use crate::chat::{HtmlTranscript, panel};
use crate::common::ApiCommand;
use crate::config::AppConfig;

#[derive(Parser)]
#[command(
    name = "support_chat",
    version,
    about = "Support ticket chat and review client"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Server root, e.g. http://127.0.0.1:8000
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
    /// Ticket the review dialog submits for
    #[arg(long, value_name = "ID")]
    ticket: Option<String>,
    /// Poll the server for new messages
    #[arg(long)]
    poll: bool,
    #[arg(long, value_name = "MS")]
    poll_interval_ms: Option<u64>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Mode {
    /// No window: poll and print the markup of each new message
    Watch {
        /// Also keep the whole rendered thread in this file
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(ticket) = &self.ticket {
            config.ticket_id = Some(ticket.clone());
        }
        if self.poll {
            config.polling_enabled = true;
        }
        if let Some(ms) = self.poll_interval_ms {
            config.poll_interval_ms = ms;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    app_config.apply_env();
    cli.apply_to(&mut app_config);

    let api = SupportApi::new(&app_config)?;

    if let Some(Mode::Watch { output }) = cli.mode {
        run_watch(api, app_config.poll_interval(), output).await;
        return Ok(());
    }

    run_full_client(api, app_config).await
}

async fn run_watch(api: SupportApi, period: Duration, output: Option<PathBuf>) {
    let mut transcript = HtmlTranscript::new();
    let mut ticker = tokio::time::interval(period);
    log::info!("Watching for new messages every {period:?}; Ctrl+C to stop");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match api.fetch_new_messages().await {
                    Ok(messages) => {
                        panel::update_messages(&mut transcript, &messages);
                        for fragment in transcript.take_appended() {
                            println!("{fragment}");
                        }
                        if let Some(path) = &output {
                            if let Err(err) = tokio::fs::write(path, transcript.to_html()).await {
                                log::warn!("Failed to write transcript {}: {err}", path.display());
                            }
                        }
                    }
                    Err(err) => log::error!("Error fetching messages: {err}"),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    log::info!("Stopped after {} messages", transcript.len());
}

async fn run_full_client(api: SupportApi, app_config: AppConfig) -> Result<(), Box<dyn Error>> {
    // UI -> worker
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // worker -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    if app_config.polling_enabled {
        cmd_tx
            .send(ApiCommand::StartPolling(app_config.poll_interval()))
            .await?;
    }

    tokio::spawn(ApiWorker::new(api, event_tx, cmd_rx).run());

    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);
    let ticket_id = app_config.ticket_id.clone();

    eframe::run_native(
        "Support Chat",
        options,
        Box::new(move |_cc| {
            let event_receiver = event_rx
                .take()
                .expect("ChatApp should only be initialized once");

            log::info!("Client started against {}", app_config.base_url);

            Ok(Box::new(ChatApp::new(
                cmd_tx.clone(),
                event_receiver,
                ticket_id.clone(),
            )))
        }),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_config() {
        let cli = Cli::parse_from([
            "support_chat",
            "--base-url",
            "http://support.local",
            "--ticket",
            "44",
            "--poll",
            "--poll-interval-ms",
            "1500",
        ]);
        let mut config = AppConfig::default();
        cli.apply_to(&mut config);
        assert_eq!(config.base_url, "http://support.local");
        assert_eq!(config.ticket_id.as_deref(), Some("44"));
        assert!(config.polling_enabled);
        assert_eq!(config.poll_interval(), Duration::from_millis(1500));
    }

    #[test]
    fn polling_stays_off_without_flag() {
        let cli = Cli::parse_from(["support_chat"]);
        let mut config = AppConfig::default();
        cli.apply_to(&mut config);
        assert!(!config.polling_enabled);
        assert!(cli.mode.is_none());
    }

    #[test]
    fn watch_subcommand_parses_output() {
        let cli = Cli::parse_from(["support_chat", "watch", "--output", "thread.html"]);
        assert_eq!(
            cli.mode,
            Some(Mode::Watch {
                output: Some(PathBuf::from("thread.html"))
            })
        );
    }
}
