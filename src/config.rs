use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/support_chat.json";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const ENV_BASE_URL: &str = "SUPPORT_CHAT_BASE_URL";
pub const ENV_SESSION: &str = "SUPPORT_CHAT_SESSION";
pub const ENV_CSRF_TOKEN: &str = "SUPPORT_CHAT_CSRF_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Polling stays dormant unless this is set.
    pub polling_enabled: bool,
    pub poll_interval_ms: u64,
    /// Upper bound for any single HTTP request.
    pub request_timeout_secs: u64,
    /// Django `sessionid` cookie of a logged-in user.
    pub session_id: Option<String>,
    /// Seed for the `csrftoken` cookie when the server has not set one yet.
    pub csrf_token: Option<String>,
    /// Ticket the review dialog targets.
    pub ticket_id: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            polling_enabled: false,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            session_id: None,
            csrf_token: None,
            ticket_id: None,
        }
    }
}

impl AppConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Apply `SUPPORT_CHAT_*` variables from the process environment (and `.env`).
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(session) = lookup(ENV_SESSION) {
            self.session_id = Some(session);
        }
        if let Some(token) = lookup(ENV_CSRF_TOKEN) {
            self.csrf_token = Some(token);
        }
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let config = load_config(path.to_str().unwrap());
        assert_eq!(config, AppConfig::default());
        assert!(!config.polling_enabled);
        assert_eq!(config.poll_interval(), Duration::from_millis(5000));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let config = AppConfig {
            request_timeout_secs: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("support_chat.json");
        fs::write(
            &path,
            r#"{"base_url": "https://support.example.com", "polling_enabled": true}"#,
        )
        .unwrap();

        let config = load_config(path.to_str().unwrap());
        assert_eq!(config.base_url, "https://support.example.com");
        assert!(config.polling_enabled);
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert!(config.session_id.is_none());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_config(path.to_str().unwrap()), AppConfig::default());
    }

    #[test]
    fn environment_overrides_win_but_blanks_are_ignored() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://10.0.0.5:8000"),
            (ENV_SESSION, "abc123"),
            (ENV_CSRF_TOKEN, "  "),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig {
            csrf_token: Some("from-file".into()),
            ..AppConfig::default()
        };
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.base_url, "http://10.0.0.5:8000");
        assert_eq!(config.session_id.as_deref(), Some("abc123"));
        assert_eq!(config.csrf_token.as_deref(), Some("from-file"));
    }
}
