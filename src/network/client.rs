use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::header::LOCATION;
use reqwest::multipart::{Form, Part};
use reqwest::redirect::Policy;
use reqwest::{Client, RequestBuilder, Url};

use crate::common::types::{MessagesResponse, SendResponse};
use crate::common::{ChatMessage, MessageId, ReviewResponse, ReviewSubmission};
use crate::config::AppConfig;
use crate::error::ApiError;

use super::csrf::{CSRF_COOKIE, get_cookie};

pub const SEND_PATH: &str = "/messages/send/";
pub const FETCH_PATH: &str = "/messages/get/";
pub const GENERIC_SEND_ERROR: &str = "Something went wrong";
/// Where the delete view sends the browser back after a successful delete.
pub const MESSAGES_PAGE_PREFIX: &str = "/messages/";
pub const LOGIN_PATH: &str = "/login/";
pub const SESSION_EXPIRED_ERROR: &str = "Your session has expired, please log in again";

const CSRF_FIELD: &str = "csrfmiddlewaretoken";
const SESSION_COOKIE: &str = "sessionid";

pub fn delete_path(id: &MessageId) -> String {
    format!("/messages/delete/{id}/")
}

pub fn review_path(ticket_id: &str) -> String {
    format!("/ticket/{ticket_id}/review/")
}

/// HTTP client for the support backend. Cookies persist across calls.
///
/// Clones share the connection pool and the cookie jar.
#[derive(Clone)]
pub struct SupportApi {
    client: Client,
    /// Same jar and timeout, but never follows redirects.
    form_client: Client,
    jar: Arc<Jar>,
    base_url: Url,
}

impl SupportApi {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|err| ApiError::InvalidUrl {
            url: config.base_url.clone(),
            reason: err.to_string(),
        })?;

        let jar = Arc::new(Jar::default());
        if let Some(session) = &config.session_id {
            jar.add_cookie_str(&format!("{SESSION_COOKIE}={session}; Path=/"), &base_url);
        }
        if let Some(token) = &config.csrf_token {
            jar.add_cookie_str(&format!("{CSRF_COOKIE}={token}; Path=/"), &base_url);
        }

        let timeout = config.request_timeout();
        let client = Client::builder()
            .cookie_provider(jar.clone())
            .timeout(timeout)
            .build()?;
        let form_client = Client::builder()
            .cookie_provider(jar.clone())
            .timeout(timeout)
            .redirect(Policy::none())
            .build()?;
        log::info!("Support API at {base_url} (timeout {timeout:?})");

        Ok(Self {
            client,
            form_client,
            jar,
            base_url,
        })
    }

    /// Current `csrftoken` cookie, empty when the server has not issued one.
    pub fn csrf_token(&self) -> String {
        get_cookie(&self.jar, &self.base_url, CSRF_COOKIE).unwrap_or_default()
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url.join(path).map_err(|err| ApiError::InvalidUrl {
            url: format!("{}{path}", self.base_url),
            reason: err.to_string(),
        })
    }

    fn ajax(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("X-Requested-With", "XMLHttpRequest")
    }

    pub async fn send_message_ajax(
        &self,
        content: &str,
        csrf_token: &str,
    ) -> Result<ChatMessage, ApiError> {
        let form = Form::new()
            .text("content", content.to_string())
            .text(CSRF_FIELD, csrf_token.to_string());

        let response: SendResponse = self
            .ajax(self.client.post(self.endpoint(SEND_PATH)?))
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;

        match response {
            SendResponse {
                success: true,
                message: Some(message),
                ..
            } => Ok(message),
            SendResponse { error, .. } => Err(ApiError::Rejected(
                error.unwrap_or_else(|| GENERIC_SEND_ERROR.to_string()),
            )),
        }
    }

    pub async fn fetch_new_messages(&self) -> Result<Vec<ChatMessage>, ApiError> {
        let response: MessagesResponse = self
            .ajax(self.client.get(self.endpoint(FETCH_PATH)?))
            .send()
            .await?
            .json()
            .await?;

        if !response.success {
            log::debug!("Message list request reported failure; nothing to merge");
            return Ok(Vec::new());
        }
        Ok(response.messages)
    }

    /// Plain form post, like the page's delete form.
    ///
    /// Redirects are not followed: only a redirect back to the messages page
    /// (or a direct 2xx) confirms the delete. A bounce to the login page is a
    /// rejection even though following it would end in a 200.
    pub async fn delete_message(&self, id: &MessageId, csrf_token: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&delete_path(id))?;
        let response = self
            .form_client
            .post(url.clone())
            .form(&[(CSRF_FIELD, csrf_token)])
            .send()
            .await?;

        if !response.status().is_redirection() {
            response.error_for_status()?;
            return Ok(());
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if location.is_empty() {
            return Err(ApiError::Rejected(format!(
                "Delete answered {} without a location",
                response.status()
            )));
        }
        let target = url.join(location).map_err(|err| ApiError::InvalidUrl {
            url: location.to_string(),
            reason: err.to_string(),
        })?;

        match target.path() {
            path if path.starts_with(LOGIN_PATH) => {
                Err(ApiError::Rejected(SESSION_EXPIRED_ERROR.to_string()))
            }
            path if path.starts_with(MESSAGES_PAGE_PREFIX) => Ok(()),
            path => Err(ApiError::Rejected(format!("Unexpected redirect to {path}"))),
        }
    }

    pub async fn submit_review(
        &self,
        submission: &ReviewSubmission,
        csrf_token: &str,
    ) -> Result<ReviewResponse, ApiError> {
        let mut form = Form::new()
            .text("rating", submission.rating.to_string())
            .text("title", submission.title.clone())
            .text("content", submission.content.clone());

        if let Some(path) = &submission.image {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| ApiError::Image {
                    path: path.clone(),
                    source,
                })?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            form = form.part("image", Part::bytes(bytes).file_name(file_name));
        }

        let form = form.text(CSRF_FIELD, csrf_token.to_string());

        let response = self
            .client
            .post(self.endpoint(&review_path(&submission.ticket_id))?)
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;
        Ok(response)
    }
}
