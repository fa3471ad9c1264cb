//! WeCom (WeChat Work) group robot webhook.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::config;
use crate::error::WebhookError;

use super::Notifier;

/// Byte limit of a WeCom markdown message.
pub const WEBHOOK_MAX_BYTES: usize = 4096;

/// Bytes reserved for the truncation notice.
const NOTICE_RESERVE_BYTES: usize = 100;

/// Appended to content cut to fit the webhook limit.
pub const TRUNCATION_NOTICE: &str =
    "\n\n⚠️ Content truncated, see console or file output for the full changelog";

/// Fit `content` into [`WEBHOOK_MAX_BYTES`].
///
/// Content over the limit is cut to leave room for [`TRUNCATION_NOTICE`],
/// then pulled back to the last line break if that lies past the midpoint.
pub fn truncate_for_webhook(content: &str) -> String {
    if content.len() <= WEBHOOK_MAX_BYTES {
        return content.to_string();
    }

    let mut end = WEBHOOK_MAX_BYTES - NOTICE_RESERVE_BYTES;
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    let mut truncated = &content[..end];

    if let Some(newline) = truncated.rfind('\n')
        && newline > truncated.len() / 2
    {
        truncated = &truncated[..newline];
    }

    format!("{}{}", truncated, TRUNCATION_NOTICE)
}

#[derive(Deserialize)]
struct WeComResponse {
    errcode: Option<i64>,
    errmsg: Option<String>,
}

/// Sends markdown messages to a WeCom group robot.
pub struct WeComNotifier {
    client: Client,
    url: String,
    timeout: Duration,
}

impl WeComNotifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, WebhookError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(WebhookError::MissingUrl);
        }

        Ok(Self {
            client: Client::new(),
            url,
            timeout,
        })
    }

    /// Notifier with the timeout taken from `CHANGELOG_AI_WEBHOOK_TIMEOUT`.
    pub fn with_default_timeout(url: impl Into<String>) -> Result<Self, WebhookError> {
        Self::new(url, config::webhook_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn transport_error(&self, err: reqwest::Error) -> WebhookError {
        if err.is_timeout() {
            WebhookError::Timeout(self.timeout.as_secs())
        } else {
            WebhookError::Network(err.without_url())
        }
    }
}

#[async_trait]
impl Notifier for WeComNotifier {
    async fn deliver(&self, text: &str) -> Result<(), WebhookError> {
        let content = truncate_for_webhook(text);
        debug!(
            original_bytes = text.len(),
            sent_bytes = content.len(),
            "Sending webhook message"
        );

        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(&json!({
                "msgtype": "markdown",
                "markdown": {"content": content},
            }))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(WebhookError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let result: WeComResponse =
            serde_json::from_str(&body).map_err(|e| WebhookError::InvalidJson(e.to_string()))?;

        if result.errcode == Some(0) {
            info!("Webhook message sent");
            Ok(())
        } else {
            Err(WebhookError::Api(
                result.errmsg.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }
}
