//! Delivery of finished changelogs to group-chat webhooks.

pub mod wecom;

use async_trait::async_trait;

use crate::error::WebhookError;

pub use wecom::{TRUNCATION_NOTICE, WEBHOOK_MAX_BYTES, WeComNotifier, truncate_for_webhook};

/// A destination that accepts a finished changelog.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `text`, applying any size limit the destination imposes.
    async fn deliver(&self, text: &str) -> Result<(), WebhookError>;
}
