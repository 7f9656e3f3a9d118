//! Outbound notifications

pub mod telegram;

use crate::error::NotifyError;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;

pub use telegram::TelegramNotifier;

/// Delivers a text message to a preconfigured destination
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

/// Send through `notifier`, giving up after `limit`
pub async fn send_within(
    notifier: &dyn Notifier,
    text: &str,
    limit: Duration,
) -> Result<(), NotifyError> {
    timeout(limit, notifier.send(text))
        .await
        .unwrap_or(Err(NotifyError::Timeout(limit)))
}
