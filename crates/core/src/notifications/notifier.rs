//! Delivery of webhook messages.

use async_trait::async_trait;
use log::debug;
use std::time::Duration;

use super::notifications_model::WebhookMessage;
use crate::errors::{Error, Result};

/// Sends a message to a subscriber URL.
#[async_trait]
pub trait NotifierTrait: Send + Sync {
    async fn notify(&self, url: &str, message: &WebhookMessage) -> Result<()>;
}

/// POSTs messages as JSON.
pub struct HttpNotifier {
    client: reqwest::Client,
}

impl HttpNotifier {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl NotifierTrait for HttpNotifier {
    async fn notify(&self, url: &str, message: &WebhookMessage) -> Result<()> {
        debug!("[Webhook] POST {} ({} track(s))", url, message.tracks.len());
        let response = self
            .client
            .post(url)
            .json(message)
            .send()
            .await
            .map_err(|e| Error::Delivery(format!("POST {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Delivery(format!(
                "{} answered with status {}",
                url, status
            )));
        }
        Ok(())
    }
}
