use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use super::webhooks_model::{NewWebhook, Webhook};
use super::webhooks_traits::{WebhookRepositoryTrait, WebhookServiceTrait};
use crate::errors::{Error, Result};
use crate::tracks::TrackServiceTrait;

/// Registry of webhook subscribers.
pub struct WebhookService {
    repository: Arc<dyn WebhookRepositoryTrait>,
    track_service: Arc<dyn TrackServiceTrait>,
}

impl WebhookService {
    pub fn new(
        repository: Arc<dyn WebhookRepositoryTrait>,
        track_service: Arc<dyn TrackServiceTrait>,
    ) -> Self {
        Self {
            repository,
            track_service,
        }
    }
}

#[async_trait]
impl WebhookServiceTrait for WebhookService {
    /// Registers a subscriber. Its `last_check` starts at the newest stored
    /// track so that only tracks arriving afterwards count towards it.
    async fn register(&self, new_webhook: NewWebhook) -> Result<Webhook> {
        let last_check = self.track_service.latest_timestamp()?.unwrap_or(0);
        let webhook = self.repository.create(new_webhook, last_check).await?;
        info!(
            "Registered webhook {} -> {} (every {} track(s))",
            webhook.id, webhook.url, webhook.min_trigger_value
        );
        Ok(webhook)
    }

    fn get_webhook(&self, webhook_id: &str) -> Result<Webhook> {
        self.repository
            .get_by_id(webhook_id)?
            .ok_or_else(|| Error::NotFound(format!("Webhook '{}' not found", webhook_id)))
    }

    fn list_webhooks(&self) -> Result<Vec<Webhook>> {
        self.repository.list()
    }

    async fn delete_webhook(&self, webhook_id: &str) -> Result<Webhook> {
        let deleted = self
            .repository
            .delete(webhook_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Webhook '{}' not found", webhook_id)))?;
        info!("Deleted webhook {}", deleted.id);
        Ok(deleted)
    }

    async fn update_last_check(&self, webhook_id: &str, last_check: i64) -> Result<()> {
        self.repository
            .update_last_check(webhook_id, last_check)
            .await
    }
}
