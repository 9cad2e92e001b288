use async_trait::async_trait;

use super::webhooks_model::{NewWebhook, Webhook};
use crate::errors::Result;

/// Trait for webhook registry persistence
#[async_trait]
pub trait WebhookRepositoryTrait: Send + Sync {
    /// Stores a subscriber with `last_check` initialised to `last_check`.
    async fn create(&self, new_webhook: NewWebhook, last_check: i64) -> Result<Webhook>;
    fn get_by_id(&self, webhook_id: &str) -> Result<Option<Webhook>>;
    fn list(&self) -> Result<Vec<Webhook>>;
    async fn delete(&self, webhook_id: &str) -> Result<Option<Webhook>>;
    async fn update_last_check(&self, webhook_id: &str, last_check: i64) -> Result<()>;
}

/// Trait for webhook service operations
#[async_trait]
pub trait WebhookServiceTrait: Send + Sync {
    async fn register(&self, new_webhook: NewWebhook) -> Result<Webhook>;
    fn get_webhook(&self, webhook_id: &str) -> Result<Webhook>;
    fn list_webhooks(&self) -> Result<Vec<Webhook>>;
    async fn delete_webhook(&self, webhook_id: &str) -> Result<Webhook>;
    async fn update_last_check(&self, webhook_id: &str, last_check: i64) -> Result<()>;
}
