//! Webhooks module - subscriber registry models, services, and traits.

mod webhooks_model;
mod webhooks_service;
mod webhooks_traits;


pub use webhooks_model::{NewWebhook, Webhook};
pub use webhooks_service::WebhookService;
pub use webhooks_traits::{WebhookRepositoryTrait, WebhookServiceTrait};
