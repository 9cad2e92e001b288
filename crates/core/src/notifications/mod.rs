//! Notifications module - webhook dispatch on track arrival.

mod notification_service;
mod notifications_model;
mod notifier;


pub use notification_service::{NotificationService, NotificationServiceTrait};
pub use notifications_model::{format_track_ids, DispatchReport, WebhookMessage};
pub use notifier::{HttpNotifier, NotifierTrait};
