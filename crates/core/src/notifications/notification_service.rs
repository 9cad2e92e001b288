use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;

use super::notifications_model::{DispatchReport, WebhookMessage};
use super::notifier::NotifierTrait;
use crate::errors::Result;
use crate::tracks::TrackServiceTrait;
use crate::webhooks::{Webhook, WebhookServiceTrait};

/// Trait for the webhook notification dispatcher
#[async_trait]
pub trait NotificationServiceTrait: Send + Sync {
    /// Evaluates every subscriber against the tracks stored since its last
    /// check and notifies those whose threshold is met.
    async fn dispatch(&self) -> Result<DispatchReport>;
}

pub struct NotificationService {
    track_service: Arc<dyn TrackServiceTrait>,
    webhook_service: Arc<dyn WebhookServiceTrait>,
    notifier: Arc<dyn NotifierTrait>,
}

impl NotificationService {
    pub fn new(
        track_service: Arc<dyn TrackServiceTrait>,
        webhook_service: Arc<dyn WebhookServiceTrait>,
        notifier: Arc<dyn NotifierTrait>,
    ) -> Self {
        Self {
            track_service,
            webhook_service,
            notifier,
        }
    }

    /// Returns whether the subscriber was notified.
    async fn evaluate(&self, webhook: &Webhook, latest: i64, started: Instant) -> Result<bool> {
        let tracks = self.track_service.get_tracks_after(webhook.last_check)?;
        let threshold = webhook.min_trigger_value.max(1) as usize;

        // An empty batch also satisfies the modulo check.
        if tracks.len() % threshold != 0 {
            debug!(
                "Webhook {}: {} new track(s), waiting for a multiple of {}",
                webhook.id,
                tracks.len(),
                threshold
            );
            return Ok(false);
        }

        let ids: Vec<i64> = tracks.iter().map(|t| t.simple_id).collect();
        let message = WebhookMessage::new(latest, ids, started.elapsed());

        self.webhook_service
            .update_last_check(&webhook.id, latest)
            .await?;
        self.notifier.notify(&webhook.url, &message).await?;
        Ok(true)
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn dispatch(&self) -> Result<DispatchReport> {
        let started = Instant::now();
        let mut report = DispatchReport::default();

        let Some(latest) = self.track_service.latest_timestamp()? else {
            return Ok(report);
        };

        for webhook in self.webhook_service.list_webhooks()? {
            report.evaluated += 1;
            match self.evaluate(&webhook, latest, started).await {
                Ok(true) => report.notified += 1,
                Ok(false) => {}
                Err(e) => {
                    report.failed += 1;
                    warn!("Webhook {} ({}) not notified: {}", webhook.id, webhook.url, e);
                }
            }
        }

        info!(
            "Dispatch done: {} evaluated, {} notified, {} failed",
            report.evaluated, report.notified, report.failed
        );
        Ok(report)
    }
}
