use std::sync::Arc;

use chrono::{DateTime, Utc};
use paragliding_core::{
    igc::HttpTrackExtractor,
    notifications::{HttpNotifier, NotificationService, NotificationServiceTrait},
    ticker::{TickerService, TickerServiceTrait},
    tracks::{TrackService, TrackServiceTrait},
    webhooks::{WebhookService, WebhookServiceTrait},
};
use paragliding_storage_sqlite::{db, TrackRepository, WebhookRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{config::Config, domain_events::WebDomainEventSink};

pub struct AppState {
    pub track_service: Arc<dyn TrackServiceTrait>,
    pub ticker_service: Arc<dyn TickerServiceTrait>,
    pub webhook_service: Arc<dyn WebhookServiceTrait>,
    pub started_at: DateTime<Utc>,
}

pub fn init_tracing() {
    let log_format =
        std::env::var("PARAGLIDING_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone(), config.request_timeout);

    // Domain event sink - Phase 1: events buffer until the worker starts
    let domain_event_sink = Arc::new(WebDomainEventSink::new());

    let track_repository = Arc::new(TrackRepository::new(pool.clone(), writer.clone()));
    let extractor = Arc::new(HttpTrackExtractor::new(config.http_timeout)?);
    let track_service: Arc<dyn TrackServiceTrait> = Arc::new(
        TrackService::new(track_repository, extractor)
            .with_event_sink(domain_event_sink.clone()),
    );

    let ticker_service: Arc<dyn TickerServiceTrait> =
        Arc::new(TickerService::new(track_service.clone()).with_cap(config.ticker_cap));

    let webhook_repository = Arc::new(WebhookRepository::new(pool.clone(), writer.clone()));
    let webhook_service: Arc<dyn WebhookServiceTrait> = Arc::new(WebhookService::new(
        webhook_repository,
        track_service.clone(),
    ));

    let notifier = Arc::new(HttpNotifier::new(config.http_timeout)?);
    let notification_service: Arc<dyn NotificationServiceTrait> = Arc::new(
        NotificationService::new(track_service.clone(), webhook_service.clone(), notifier),
    );

    // Domain event sink - Phase 2: start the worker now that the dispatcher exists
    domain_event_sink.start_worker(notification_service);

    Ok(Arc::new(AppState {
        track_service,
        ticker_service,
        webhook_service,
        started_at: Utc::now(),
    }))
}
