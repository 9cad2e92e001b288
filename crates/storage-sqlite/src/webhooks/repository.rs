use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::warn;
use std::sync::Arc;
use uuid::Uuid;

use paragliding_core::webhooks::{NewWebhook, Webhook, WebhookRepositoryTrait};
use paragliding_core::Result;

use super::model::WebhookDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::webhooks;
use crate::schema::webhooks::dsl::*;

pub struct WebhookRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl WebhookRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        WebhookRepository { pool, writer }
    }
}

#[async_trait]
impl WebhookRepositoryTrait for WebhookRepository {
    async fn create(&self, new_webhook: NewWebhook, initial_check: i64) -> Result<Webhook> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Webhook> {
                let row = WebhookDB::from(Webhook {
                    id: Uuid::new_v4().to_string(),
                    url: new_webhook.url,
                    min_trigger_value: new_webhook.min_trigger_value,
                    last_check: initial_check,
                });
                diesel::insert_into(webhooks::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(Webhook::from(row))
            })
            .await
    }

    fn get_by_id(&self, webhook_id: &str) -> Result<Option<Webhook>> {
        let mut conn = get_connection(&self.pool)?;
        let row = webhooks
            .find(webhook_id)
            .select(WebhookDB::as_select())
            .first::<WebhookDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Webhook::from))
    }

    fn list(&self) -> Result<Vec<Webhook>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = webhooks
            .select(WebhookDB::as_select())
            .load::<WebhookDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Webhook::from).collect())
    }

    async fn delete(&self, webhook_id: &str) -> Result<Option<Webhook>> {
        let webhook_id = webhook_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Webhook>> {
                let deleted = diesel::delete(webhooks.find(webhook_id))
                    .returning(WebhookDB::as_returning())
                    .get_result::<WebhookDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?;
                Ok(deleted.map(Webhook::from))
            })
            .await
    }

    async fn update_last_check(&self, webhook_id: &str, checked_at: i64) -> Result<()> {
        let webhook_id = webhook_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let updated = diesel::update(webhooks.find(&webhook_id))
                    .set(last_check.eq(checked_at))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if updated == 0 {
                    warn!("lastCheck update skipped: webhook {} no longer exists", webhook_id);
                }
                Ok(())
            })
            .await
    }
}
