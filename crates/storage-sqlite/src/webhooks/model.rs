//! Database models for webhook subscribers.

use diesel::prelude::*;
use paragliding_core::webhooks::Webhook;

#[derive(Queryable, Insertable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::webhooks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WebhookDB {
    pub id: String,
    pub webhook_url: String,
    pub min_trigger_value: i32,
    pub last_check: i64,
}

impl From<WebhookDB> for Webhook {
    fn from(db: WebhookDB) -> Self {
        Self {
            id: db.id,
            url: db.webhook_url,
            min_trigger_value: db.min_trigger_value,
            last_check: db.last_check,
        }
    }
}

impl From<Webhook> for WebhookDB {
    fn from(domain: Webhook) -> Self {
        Self {
            id: domain.id,
            webhook_url: domain.url,
            min_trigger_value: domain.min_trigger_value,
            last_check: domain.last_check,
        }
    }
}
