//! Webhook subscription models.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MIN_TRIGGER_VALUE;
use crate::errors::{Result, ValidationError};

/// A registered webhook subscriber.
///
/// `id` and `last_check` are bookkeeping owned by the registry and are not
/// part of the JSON representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    #[serde(skip)]
    pub id: String,
    #[serde(rename = "webhookURL")]
    pub url: String,
    #[serde(rename = "minTriggerValue")]
    pub min_trigger_value: i32,
    /// Timestamp of the newest track considered at the last evaluation.
    #[serde(skip)]
    pub last_check: i64,
}

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWebhook {
    #[serde(rename = "webhookURL")]
    pub url: String,
    #[serde(rename = "minTriggerValue", default = "default_min_trigger_value")]
    pub min_trigger_value: i32,
}

fn default_min_trigger_value() -> i32 {
    DEFAULT_MIN_TRIGGER_VALUE
}

impl NewWebhook {
    pub fn new(url: impl Into<String>, min_trigger_value: i32) -> Self {
        Self {
            url: url.into(),
            min_trigger_value,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingField("webhookURL".to_string()).into());
        }
        if self.min_trigger_value < 1 {
            return Err(ValidationError::InvalidInput(format!(
                "minTriggerValue must be at least 1, got {}",
                self.min_trigger_value
            ))
            .into());
        }
        Ok(())
    }
}
