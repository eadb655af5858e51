use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EmailStatus;

/// A vendor email sent for a purchase order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmailLogEntry {
    pub id: String,
    pub purchase_order_id: String,
    pub recipient: String,
    pub subject: String,
    pub sent_by: String,
    pub sent_at: DateTime<Utc>,
    pub status: EmailStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}
