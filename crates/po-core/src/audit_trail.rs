//! Audit trail aggregation and display shaping.
//!
//! The backend feed may arrive in any order and may contain rows that do not
//! match the [`AuditLogEntry`] shape. [`aggregate_raw`] skips and counts the
//! bad rows; [`aggregate`] orders the rest by timestamp with a stable sort, so
//! entries sharing a timestamp keep their feed order.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::AuditLogEntry;
use crate::enums::AuditAction;

/// Order entries by timestamp, ascending. Stable.
#[must_use]
pub fn aggregate(mut entries: Vec<AuditLogEntry>) -> Vec<AuditLogEntry> {
    entries.sort_by_key(|entry| entry.timestamp);
    entries
}

/// Result of [`aggregate_raw`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateOutcome {
    pub entries: Vec<AuditLogEntry>,
    /// Rows dropped because they did not deserialize.
    pub skipped: usize,
}

/// Deserialize, skip malformed rows, then [`aggregate`].
#[must_use]
pub fn aggregate_raw(values: Vec<Value>) -> AggregateOutcome {
    let mut entries = Vec::with_capacity(values.len());
    let mut skipped = 0usize;

    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<AuditLogEntry>(value) {
            Ok(entry) => entries.push(entry),
            Err(error) => {
                skipped += 1;
                tracing::debug!(index, %error, "skipping malformed audit entry");
            }
        }
    }

    AggregateOutcome {
        entries: aggregate(entries),
        skipped,
    }
}

/// List filters offered by the audit log page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFilter {
    pub purchase_order_id: Option<String>,
    pub action: Option<AuditAction>,
    pub user_id: Option<String>,
}

impl AuditFilter {
    #[must_use]
    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        self.purchase_order_id
            .as_ref()
            .is_none_or(|id| *id == entry.purchase_order_id)
            && self.action.as_ref().is_none_or(|action| *action == entry.action)
            && self.user_id.as_ref().is_none_or(|id| *id == entry.user_id)
    }

    #[must_use]
    pub fn apply(&self, entries: Vec<AuditLogEntry>) -> Vec<AuditLogEntry> {
        entries.into_iter().filter(|entry| self.matches(entry)).collect()
    }
}

/// Before/after pair for an entry carrying value snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChangeDisplay {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Render a snapshot for display.
///
/// Strings pass through unquoted and other scalars use their JSON text.
/// Objects and arrays become compact JSON with object keys sorted.
#[must_use]
pub fn format_snapshot(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => {
            let mut out = String::new();
            write_canonical(value, &mut out);
            out
        }
        scalar => scalar.to_string(),
    }
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                if let Some(inner) = map.get(key.as_str()) {
                    write_canonical(inner, out);
                }
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Before/after pair, or `None` when the entry has no snapshots.
#[must_use]
pub fn change_display(entry: &AuditLogEntry) -> Option<ChangeDisplay> {
    if entry.old_value.is_none() && entry.new_value.is_none() {
        return None;
    }
    Some(ChangeDisplay {
        from: entry.old_value.as_ref().map(format_snapshot),
        to: entry.new_value.as_ref().map(format_snapshot),
    })
}

/// Metadata as `key: value` lines in insertion order.
#[must_use]
pub fn metadata_lines(entry: &AuditLogEntry) -> Vec<String> {
    entry
        .metadata
        .as_ref()
        .map(|metadata| {
            metadata
                .iter()
                .map(|(key, value)| format!("{key}: {value}"))
                .collect()
        })
        .unwrap_or_default()
}

/// A display-ready audit row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditDisplayEntry {
    pub id: String,
    pub purchase_order_id: String,
    pub action: AuditAction,
    pub description: String,
    pub user_name: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<ChangeDisplay>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<String>,
}

impl From<&AuditLogEntry> for AuditDisplayEntry {
    fn from(entry: &AuditLogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            purchase_order_id: entry.purchase_order_id.clone(),
            action: entry.action.clone(),
            description: entry.description.clone(),
            user_name: entry.user_name.clone(),
            timestamp: entry.timestamp,
            change: change_display(entry),
            metadata: metadata_lines(entry),
        }
    }
}

/// The three mutually exclusive states of an audit panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuditView {
    Loading,
    Error { message: String },
    Ready {
        entries: Vec<AuditDisplayEntry>,
        skipped: usize,
    },
}

impl AuditView {
    /// Build the view from a completed fetch of raw rows.
    pub fn from_fetch<E: std::fmt::Display>(result: Result<Vec<Value>, E>) -> Self {
        match result {
            Ok(values) => Self::ready(aggregate_raw(values)),
            Err(error) => Self::Error {
                message: error.to_string(),
            },
        }
    }

    #[must_use]
    pub fn ready(outcome: AggregateOutcome) -> Self {
        Self::Ready {
            entries: outcome.entries.iter().map(AuditDisplayEntry::from).collect(),
            skipped: outcome.skipped,
        }
    }

    /// `Ready` with no rows: the "no entries found" state. Distinct from
    /// `Loading` and `Error`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Ready { entries, .. } if entries.is_empty())
    }
}
