use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::PoStatus;
use crate::errors::CoreError;

/// One status a purchase order has held.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryEntry {
    pub status: PoStatus,
    pub changed_at: DateTime<Utc>,
    pub changed_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Append-only, chronologically ordered status history.
///
/// There is no API to remove or reorder entries. Records received from the
/// backend are kept in the order they arrive.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(transparent)]
pub struct StatusHistory(Vec<StatusHistoryEntry>);

impl StatusHistory {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an entry.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `entry` is older than the current
    /// latest entry.
    pub fn append(&mut self, entry: StatusHistoryEntry) -> Result<(), CoreError> {
        if let Some(latest) = self.latest() {
            if entry.changed_at < latest.changed_at {
                return Err(CoreError::Validation(format!(
                    "status history entry for {} at {} predates latest entry at {}",
                    entry.status,
                    entry.changed_at.to_rfc3339(),
                    latest.changed_at.to_rfc3339()
                )));
            }
        }
        self.0.push(entry);
        Ok(())
    }

    #[must_use]
    pub fn entries(&self) -> &[StatusHistoryEntry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StatusHistoryEntry> {
        self.0.iter()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&StatusHistoryEntry> {
        self.0.last()
    }

    /// Most recent time the order entered `status`.
    #[must_use]
    pub fn last_entered(&self, status: PoStatus) -> Option<&StatusHistoryEntry> {
        self.0.iter().rev().find(|entry| entry.status == status)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a StatusHistory {
    type Item = &'a StatusHistoryEntry;
    type IntoIter = std::slice::Iter<'a, StatusHistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
