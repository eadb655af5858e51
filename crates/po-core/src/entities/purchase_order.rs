use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{StatusHistory, Vendor};
use crate::enums::PoStatus;

/// Money comparisons round to cents before comparing.
const MONEY_SCALE: u32 = 2;

/// A single line on a purchase order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PoItem {
    pub id: String,
    pub description: String,
    pub quantity: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

impl PoItem {
    /// `quantity * unit_price`, or `None` if the product overflows.
    #[must_use]
    pub fn expected_total(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.unit_price)
    }

    /// Whether `total_price` equals `quantity * unit_price` at cent precision.
    /// An overflowing product never matches.
    #[must_use]
    pub fn line_total_matches(&self) -> bool {
        self.expected_total().is_some_and(|expected| {
            expected.round_dp(MONEY_SCALE) == self.total_price.round_dp(MONEY_SCALE)
        })
    }
}

/// A purchase order as returned by the REST data layer.
///
/// `total_amount` is supplied by the backend. The rule
/// `total_amount == Σ items.total_price` is checked by
/// [`PurchaseOrder::total_matches_items`], never enforced.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: String,
    pub po_number: String,
    pub vendor: Vendor,
    #[serde(default)]
    pub items: Vec<PoItem>,
    pub total_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub status: PoStatus,
    #[serde(default)]
    pub status_history: StatusHistory,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Result of [`PurchaseOrder::check_consistency`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyReport {
    /// `None` when the line totals overflow.
    pub computed_total: Option<Decimal>,
    pub total_matches_items: bool,
    pub history_matches_status: bool,
    /// Ids of items whose line total disagrees with quantity × unit price.
    pub mismatched_lines: Vec<String>,
}

impl ConsistencyReport {
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.total_matches_items && self.history_matches_status && self.mismatched_lines.is_empty()
    }
}

impl PurchaseOrder {
    /// Sum of every line's `total_price`, or `None` if the sum overflows.
    #[must_use]
    pub fn computed_total(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.total_price))
    }

    #[must_use]
    pub fn total_matches_items(&self) -> bool {
        self.computed_total().is_some_and(|total| {
            total.round_dp(MONEY_SCALE) == self.total_amount.round_dp(MONEY_SCALE)
        })
    }

    /// The latest history entry must name the current status. An empty
    /// history has nothing to disagree with.
    #[must_use]
    pub fn history_matches_status(&self) -> bool {
        self.status_history
            .latest()
            .is_none_or(|latest| latest.status == self.status)
    }

    #[must_use]
    pub fn is_created_by(&self, user_id: &str) -> bool {
        self.created_by == user_id
    }

    #[must_use]
    pub fn is_issued_to(&self, vendor_id: &str) -> bool {
        self.vendor.id == vendor_id
    }

    #[must_use]
    pub fn check_consistency(&self) -> ConsistencyReport {
        ConsistencyReport {
            computed_total: self.computed_total(),
            total_matches_items: self.total_matches_items(),
            history_matches_status: self.history_matches_status(),
            mismatched_lines: self
                .items
                .iter()
                .filter(|item| !item.line_total_matches())
                .map(|item| item.id.clone())
                .collect(),
        }
    }
}
