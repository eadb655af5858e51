//! What a session may see and do on a purchase order.
//!
//! [`PurchaseOrderView`] hides every money field unless the session holds
//! `VIEW_FINANCIAL_DATA`. [`PoActions`] turns capabilities plus the order's
//! current status into the button flags of the detail page.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{PoItem, PurchaseOrder, StatusHistory, Vendor};
use crate::enums::{Permission, PoStatus};
use crate::identity::SessionIdentity;
use crate::permissions::CapabilitySet;
use crate::transitions::StatusTransitionModel;

/// Whether `identity` may open `po` at all.
///
/// `VIEW_ALL_PO` sees everything. With only `VIEW_OWN_PO`, vendor users see
/// orders issued to their vendor and everyone else sees orders they created.
#[must_use]
pub fn can_view_purchase_order(
    identity: &SessionIdentity,
    caps: &CapabilitySet,
    po: &PurchaseOrder,
) -> bool {
    if caps.contains(Permission::ViewAllPo) {
        return true;
    }
    if !caps.contains(Permission::ViewOwnPo) {
        return false;
    }
    identity.vendor_id.as_deref().map_or_else(
        || po.is_created_by(&identity.user_id),
        |vendor_id| po.is_issued_to(vendor_id),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoItemView {
    pub id: String,
    pub description: String,
    pub quantity: Decimal,
    pub unit: Option<String>,
    pub unit_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
}

impl PoItemView {
    fn project(item: &PoItem, financial: bool) -> Self {
        Self {
            id: item.id.clone(),
            description: item.description.clone(),
            quantity: item.quantity,
            unit: item.unit.clone(),
            unit_price: financial.then_some(item.unit_price),
            total_price: financial.then_some(item.total_price),
        }
    }
}

/// A purchase order with money fields masked per capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderView {
    pub id: String,
    pub po_number: String,
    pub vendor: Vendor,
    pub items: Vec<PoItemView>,
    pub total_amount: Option<Decimal>,
    pub currency: Option<String>,
    pub status: PoStatus,
    pub status_history: StatusHistory,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub financial_data_visible: bool,
}

impl PurchaseOrderView {
    #[must_use]
    pub fn project(po: &PurchaseOrder, caps: &CapabilitySet) -> Self {
        let financial = caps.can_view_financial_data();
        Self {
            id: po.id.clone(),
            po_number: po.po_number.clone(),
            vendor: po.vendor.clone(),
            items: po
                .items
                .iter()
                .map(|item| PoItemView::project(item, financial))
                .collect(),
            total_amount: financial.then_some(po.total_amount),
            currency: po.currency.clone(),
            status: po.status,
            status_history: po.status_history.clone(),
            created_by: po.created_by.clone(),
            created_at: po.created_at,
            updated_at: po.updated_at,
            notes: po.notes.clone(),
            financial_data_visible: financial,
        }
    }
}

/// Action flags for the purchase order detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoActions {
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_submit: bool,
    pub can_approve: bool,
    pub can_send_email: bool,
    pub can_acknowledge: bool,
    pub can_complete: bool,
    pub can_cancel: bool,
    pub can_view_financial_data: bool,
}

impl PoActions {
    /// Derive the flags for an order currently at `status`.
    ///
    /// Editing is limited to `DRAFT` and `PENDING_APPROVAL`, deletion to
    /// `DRAFT`. Sending email is offered for the `APPROVED → SENT_TO_VENDOR`
    /// move and as a resend once the order is `SENT_TO_VENDOR`.
    #[must_use]
    pub fn derive(status: PoStatus, caps: &CapabilitySet, model: &StatusTransitionModel) -> Self {
        let can_move = |to| model.can_transition(status, to, caps);
        Self {
            can_edit: caps.can_edit()
                && matches!(status, PoStatus::Draft | PoStatus::PendingApproval),
            can_delete: caps.can_delete() && status == PoStatus::Draft,
            can_submit: can_move(PoStatus::PendingApproval),
            can_approve: can_move(PoStatus::Approved),
            can_send_email: can_move(PoStatus::SentToVendor)
                || (status == PoStatus::SentToVendor && caps.can_send_email()),
            can_acknowledge: can_move(PoStatus::Acknowledged),
            can_complete: can_move(PoStatus::Completed),
            can_cancel: can_move(PoStatus::Cancelled),
            can_view_financial_data: caps.can_view_financial_data(),
        }
    }
}
