//! Role, status, permission and audit action enums.
//!
//! Wire values use `SCREAMING_SNAKE_CASE` to match the REST records
//! (`PENDING_APPROVAL`, `MATERIAL_CONTROL`, `VIEW_FINANCIAL_DATA`).
//! `PoStatus` carries the state machine's legal edges via
//! `allowed_next_states()`; capability gates live in [`crate::transitions`].

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Session role supplied by the auth provider.
///
/// Role strings the model does not know deserialize to `Unrecognized`, which
/// resolves to an empty capability set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    MaterialControl,
    AppUser,
    Vendor,
    #[serde(other)]
    Unrecognized,
}

impl Role {
    /// Every role the model knows about, excluding `Unrecognized`.
    pub const KNOWN: [Self; 4] = [
        Self::Admin,
        Self::MaterialControl,
        Self::AppUser,
        Self::Vendor,
    ];

    /// Parse a role name leniently.
    ///
    /// Case, `-`, `_` and spaces are ignored, so `material-control`,
    /// `MaterialControl` and `MATERIAL_CONTROL` are the same role. Anything
    /// else maps to `Unrecognized`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let normalized: String = raw
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "admin" => Self::Admin,
            "materialcontrol" => Self::MaterialControl,
            "appuser" => Self::AppUser,
            "vendor" => Self::Vendor,
            _ => Self::Unrecognized,
        }
    }

    #[must_use]
    pub const fn is_recognized(self) -> bool {
        !matches!(self, Self::Unrecognized)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::MaterialControl => "MATERIAL_CONTROL",
            Self::AppUser => "APP_USER",
            Self::Vendor => "VENDOR",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PoStatus
// ---------------------------------------------------------------------------

/// Status of a purchase order through its approval and fulfilment lifecycle.
///
/// ```text
/// draft → pending_approval → approved → sent_to_vendor → acknowledged → completed
///       ↖ (rejected)       ↙
/// any non-terminal → cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoStatus {
    Draft,
    PendingApproval,
    Approved,
    SentToVendor,
    Acknowledged,
    Completed,
    Cancelled,
}

impl PoStatus {
    /// The linear progression shown on the status timeline. `Cancelled` is
    /// not part of it and renders as a terminal marker.
    pub const PROGRESSION: [Self; 6] = [
        Self::Draft,
        Self::PendingApproval,
        Self::Approved,
        Self::SentToVendor,
        Self::Acknowledged,
        Self::Completed,
    ];

    pub const ALL: [Self; 7] = [
        Self::Draft,
        Self::PendingApproval,
        Self::Approved,
        Self::SentToVendor,
        Self::Acknowledged,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::PendingApproval, Self::Cancelled],
            Self::PendingApproval => &[Self::Approved, Self::Draft, Self::Cancelled],
            Self::Approved => &[Self::SentToVendor, Self::Cancelled],
            Self::SentToVendor => &[Self::Acknowledged, Self::Cancelled],
            Self::Acknowledged => &[Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled => &[],
        }
    }

    /// Check whether transitioning to `next` is a legal edge.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Position in [`Self::PROGRESSION`]. `None` for `Cancelled`.
    #[must_use]
    pub const fn ordinal(self) -> Option<usize> {
        match self {
            Self::Draft => Some(0),
            Self::PendingApproval => Some(1),
            Self::Approved => Some(2),
            Self::SentToVendor => Some(3),
            Self::Acknowledged => Some(4),
            Self::Completed => Some(5),
            Self::Cancelled => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::PendingApproval => "PENDING_APPROVAL",
            Self::Approved => "APPROVED",
            Self::SentToVendor => "SENT_TO_VENDOR",
            Self::Acknowledged => "ACKNOWLEDGED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for PoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PoStatus {
    type Err = CoreError;

    /// Accepts the wire form as well as `snake_case` and `kebab-case`.
    /// Any other value is a hard error: status values are closed.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().replace('-', "_").to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| CoreError::UnknownStatus {
                value: raw.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Permission
// ---------------------------------------------------------------------------

/// A single capability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    ViewAllPo,
    ViewOwnPo,
    CreatePo,
    EditPo,
    DeletePo,
    ApprovePo,
    SendPoEmail,
    AcknowledgePo,
    ViewFinancialData,
}

impl Permission {
    pub const ALL: [Self; 9] = [
        Self::ViewAllPo,
        Self::ViewOwnPo,
        Self::CreatePo,
        Self::EditPo,
        Self::DeletePo,
        Self::ApprovePo,
        Self::SendPoEmail,
        Self::AcknowledgePo,
        Self::ViewFinancialData,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewAllPo => "VIEW_ALL_PO",
            Self::ViewOwnPo => "VIEW_OWN_PO",
            Self::CreatePo => "CREATE_PO",
            Self::EditPo => "EDIT_PO",
            Self::DeletePo => "DELETE_PO",
            Self::ApprovePo => "APPROVE_PO",
            Self::SendPoEmail => "SEND_PO_EMAIL",
            Self::AcknowledgePo => "ACKNOWLEDGE_PO",
            Self::ViewFinancialData => "VIEW_FINANCIAL_DATA",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().replace('-', "_").to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|permission| permission.as_str() == normalized)
            .ok_or_else(|| CoreError::UnknownPermission {
                value: raw.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Kind of change recorded in the audit log.
///
/// The backend may add new action tags at any time, so unknown tags are kept
/// verbatim in `Other` instead of failing the entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuditAction {
    Create,
    Update,
    StatusChange,
    EmailSent,
    Delete,
    Approve,
    Acknowledge,
    Other(String),
}

impl AuditAction {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::StatusChange => "STATUS_CHANGE",
            Self::EmailSent => "EMAIL_SENT",
            Self::Delete => "DELETE",
            Self::Approve => "APPROVE",
            Self::Acknowledge => "ACKNOWLEDGE",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for AuditAction {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "CREATE" => Self::Create,
            "UPDATE" => Self::Update,
            "STATUS_CHANGE" => Self::StatusChange,
            "EMAIL_SENT" => Self::EmailSent,
            "DELETE" => Self::Delete,
            "APPROVE" => Self::Approve,
            "ACKNOWLEDGE" => Self::Acknowledge,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for AuditAction {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<AuditAction> for String {
    fn from(action: AuditAction) -> Self {
        match action {
            AuditAction::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl JsonSchema for AuditAction {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("AuditAction")
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        String::json_schema(generator)
    }
}

// ---------------------------------------------------------------------------
// EmailStatus
// ---------------------------------------------------------------------------

/// Delivery state of a vendor email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmailStatus {
    Pending,
    Sent,
    Failed,
}

impl EmailStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Sent => "SENT",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
