//! CLI response types returned as JSON by `poadm` commands.
//!
//! These structs define the shape of JSON output for `poadm caps`,
//! `poadm access`, `poadm transition`, `poadm next`, `poadm timeline`,
//! `poadm inspect` and `poadm audit`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::access::{MenuItem, Route};
use crate::audit_trail::AuditDisplayEntry;
use crate::entities::ConsistencyReport;
use crate::enums::{Permission, PoStatus, Role};
use crate::permissions::CapabilitySet;
use crate::projection::{PoActions, PurchaseOrderView};
use crate::timeline::Timeline;
use crate::transitions::{AvailableTransition, TransitionDecision};

/// Response from `poadm caps`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitiesResponse {
    pub role: Role,
    pub recognized: bool,
    pub capabilities: CapabilitySet,
    /// Grant names that did not match any known permission.
    pub ignored_grants: Vec<String>,
}

/// Response from `poadm access`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessResponse {
    pub role: Role,
    pub landing: Option<Route>,
    pub menu: Vec<MenuItem>,
    /// Present when a single path was checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_check: Option<PathCheck>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PathCheck {
    pub path: String,
    pub route: Option<Route>,
    pub allowed: bool,
}

/// Response from `poadm transition`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransitionResponse {
    pub from: PoStatus,
    pub to: PoStatus,
    pub required: Option<Permission>,
    #[serde(flatten)]
    pub decision: TransitionDecision,
}

/// Response from `poadm next`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTransitionsResponse {
    pub from: PoStatus,
    pub transitions: Vec<AvailableTransition>,
}

/// Response from `poadm inspect`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InspectResponse {
    pub purchase_order: PurchaseOrderView,
    pub actions: PoActions,
    pub timeline: Timeline,
    pub consistency: ConsistencyReport,
}

/// Response from `poadm audit`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditTrailResponse {
    pub entries: Vec<AuditDisplayEntry>,
    pub total: usize,
    /// Rows dropped because they could not be parsed.
    pub skipped: usize,
}
