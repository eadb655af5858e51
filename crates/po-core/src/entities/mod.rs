//! Entity structs for the records supplied by the REST data layer.
//!
//! Field names are `camelCase` on the wire. All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema validation.

mod audit;
mod email_log;
mod purchase_order;
mod status_history;
mod vendor;

pub use audit::{AuditLogEntry, AuditMetadata, MetadataValue};
pub use email_log::EmailLogEntry;
pub use purchase_order::{ConsistencyReport, PoItem, PurchaseOrder};
pub use status_history::{StatusHistory, StatusHistoryEntry};
pub use vendor::Vendor;
