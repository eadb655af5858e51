//! Central schema registry for purchase order records and CLI responses.
//!
//! The `SchemaRegistry` builds JSON Schemas from po-core types at construction
//! time using [`schemars::schema_for!`] and provides validation via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;
use serde::de::DeserializeOwned;

use crate::error::SchemaError;

/// Central store of every JSON Schema the tools know.
///
/// Built from po-core types via [`schemars::schema_for!`]. Provides lookup
/// by name and validation of arbitrary JSON values against registered schemas.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map as a `serde_json::Value`.
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::Value::from(schema_for!($ty)));
    };
}

impl SchemaRegistry {
    /// Build a new registry containing all record, rule-output and response
    /// schemas from po-core.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Records (8) ---
        register!(
            schemas,
            "purchase_order",
            po_core::entities::PurchaseOrder
        );
        register!(schemas, "po_item", po_core::entities::PoItem);
        register!(schemas, "vendor", po_core::entities::Vendor);
        register!(
            schemas,
            "status_history_entry",
            po_core::entities::StatusHistoryEntry
        );
        register!(
            schemas,
            "status_history",
            po_core::entities::StatusHistory
        );
        register!(
            schemas,
            "audit_log_entry",
            po_core::entities::AuditLogEntry
        );
        register!(
            schemas,
            "email_log_entry",
            po_core::entities::EmailLogEntry
        );
        register!(
            schemas,
            "session_identity",
            po_core::identity::SessionIdentity
        );

        // --- Rule outputs (7) ---
        register!(
            schemas,
            "purchase_order_view",
            po_core::projection::PurchaseOrderView
        );
        register!(schemas, "po_actions", po_core::projection::PoActions);
        register!(schemas, "timeline", po_core::timeline::Timeline);
        register!(
            schemas,
            "transition_decision",
            po_core::transitions::TransitionDecision
        );
        register!(
            schemas,
            "available_transition",
            po_core::transitions::AvailableTransition
        );
        register!(schemas, "audit_view", po_core::audit_trail::AuditView);
        register!(
            schemas,
            "audit_display_entry",
            po_core::audit_trail::AuditDisplayEntry
        );

        // --- CLI response types (6) ---
        register!(
            schemas,
            "capabilities_response",
            po_core::responses::CapabilitiesResponse
        );
        register!(
            schemas,
            "access_response",
            po_core::responses::AccessResponse
        );
        register!(
            schemas,
            "transition_response",
            po_core::responses::TransitionResponse
        );
        register!(
            schemas,
            "available_transitions_response",
            po_core::responses::AvailableTransitionsResponse
        );
        register!(
            schemas,
            "inspect_response",
            po_core::responses::InspectResponse
        );
        register!(
            schemas,
            "audit_trail_response",
            po_core::responses::AuditTrailResponse
        );

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Validate `instance` against `name`, then deserialize it.
    ///
    /// # Errors
    ///
    /// Everything [`SchemaRegistry::validate`] returns, plus
    /// `SchemaError::Deserialize` if serde still rejects the value.
    pub fn parse<T: DeserializeOwned>(
        &self,
        name: &str,
        instance: serde_json::Value,
    ) -> Result<T, SchemaError> {
        self.validate(name, &instance)?;
        Ok(serde_json::from_value(instance)?)
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
