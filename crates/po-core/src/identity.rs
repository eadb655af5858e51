use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Role;
use crate::permissions::CapabilitySet;

/// Session identity handed over by the auth provider.
///
/// Trusted as input: nothing here verifies who the user is. `grants` holds the
/// raw permission names from the provider; unknown names are dropped when the
/// identity is resolved.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    pub user_id: String,
    pub user_name: String,
    pub role: Role,
    #[serde(default)]
    pub grants: Vec<String>,
    /// Set for vendor users: the vendor whose orders they may see.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
}

impl SessionIdentity {
    /// Explicit grants parsed from `grants`, or `None` when the provider sent
    /// none.
    #[must_use]
    pub fn explicit_grants(&self) -> Option<CapabilitySet> {
        if self.grants.is_empty() {
            None
        } else {
            Some(CapabilitySet::from_names(&self.grants))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Permission;

    #[test]
    fn deserializes_provider_payload() {
        let json = serde_json::json!({
            "userId": "usr-3",
            "userName": "Priya",
            "role": "VENDOR",
            "grants": ["ACKNOWLEDGE_PO", "TELEPORT"],
            "vendorId": "ven-9"
        });
        let identity: SessionIdentity = serde_json::from_value(json).unwrap();
        assert_eq!(identity.role, Role::Vendor);
        assert_eq!(identity.vendor_id.as_deref(), Some("ven-9"));

        let grants = identity.explicit_grants().unwrap();
        assert!(grants.contains(Permission::AcknowledgePo));
        assert_eq!(grants.len(), 1);
    }

    #[test]
    fn missing_grants_mean_none() {
        let json = serde_json::json!({
            "userId": "usr-1",
            "userName": "Sam",
            "role": "APP_USER"
        });
        let identity: SessionIdentity = serde_json::from_value(json).unwrap();
        assert!(identity.explicit_grants().is_none());
    }
}
