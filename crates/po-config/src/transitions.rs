//! Status transition rule configuration.

use po_core::enums::Permission;
use po_core::transitions::TransitionPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransitionsConfig {
    /// Permission required to cancel an order, e.g. `"EDIT_PO"`.
    /// Unset leaves cancellation open to every session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_requires: Option<Permission>,
}

impl TransitionsConfig {
    #[must_use]
    pub const fn policy(&self) -> TransitionPolicy {
        TransitionPolicy {
            cancel_requires: self.cancel_requires,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_ungated_by_default() {
        assert_eq!(TransitionsConfig::default().policy().cancel_requires, None);
    }

    #[test]
    fn policy_carries_the_gate() {
        let config = TransitionsConfig {
            cancel_requires: Some(Permission::ApprovePo),
        };
        assert_eq!(config.policy().cancel_requires, Some(Permission::ApprovePo));
    }
}
