//! Status transition decisions.
//!
//! A transition is allowed when the edge is legal
//! ([`PoStatus::allowed_next_states`]) and the session holds the capability
//! gating that edge. Decisions are pure values: nothing here performs the
//! change. The backend applies it, and callers re-fetch the order afterwards
//! instead of assuming the new status.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Permission, PoStatus};
use crate::permissions::CapabilitySet;

/// Why a transition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DenyReason {
    /// The target is not a legal next state from the current one.
    NotReachable,
    /// The session lacks `required`, the gate for the target status.
    MissingCapability { required: Permission },
    /// The current state is terminal.
    AlreadyTerminal,
}

/// Outcome of [`StatusTransitionModel::request_transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum TransitionDecision {
    Allow,
    Deny { reason: DenyReason },
}

impl TransitionDecision {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    #[must_use]
    pub const fn deny_reason(self) -> Option<DenyReason> {
        match self {
            Self::Allow => None,
            Self::Deny { reason } => Some(reason),
        }
    }

    const fn deny(reason: DenyReason) -> Self {
        Self::Deny { reason }
    }
}

/// Configurable parts of the transition rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TransitionPolicy {
    /// Capability required to cancel. `None` leaves cancellation ungated.
    #[serde(default)]
    pub cancel_requires: Option<Permission>,
}

/// One legal target and whether the session may move there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AvailableTransition {
    pub to: PoStatus,
    pub required: Option<Permission>,
    #[serde(flatten)]
    pub decision: TransitionDecision,
}

/// The purchase order state machine with its capability gates.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusTransitionModel {
    policy: TransitionPolicy,
}

impl StatusTransitionModel {
    #[must_use]
    pub const fn new(policy: TransitionPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Legal next states from `from`, ignoring capabilities.
    #[must_use]
    pub const fn legal_next(from: PoStatus) -> &'static [PoStatus] {
        from.allowed_next_states()
    }

    /// Capability gating a move from `from` to `to`, or `None` if the edge is
    /// ungated or not in the legal table.
    #[must_use]
    pub fn required_capability(&self, from: PoStatus, to: PoStatus) -> Option<Permission> {
        if !from.can_transition_to(to) {
            return None;
        }
        match (from, to) {
            (PoStatus::PendingApproval, PoStatus::Draft) | (_, PoStatus::Approved) => {
                Some(Permission::ApprovePo)
            }
            (_, PoStatus::PendingApproval | PoStatus::Completed) => Some(Permission::EditPo),
            (_, PoStatus::SentToVendor) => Some(Permission::SendPoEmail),
            (_, PoStatus::Acknowledged) => Some(Permission::AcknowledgePo),
            (_, PoStatus::Cancelled) => self.policy.cancel_requires,
            (_, PoStatus::Draft) => None,
        }
    }

    /// Decide whether `from → to` may be requested with `caps`.
    ///
    /// Checks run in order: terminal source, legal edge, capability gate.
    #[must_use]
    pub fn request_transition(
        &self,
        from: PoStatus,
        to: PoStatus,
        caps: &CapabilitySet,
    ) -> TransitionDecision {
        let decision = if from.is_terminal() {
            TransitionDecision::deny(DenyReason::AlreadyTerminal)
        } else if !from.can_transition_to(to) {
            TransitionDecision::deny(DenyReason::NotReachable)
        } else {
            match self.required_capability(from, to) {
                Some(required) if !caps.contains(required) => {
                    TransitionDecision::deny(DenyReason::MissingCapability { required })
                }
                _ => TransitionDecision::Allow,
            }
        };

        if let Some(reason) = decision.deny_reason() {
            tracing::debug!(%from, %to, ?reason, "transition denied");
        }

        decision
    }

    #[must_use]
    pub fn can_transition(&self, from: PoStatus, to: PoStatus, caps: &CapabilitySet) -> bool {
        self.request_transition(from, to, caps).is_allowed()
    }

    /// Every legal target from `from`, each with its decision for `caps`.
    #[must_use]
    pub fn available_transitions(
        &self,
        from: PoStatus,
        caps: &CapabilitySet,
    ) -> Vec<AvailableTransition> {
        Self::legal_next(from)
            .iter()
            .map(|&to| AvailableTransition {
                to,
                required: self.required_capability(from, to),
                decision: self.request_transition(from, to, caps),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::enums::Role;
    use crate::permissions::resolve;

    fn model() -> StatusTransitionModel {
        StatusTransitionModel::default()
    }

    #[rstest]
    #[case(CapabilitySet::all())]
    #[case(CapabilitySet::empty())]
    #[case(resolve(Role::Admin, None))]
    #[case(resolve(Role::MaterialControl, None))]
    #[case(resolve(Role::AppUser, None))]
    #[case(resolve(Role::Vendor, None))]
    fn illegal_pairs_are_not_reachable(#[case] caps: CapabilitySet) {
        for from in PoStatus::ALL.into_iter().filter(|s| !s.is_terminal()) {
            for to in PoStatus::ALL {
                if from.can_transition_to(to) {
                    continue;
                }
                assert_eq!(
                    model().request_transition(from, to, &caps),
                    TransitionDecision::Deny {
                        reason: DenyReason::NotReachable
                    },
                    "{from} -> {to}"
                );
            }
        }
    }

    #[rstest]
    #[case(PoStatus::Draft, PoStatus::SentToVendor)]
    #[case(PoStatus::Draft, PoStatus::Completed)]
    #[case(PoStatus::Approved, PoStatus::PendingApproval)]
    fn app_user_skipping_ahead_is_not_reachable(#[case] from: PoStatus, #[case] to: PoStatus) {
        let caps = resolve(Role::AppUser, None);
        assert_eq!(
            model().request_transition(from, to, &caps).deny_reason(),
            Some(DenyReason::NotReachable)
        );
    }

    #[test]
    fn illegal_pairs_have_no_gate() {
        let gated = StatusTransitionModel::new(TransitionPolicy {
            cancel_requires: Some(Permission::EditPo),
        });
        for from in PoStatus::ALL {
            for to in PoStatus::ALL {
                if !from.can_transition_to(to) {
                    assert_eq!(gated.required_capability(from, to), None, "{from} -> {to}");
                }
            }
        }
    }

    #[test]
    fn terminal_states_never_transition() {
        let caps = CapabilitySet::all();
        for from in [PoStatus::Completed, PoStatus::Cancelled] {
            for to in PoStatus::ALL {
                let decision = model().request_transition(from, to, &caps);
                assert_eq!(
                    decision.deny_reason(),
                    Some(DenyReason::AlreadyTerminal),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[rstest]
    #[case(CapabilitySet::from([Permission::AcknowledgePo]), true)]
    #[case(CapabilitySet::all(), true)]
    #[case(CapabilitySet::from([Permission::SendPoEmail, Permission::EditPo]), false)]
    #[case(CapabilitySet::empty(), false)]
    fn acknowledge_requires_acknowledge_po(#[case] caps: CapabilitySet, #[case] allowed: bool) {
        let decision =
            model().request_transition(PoStatus::SentToVendor, PoStatus::Acknowledged, &caps);
        if allowed {
            assert_eq!(decision, TransitionDecision::Allow);
        } else {
            assert_eq!(
                decision,
                TransitionDecision::Deny {
                    reason: DenyReason::MissingCapability {
                        required: Permission::AcknowledgePo
                    }
                }
            );
        }
    }

    #[rstest]
    #[case(PoStatus::Draft, PoStatus::PendingApproval, Some(Permission::EditPo))]
    #[case(PoStatus::PendingApproval, PoStatus::Approved, Some(Permission::ApprovePo))]
    #[case(PoStatus::PendingApproval, PoStatus::Draft, Some(Permission::ApprovePo))]
    #[case(PoStatus::Approved, PoStatus::SentToVendor, Some(Permission::SendPoEmail))]
    #[case(PoStatus::SentToVendor, PoStatus::Acknowledged, Some(Permission::AcknowledgePo))]
    #[case(PoStatus::Acknowledged, PoStatus::Completed, Some(Permission::EditPo))]
    #[case(PoStatus::Draft, PoStatus::Cancelled, None)]
    fn edge_gates(#[case] from: PoStatus, #[case] to: PoStatus, #[case] gate: Option<Permission>) {
        assert_eq!(model().required_capability(from, to), gate);
    }

    #[rstest]
    #[case(Role::AppUser)]
    #[case(Role::Admin)]
    fn draft_to_approved_is_not_reachable_for_any_role(#[case] role: Role) {
        let caps = resolve(role, None);
        let decision = model().request_transition(PoStatus::Draft, PoStatus::Approved, &caps);
        assert_eq!(decision.deny_reason(), Some(DenyReason::NotReachable));
    }

    #[test]
    fn pending_user_without_approve_gets_missing_capability() {
        let caps = resolve(Role::MaterialControl, None);
        let decision =
            model().request_transition(PoStatus::PendingApproval, PoStatus::Approved, &caps);
        assert_eq!(
            decision.deny_reason(),
            Some(DenyReason::MissingCapability {
                required: Permission::ApprovePo
            })
        );
    }

    #[test]
    fn cancel_is_ungated_by_default() {
        let caps = resolve(Role::AppUser, None);
        assert!(model().can_transition(PoStatus::Draft, PoStatus::Cancelled, &caps));
    }

    #[test]
    fn cancel_gate_is_configurable() {
        let gated = StatusTransitionModel::new(TransitionPolicy {
            cancel_requires: Some(Permission::EditPo),
        });
        let app_user = resolve(Role::AppUser, None);
        let material = resolve(Role::MaterialControl, None);

        assert!(!gated.can_transition(PoStatus::Draft, PoStatus::Cancelled, &app_user));
        assert!(gated.can_transition(PoStatus::Approved, PoStatus::Cancelled, &material));
    }

    #[test]
    fn same_status_is_not_reachable() {
        let caps = CapabilitySet::all();
        let decision = model().request_transition(PoStatus::Draft, PoStatus::Draft, &caps);
        assert_eq!(decision.deny_reason(), Some(DenyReason::NotReachable));
    }

    #[test]
    fn available_transitions_lists_legal_targets_with_decisions() {
        let caps = resolve(Role::Vendor, None);
        let options = model().available_transitions(PoStatus::SentToVendor, &caps);

        let targets: Vec<_> = options.iter().map(|o| o.to).collect();
        assert_eq!(targets, vec![PoStatus::Acknowledged, PoStatus::Cancelled]);
        assert!(options.iter().all(|o| o.decision.is_allowed()));
    }

    #[test]
    fn decision_serializes_with_tags() {
        let deny = TransitionDecision::Deny {
            reason: DenyReason::MissingCapability {
                required: Permission::ApprovePo,
            },
        };
        let json = serde_json::to_value(deny).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "decision": "deny",
                "reason": {"kind": "missing_capability", "required": "APPROVE_PO"}
            })
        );

        let allow = serde_json::to_value(TransitionDecision::Allow).unwrap();
        assert_eq!(allow, serde_json::json!({"decision": "allow"}));
    }
}
