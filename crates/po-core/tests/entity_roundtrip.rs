//! Serde roundtrip and JsonSchema validation tests for records and responses.

use chrono::{TimeZone, Utc};
use po_core::access::{MenuItem, Route};
use po_core::entities::*;
use po_core::enums::*;
use po_core::identity::SessionIdentity;
use po_core::permissions::{CapabilitySet, resolve};
use po_core::projection::{PoActions, PurchaseOrderView};
use po_core::responses::*;
use po_core::timeline::Timeline;
use po_core::transitions::{DenyReason, StatusTransitionModel, TransitionDecision};
use rust_decimal::Decimal;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_history() -> StatusHistory {
    let mut history = StatusHistory::new();
    history
        .append(StatusHistoryEntry {
            status: PoStatus::Draft,
            changed_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
            changed_by: "usr-1".into(),
            note: None,
        })
        .unwrap();
    history
        .append(StatusHistoryEntry {
            status: PoStatus::PendingApproval,
            changed_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
            changed_by: "usr-1".into(),
            note: Some("ready for review".into()),
        })
        .unwrap();
    history
}

fn sample_po() -> PurchaseOrder {
    PurchaseOrder {
        id: "po-7f3a".into(),
        po_number: "PO-2026-0042".into(),
        vendor: Vendor {
            id: "ven-11".into(),
            name: "Northwind Fasteners".into(),
            email: Some("orders@northwind.example".into()),
            address: None,
        },
        items: vec![PoItem {
            id: "itm-1".into(),
            description: "M8 hex bolts".into(),
            quantity: Decimal::from(100),
            unit: Some("pcs".into()),
            unit_price: Decimal::new(45, 2),
            total_price: Decimal::new(4500, 2),
        }],
        total_amount: Decimal::new(4500, 2),
        currency: Some("USD".into()),
        status: PoStatus::PendingApproval,
        status_history: sample_history(),
        created_by: "usr-1".into(),
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
        notes: Some("Rush".into()),
    }
}

fn sample_metadata() -> AuditMetadata {
    let mut metadata = AuditMetadata::default();
    metadata.insert("ip", "10.0.0.7");
    metadata.insert("attempt", 2_i64);
    metadata
}

roundtrip_and_validate!(purchase_order_roundtrip, PurchaseOrder, sample_po());

roundtrip_and_validate!(
    session_identity_roundtrip,
    SessionIdentity,
    SessionIdentity {
        user_id: "usr-9".into(),
        user_name: "Vera Vendor".into(),
        role: Role::Vendor,
        grants: vec!["ACKNOWLEDGE_PO".into()],
        vendor_id: Some("ven-11".into()),
    }
);

roundtrip_and_validate!(
    audit_log_entry_roundtrip,
    AuditLogEntry,
    AuditLogEntry {
        id: "aud-1".into(),
        purchase_order_id: "po-7f3a".into(),
        action: AuditAction::StatusChange,
        description: "Submitted for approval".into(),
        user_id: "usr-1".into(),
        user_name: "Ada".into(),
        timestamp: Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
        old_value: Some(serde_json::json!({"status": "DRAFT"})),
        new_value: Some(serde_json::json!({"status": "PENDING_APPROVAL"})),
        metadata: Some(sample_metadata()),
    }
);

roundtrip_and_validate!(
    audit_log_entry_custom_action_roundtrip,
    AuditLogEntry,
    AuditLogEntry {
        id: "aud-2".into(),
        purchase_order_id: "po-7f3a".into(),
        action: AuditAction::from("ATTACHMENT_ADDED"),
        description: "Quote attached".into(),
        user_id: "usr-1".into(),
        user_name: "Ada".into(),
        timestamp: Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap(),
        old_value: None,
        new_value: None,
        metadata: None,
    }
);

roundtrip_and_validate!(
    email_log_entry_roundtrip,
    EmailLogEntry,
    EmailLogEntry {
        id: "eml-1".into(),
        purchase_order_id: "po-7f3a".into(),
        recipient: "orders@northwind.example".into(),
        subject: "PO-2026-0042".into(),
        sent_by: "usr-5".into(),
        sent_at: Utc.with_ymd_and_hms(2026, 3, 4, 9, 0, 0).unwrap(),
        status: EmailStatus::Failed,
        error_message: Some("mailbox full".into()),
    }
);

roundtrip_and_validate!(
    capabilities_response_roundtrip,
    CapabilitiesResponse,
    CapabilitiesResponse {
        role: Role::MaterialControl,
        recognized: true,
        capabilities: resolve(Role::MaterialControl, None),
        ignored_grants: vec!["TELEPORT".into()],
    }
);

roundtrip_and_validate!(
    access_response_roundtrip,
    AccessResponse,
    AccessResponse {
        role: Role::AppUser,
        landing: Some(Route::Dashboard),
        menu: vec![MenuItem {
            route: Route::PurchaseOrders,
            label: "Purchase Orders".into(),
            path: "/purchase-orders".into(),
        }],
        path_check: Some(PathCheck {
            path: "/audit-log".into(),
            route: Some(Route::AuditLog),
            allowed: false,
        }),
    }
);

roundtrip_and_validate!(
    transition_response_roundtrip,
    TransitionResponse,
    TransitionResponse {
        from: PoStatus::PendingApproval,
        to: PoStatus::Approved,
        required: Some(Permission::ApprovePo),
        decision: TransitionDecision::Deny {
            reason: DenyReason::MissingCapability {
                required: Permission::ApprovePo,
            },
        },
    }
);

roundtrip_and_validate!(
    available_transitions_response_roundtrip,
    AvailableTransitionsResponse,
    AvailableTransitionsResponse {
        from: PoStatus::Approved,
        transitions: StatusTransitionModel::default()
            .available_transitions(PoStatus::Approved, &resolve(Role::MaterialControl, None)),
    }
);

roundtrip_and_validate!(
    inspect_response_roundtrip,
    InspectResponse,
    {
        let po = sample_po();
        let caps = resolve(Role::AppUser, None);
        InspectResponse {
            purchase_order: PurchaseOrderView::project(&po, &caps),
            actions: PoActions::derive(po.status, &caps, &StatusTransitionModel::default()),
            timeline: Timeline::build(po.status, &po.status_history),
            consistency: po.check_consistency(),
        }
    }
);

roundtrip_and_validate!(
    cancelled_timeline_roundtrip,
    Timeline,
    Timeline::build(PoStatus::Cancelled, &sample_history())
);

#[test]
fn decimal_amounts_accept_numbers_on_input() {
    let json = serde_json::json!({
        "id": "itm-2",
        "description": "Washers",
        "quantity": 10,
        "unitPrice": 0.25,
        "totalPrice": "2.50"
    });
    let item: PoItem = serde_json::from_value(json).unwrap();
    assert_eq!(item.unit_price, Decimal::new(25, 2));
    assert!(item.line_total_matches());
}

#[test]
fn unknown_role_deserializes_and_resolves_empty() {
    let identity: SessionIdentity = serde_json::from_value(serde_json::json!({
        "userId": "usr-3",
        "userName": "Mallory",
        "role": "SUPERUSER",
        "grants": ["VIEW_ALL_PO"]
    }))
    .unwrap();
    assert_eq!(identity.role, Role::Unrecognized);
    assert_eq!(
        resolve(identity.role, identity.explicit_grants().as_ref()),
        CapabilitySet::empty()
    );
}
