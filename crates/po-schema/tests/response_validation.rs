//! Every CLI response built from real records validates against its schema.

use chrono::{TimeZone, Utc};
use po_core::entities::{PoItem, PurchaseOrder, StatusHistory, Vendor};
use po_core::enums::{PoStatus, Role};
use po_core::permissions::resolve;
use po_core::projection::{PoActions, PurchaseOrderView};
use po_core::responses::{AvailableTransitionsResponse, InspectResponse};
use po_core::timeline::Timeline;
use po_core::transitions::StatusTransitionModel;
use po_schema::SchemaRegistry;
use rust_decimal::Decimal;

fn order(status: PoStatus) -> PurchaseOrder {
    let at = Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap();
    PurchaseOrder {
        id: "po-1".into(),
        po_number: "PO-1".into(),
        vendor: Vendor {
            id: "ven-1".into(),
            name: "Acme".into(),
            email: None,
            address: Some("1 Main St".into()),
        },
        items: vec![PoItem {
            id: "itm-1".into(),
            description: "Pallets".into(),
            quantity: Decimal::from(3),
            unit: None,
            unit_price: Decimal::new(1999, 2),
            total_price: Decimal::new(5997, 2),
        }],
        total_amount: Decimal::new(5997, 2),
        currency: None,
        status,
        status_history: StatusHistory::new(),
        created_by: "usr-1".into(),
        created_at: at,
        updated_at: at,
        notes: None,
    }
}

#[test]
fn inspect_responses_validate_for_every_role() {
    let registry = SchemaRegistry::new();
    let model = StatusTransitionModel::default();

    for role in Role::KNOWN {
        for status in PoStatus::ALL {
            let po = order(status);
            let caps = resolve(role, None);
            let response = InspectResponse {
                purchase_order: PurchaseOrderView::project(&po, &caps),
                actions: PoActions::derive(status, &caps, &model),
                timeline: Timeline::build(status, &po.status_history),
                consistency: po.check_consistency(),
            };
            let value = serde_json::to_value(&response).unwrap();
            registry
                .validate("inspect_response", &value)
                .unwrap_or_else(|e| panic!("{role} at {status}: {e}"));
        }
    }
}

#[test]
fn available_transitions_response_validates() {
    let registry = SchemaRegistry::new();
    let caps = resolve(Role::Admin, None);
    let response = AvailableTransitionsResponse {
        from: PoStatus::PendingApproval,
        transitions: StatusTransitionModel::default()
            .available_transitions(PoStatus::PendingApproval, &caps),
    };
    let value = serde_json::to_value(&response).unwrap();
    assert!(registry.validate("available_transitions_response", &value).is_ok());
}

#[test]
fn purchase_order_roundtrips_through_parse() {
    let registry = SchemaRegistry::new();
    let po = order(PoStatus::Draft);
    let value = serde_json::to_value(&po).unwrap();
    let parsed: PurchaseOrder = registry.parse("purchase_order", value).unwrap();
    assert_eq!(parsed, po);
}
