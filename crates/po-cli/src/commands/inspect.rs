use anyhow::bail;
use po_core::entities::PurchaseOrder;
use po_core::projection::{PoActions, PurchaseOrderView, can_view_purchase_order};
use po_core::responses::InspectResponse;
use po_core::timeline::Timeline;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InspectArgs;
use crate::commands::shared::input::read_record;
use crate::commands::shared::session::resolve_session;
use crate::context::AppContext;
use crate::output::output;

/// Handle `poadm inspect`.
pub fn handle(args: &InspectArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let po: PurchaseOrder = read_record(&args.po, "purchase_order", args.strict, ctx)?;
    let session = resolve_session(&args.identity, ctx)?;

    if !can_view_purchase_order(&session.identity, &session.caps, &po) {
        bail!(
            "{} ({}) may not view purchase order {}",
            session.identity.user_id,
            session.identity.role,
            po.po_number
        );
    }

    let consistency = po.check_consistency();
    if !consistency.is_consistent() {
        tracing::warn!(
            po_number = %po.po_number,
            ?consistency,
            "purchase order record is internally inconsistent"
        );
    }

    let response = InspectResponse {
        purchase_order: PurchaseOrderView::project(&po, &session.caps),
        actions: PoActions::derive(po.status, &session.caps, &ctx.model),
        timeline: Timeline::build(po.status, &po.status_history),
        consistency,
    };
    output(&response, flags.format)
}
