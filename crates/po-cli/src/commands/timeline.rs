use po_core::entities::PurchaseOrder;
use po_core::timeline::Timeline;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TimelineArgs;
use crate::commands::shared::input::read_record;
use crate::context::AppContext;
use crate::output::{output, output_rows};

/// Handle `poadm timeline`.
pub fn handle(args: &TimelineArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let po: PurchaseOrder = read_record(&args.po, "purchase_order", args.strict, ctx)?;
    let timeline = Timeline::build(po.status, &po.status_history);

    if timeline.is_cancelled() {
        output(&timeline, flags.format)
    } else {
        output_rows(&timeline, &timeline.steps(), flags.format)
    }
}
