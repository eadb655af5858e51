use po_core::enums::PoStatus;
use po_core::responses::AvailableTransitionsResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::NextArgs;
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::session::resolve_session;
use crate::context::AppContext;
use crate::output::output_rows;

/// Handle `poadm next`.
pub fn handle(args: &NextArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let from: PoStatus = parse_enum(&args.from, "status")?;
    let session = resolve_session(&args.identity, ctx)?;

    let response = AvailableTransitionsResponse {
        from,
        transitions: ctx.model.available_transitions(from, &session.caps),
    };
    output_rows(&response, &response.transitions, flags.format)
}
