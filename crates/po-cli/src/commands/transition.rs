use anyhow::bail;
use po_core::enums::PoStatus;
use po_core::responses::TransitionResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TransitionArgs;
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::session::resolve_session;
use crate::context::AppContext;
use crate::output::output;

/// Handle `poadm transition`.
pub fn handle(
    args: &TransitionArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let from: PoStatus = parse_enum(&args.from, "status")?;
    let to: PoStatus = parse_enum(&args.to, "status")?;
    let session = resolve_session(&args.identity, ctx)?;

    let decision = ctx.model.request_transition(from, to, &session.caps);
    let response = TransitionResponse {
        from,
        to,
        required: ctx.model.required_capability(from, to),
        decision,
    };
    output(&response, flags.format)?;

    if args.exit_code {
        if let Some(reason) = decision.deny_reason() {
            bail!("transition {from} -> {to} denied: {reason:?}");
        }
    }
    Ok(())
}
