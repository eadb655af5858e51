use po_core::responses::CapabilitiesResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CapsArgs;
use crate::commands::shared::session::resolve_session;
use crate::context::AppContext;
use crate::output::output_rows;

/// Handle `poadm caps`.
pub fn handle(args: &CapsArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = resolve_session(&args.identity, ctx)?;
    let response = CapabilitiesResponse {
        role: session.identity.role,
        recognized: session.identity.role.is_recognized(),
        capabilities: session.caps,
        ignored_grants: session.ignored_grants,
    };
    output_rows(&response, &response.capabilities, flags.format)
}
