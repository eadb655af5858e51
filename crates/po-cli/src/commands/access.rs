use po_core::access::{RoleAccessPolicy, Route};
use po_core::responses::{AccessResponse, PathCheck};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AccessArgs;
use crate::commands::shared::session::resolve_session;
use crate::context::AppContext;
use crate::output::{output, output_rows};

/// Handle `poadm access`.
pub fn handle(args: &AccessArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let role = resolve_session(&args.identity, ctx)?.identity.role;

    let path_check = args.path.as_deref().map(|path| PathCheck {
        path: path.to_string(),
        route: Route::from_path(path),
        allowed: RoleAccessPolicy::can_access_path(role, path),
    });

    let response = AccessResponse {
        role,
        landing: RoleAccessPolicy::landing(role),
        menu: RoleAccessPolicy::menu(role),
        path_check,
    };

    match &response.path_check {
        Some(check) => output_rows(&response, check, flags.format),
        None if response.menu.is_empty() => output(&response, flags.format),
        None => output_rows(&response, &response.menu, flags.format),
    }
}
