use anyhow::bail;
use po_core::enums::{Permission, Role};
use po_core::identity::SessionIdentity;
use po_core::permissions::CapabilitySet;

use crate::cli::root_commands::IdentityArgs;
use crate::commands::shared::input::read_record;
use crate::context::AppContext;

/// A session identity with its resolved capabilities.
pub struct Session {
    pub identity: SessionIdentity,
    pub caps: CapabilitySet,
    pub ignored_grants: Vec<String>,
}

/// Build the session from `--identity` or `--role`, then resolve it.
pub fn resolve_session(args: &IdentityArgs, ctx: &mut AppContext) -> anyhow::Result<Session> {
    let mut identity = match (&args.identity, &args.role) {
        (Some(path), _) => read_record::<SessionIdentity>(path, "session_identity", false, ctx)?,
        (None, Some(role)) => identity_from_flags(role, args),
        (None, None) => bail!("a session is required: pass --role or --identity"),
    };
    identity.grants.extend(args.grants.iter().cloned());

    if !identity.role.is_recognized() {
        tracing::warn!(
            user_id = %identity.user_id,
            "unrecognized role; the session gets no capabilities"
        );
    }

    let caps = ctx
        .resolver
        .resolve(identity.role, identity.explicit_grants().as_ref());
    let ignored_grants = unknown_grants(&identity.grants);

    Ok(Session {
        identity,
        caps,
        ignored_grants,
    })
}

fn identity_from_flags(role: &str, args: &IdentityArgs) -> SessionIdentity {
    let user_id = args.user.clone().unwrap_or_else(|| "cli".to_string());
    SessionIdentity {
        user_name: user_id.clone(),
        user_id,
        role: Role::parse(role),
        grants: Vec::new(),
        vendor_id: args.vendor.clone(),
    }
}

fn unknown_grants(grants: &[String]) -> Vec<String> {
    grants
        .iter()
        .filter(|name| name.parse::<Permission>().is_err())
        .cloned()
        .collect()
}
