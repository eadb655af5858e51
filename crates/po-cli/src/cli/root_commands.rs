use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Resolve the capability set of a session.
    Caps(CapsArgs),
    /// Show the menu and landing route of a session, or check one path.
    Access(AccessArgs),
    /// Decide whether one status change may be requested.
    Transition(TransitionArgs),
    /// List the legal next statuses with a decision for each.
    Next(NextArgs),
    /// Build the status timeline of a purchase order.
    Timeline(TimelineArgs),
    /// Project a purchase order for a session: masked view, actions, timeline.
    Inspect(InspectArgs),
    /// Order, filter and format an audit log export.
    Audit(AuditArgs),
    /// Print a registered JSON Schema, or list them.
    Schema(SchemaArgs),
    /// Print the effective configuration.
    Config,
}

/// Who is asking. Either `--identity <file>` or `--role`, plus optional grants.
#[derive(Clone, Debug, Default, Args)]
pub struct IdentityArgs {
    /// Session role (ADMIN, MATERIAL_CONTROL, APP_USER, VENDOR).
    #[arg(long, conflicts_with = "identity")]
    pub role: Option<String>,

    /// Explicit permission grant, e.g. APPROVE_PO. Repeatable.
    #[arg(long = "grant", value_name = "PERMISSION")]
    pub grants: Vec<String>,

    /// Session identity JSON file (`-` for stdin).
    #[arg(long, value_name = "FILE")]
    pub identity: Option<PathBuf>,

    /// User id, used for own-order visibility.
    #[arg(long, conflicts_with = "identity")]
    pub user: Option<String>,

    /// Vendor id for vendor sessions.
    #[arg(long, conflicts_with = "identity")]
    pub vendor: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct CapsArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,
}

#[derive(Clone, Debug, Args)]
pub struct AccessArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Check a single route path, e.g. /purchase-orders/42.
    #[arg(long)]
    pub path: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct TransitionArgs {
    /// Current status.
    #[arg(long)]
    pub from: String,

    /// Requested status.
    #[arg(long)]
    pub to: String,

    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Exit non-zero when the transition is denied.
    #[arg(long)]
    pub exit_code: bool,
}

#[derive(Clone, Debug, Args)]
pub struct NextArgs {
    /// Current status.
    #[arg(long)]
    pub from: String,

    #[command(flatten)]
    pub identity: IdentityArgs,
}

#[derive(Clone, Debug, Args)]
pub struct TimelineArgs {
    /// Purchase order JSON file (`-` for stdin).
    #[arg(long, value_name = "FILE")]
    pub po: PathBuf,

    /// Validate the record against its JSON Schema before parsing.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Debug, Args)]
pub struct InspectArgs {
    /// Purchase order JSON file (`-` for stdin).
    #[arg(long, value_name = "FILE")]
    pub po: PathBuf,

    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Validate the record against its JSON Schema before parsing.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    /// JSON array of audit log rows (`-` for stdin).
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Only rows for this purchase order.
    #[arg(long)]
    pub po_id: Option<String>,

    /// Only rows with this action, e.g. STATUS_CHANGE.
    #[arg(long)]
    pub action: Option<String>,

    /// Only rows by this user id.
    #[arg(long)]
    pub user: Option<String>,

    /// Max rows to return (overrides --limit).
    #[arg(long = "max")]
    pub max: Option<u32>,

    /// Fail on the first row that does not match the audit schema instead of
    /// skipping it.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name; omit to list all names.
    pub name: Option<String>,
}
