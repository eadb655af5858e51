use anyhow::{Context, bail};
use po_core::audit_trail::{AuditDisplayEntry, AuditFilter, aggregate_raw};
use po_core::enums::AuditAction;
use po_core::responses::AuditTrailResponse;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::commands::shared::input::read_json;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output_rows;

/// Handle `poadm audit`.
pub fn handle(args: &AuditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Value::Array(rows) = read_json(&args.file)? else {
        bail!("{} must contain a JSON array of audit rows", args.file.display());
    };

    if args.strict {
        for (index, row) in rows.iter().enumerate() {
            ctx.schemas
                .validate("audit_log_entry", row)
                .with_context(|| format!("audit row {index} is malformed"))?;
        }
    }

    let outcome = aggregate_raw(rows);
    if outcome.skipped > 0 {
        tracing::info!(skipped = outcome.skipped, "skipped malformed audit rows");
    }

    let filter = AuditFilter {
        purchase_order_id: args.po_id.clone(),
        action: args.action.as_deref().map(normalize_action),
        user_id: args.user.clone(),
    };
    let entries = filter.apply(outcome.entries);
    let total = entries.len();

    let limit = effective_limit(args.max, flags.limit, ctx.config.general.default_limit);
    let shown = usize::try_from(limit).unwrap_or(usize::MAX);

    let response = AuditTrailResponse {
        entries: entries
            .iter()
            .take(shown)
            .map(AuditDisplayEntry::from)
            .collect(),
        total,
        skipped: outcome.skipped,
    };
    output_rows(&response, &response.entries, flags.format)
}

fn normalize_action(raw: &str) -> AuditAction {
    AuditAction::from(raw.trim().replace('-', "_").to_ascii_uppercase().as_str())
}
