use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `poadm schema`.
pub fn handle(args: &SchemaArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match args.name.as_deref() {
        Some(name) => {
            let schema = ctx.schemas.get(name).with_context(|| {
                format!(
                    "unknown schema '{name}'; available: {}",
                    ctx.schemas.list().join(", ")
                )
            })?;
            output(schema, flags.format)
        }
        None => output(&ctx.schemas.list(), flags.format),
    }
}
