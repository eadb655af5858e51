use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

/// Handle `poadm config`: JSON with `--format json|raw`, TOML otherwise.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match flags.format {
        OutputFormat::Table => {
            print!("{}", toml::to_string_pretty(&ctx.config)?);
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Raw => output(&ctx.config, flags.format),
    }
}
