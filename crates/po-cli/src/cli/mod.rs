use std::path::PathBuf;

use clap::{Parser, ValueEnum};

pub mod global;
pub mod root_commands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `poadm` binary.
#[derive(Debug, Parser)]
#[command(
    name = "poadm",
    version,
    about = "Purchase order rules: capabilities, routes, transitions and audit trails"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw (defaults to `general.default_format`)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Max rows to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Colour table output
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub color: ColorMode,

    /// Extra config file, layered over the discovered ones
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    ///
    /// `default_format` applies when `--format` was not given; an
    /// unrecognised value falls back to table output.
    #[must_use]
    pub fn global_flags(&self, default_format: &str) -> GlobalFlags {
        let format = self.format.unwrap_or_else(|| {
            OutputFormat::from_str(default_format, true).unwrap_or(OutputFormat::Table)
        });
        GlobalFlags {
            format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color,
        }
    }
}
