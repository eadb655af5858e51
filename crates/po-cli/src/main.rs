use anyhow::Context;
use clap::Parser;
use po_config::PoConfig;

mod cli;
mod commands;
mod context;
mod output;
mod ui;

fn main() {
    if let Err(error) = run() {
        eprintln!("poadm error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = load_config(&cli)?;
    context::warn_misnamed_env();

    let flags = cli.global_flags(&config.general.default_format);
    ui::init(&flags);

    let mut ctx = context::AppContext::new(config);
    commands::dispatch::dispatch(&cli.command, &mut ctx, &flags)
}

fn load_config(cli: &cli::Cli) -> anyhow::Result<PoConfig> {
    match &cli.config {
        Some(path) => {
            dotenv();
            PoConfig::load_with_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))
        }
        None => PoConfig::load_with_dotenv().context("failed to load configuration"),
    }
}

fn dotenv() {
    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            tracing::warn!(%error, "ignoring unreadable .env file");
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("POADM_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
