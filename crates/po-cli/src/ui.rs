//! Terminal preferences for `poadm` table output.
//!
//! Resolved once in `main` and read by the table renderer. JSON and raw
//! output ignore them.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

/// Narrower terminals get unwrapped tables.
const MIN_WRAP_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    /// Colour decision and status cells in tables.
    pub table_color: bool,
    /// Column budget from `COLUMNS`, if set and wide enough.
    pub term_width: Option<usize>,
}

/// What the process environment says about the terminal.
#[derive(Clone, Debug, Default)]
pub struct Terminal {
    pub stdout_is_tty: bool,
    pub no_color: bool,
    pub columns: Option<String>,
}

impl Terminal {
    fn detect() -> Self {
        Self {
            stdout_is_tty: std::io::stdout().is_terminal(),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            columns: std::env::var("COLUMNS").ok(),
        }
    }
}

impl UiPrefs {
    #[must_use]
    pub fn resolve(flags: &GlobalFlags, terminal: &Terminal) -> Self {
        let table = flags.format == OutputFormat::Table;
        let table_color = table
            && match flags.color {
                ColorMode::Always => true,
                ColorMode::Never => false,
                ColorMode::Auto => terminal.stdout_is_tty && !flags.quiet && !terminal.no_color,
            };

        let term_width = terminal
            .columns
            .as_deref()
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|width| *width >= MIN_WRAP_WIDTH);

        Self {
            table_color,
            term_width,
        }
    }
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let prefs = UiPrefs::resolve(flags, &Terminal::detect());
    tracing::debug!(?prefs, "terminal preferences");
    let _ = UI_PREFS.set(prefs);
}

/// Preferences set by [`init`], or plain output if it never ran.
#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}
