//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default row limit for list output.
const fn default_limit() -> u32 {
    20
}

fn default_format() -> String {
    "table".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default row limit for `poadm audit` and other list output.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Output format used when `--format` is not given (json, table, raw).
    #[serde(default = "default_format")]
    pub default_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            default_format: default_format(),
        }
    }
}
