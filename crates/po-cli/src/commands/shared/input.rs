use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::context::AppContext;

/// Read a JSON document from `path`, or from stdin when `path` is `-`.
pub fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Read and parse a record, validating it against `schema` first when
/// `strict` is set.
pub fn read_record<T: DeserializeOwned>(
    path: &Path,
    schema: &str,
    strict: bool,
    ctx: &AppContext,
) -> anyhow::Result<T> {
    let value = read_json(path)?;
    if strict {
        ctx.schemas
            .parse(schema, value)
            .with_context(|| format!("{} does not match the {schema} schema", path.display()))
    } else {
        serde_json::from_value(value)
            .with_context(|| format!("{} is not a valid {schema}", path.display()))
    }
}
