use std::fmt::Write as _;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_table(&serde_json::to_value(value)?)),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print `value` as JSON, but show `rows` when a table is requested.
///
/// List responses carry counts and context next to their rows; a table only
/// has room for the rows.
pub fn output_rows<T: Serialize, R: Serialize>(
    value: &T,
    rows: &R,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => output(rows, format),
        OutputFormat::Json | OutputFormat::Raw => output(value, format),
    }
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table(value: &Value) -> String {
    match value {
        Value::Array(items) => render_array_table(items),
        Value::Object(map) => {
            let mut entries = map.iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let rows = entries
                .into_iter()
                .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
                .collect::<Vec<_>>();
            table::render_rows(&["key", "value"], &rows, options())
        }
        scalar => table::render_rows(&["value"], &[vec![value_to_cell(scalar)]], options()),
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_rows(&["value"], &rows, options());
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    if headers.is_empty() {
        return String::from("(no columns)");
    }

    headers.sort();

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_rows(&header_refs, &rows, options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => object_to_cell(map),
        other @ Value::Array(_) => {
            serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>"))
        }
    }
}

/// Tagged values (`{"kind": "missing_capability", "required": "APPROVE_PO"}`)
/// read better as `missing_capability required=APPROVE_PO`.
fn object_to_cell(map: &Map<String, Value>) -> String {
    let Some(Value::String(kind)) = map.get("kind") else {
        return serde_json::to_string(map).unwrap_or_else(|_| String::from("<invalid-json>"));
    };
    let mut cell = kind.clone();
    for (key, value) in map.iter().filter(|(key, _)| key.as_str() != "kind") {
        let _ = write!(cell, " {key}={}", value_to_cell(value));
    }
    cell
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::{render, value_to_cell};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        value: u32,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "x");
        assert_eq!(parsed["value"], 7);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_object_is_key_value() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("id"));
    }

    #[test]
    fn table_render_for_rows_has_union_of_columns() {
        let rows = vec![
            json!({"to": "APPROVED", "decision": "allow"}),
            json!({"to": "CANCELLED", "required": "EDIT_PO"}),
        ];
        let out = render(&rows, OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().unwrap_or_default();
        assert!(header.contains("decision"));
        assert!(header.contains("required"));
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn empty_array_renders_placeholder() {
        let rows: Vec<serde_json::Value> = Vec::new();
        assert_eq!(render(&rows, OutputFormat::Table).unwrap(), "(no rows)");
    }

    #[test]
    fn tagged_objects_render_compactly() {
        let cell = value_to_cell(&json!({"kind": "missing_capability", "required": "APPROVE_PO"}));
        assert_eq!(cell, "missing_capability required=APPROVE_PO");
    }

    #[test]
    fn string_lists_join_with_commas() {
        assert_eq!(value_to_cell(&json!(["EDIT_PO", "VIEW_OWN_PO"])), "EDIT_PO, VIEW_OWN_PO");
    }
}
