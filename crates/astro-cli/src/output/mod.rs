use serde::Serialize;
use serde_json::Value;

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

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table(value: &Value) -> String {
    match value {
        Value::Array(items) => render_array(items),
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect::<Vec<_>>();
            table::render_rows(&["key", "value"], &rows, options())
        }
        scalar => table::render_rows(&["value"], &[vec![cell(scalar)]], options()),
    }
}

/// Arrays of records become one row per record, one column per key.
fn render_array(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }
    if !items.iter().all(Value::is_object) {
        let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
        return table::render_rows(&["value"], &rows, options());
    }

    let mut headers = Vec::<&str>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key.as_str());
            }
        }
    }

    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| String::from("-"), cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    table::render_rows(&headers, &rows, options())
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Point {
        source: &'static str,
        band: &'static str,
        magnitude: f64,
        magnitude_error: Option<f64>,
    }

    const POINTS: [Point; 2] = [
        Point {
            source: "TWA 27",
            band: "2MASS.J",
            magnitude: 13.0,
            magnitude_error: Some(0.03),
        },
        Point {
            source: "TWA 27",
            band: "2MASS.H",
            magnitude: 12.39,
            magnitude_error: None,
        },
    ];

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&POINTS, OutputFormat::Raw).expect("raw render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed[1]["band"], "2MASS.H");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_has_one_row_per_record() {
        let out = render(&POINTS, OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("source") && lines[0].contains("band"));
        assert!(lines[0].contains("magnitude_error"));
        assert!(lines[3].contains("2MASS.H"));
        assert!(lines[3].split_whitespace().any(|cell| cell == "-"));
    }

    #[test]
    fn empty_arrays_say_so() {
        let out = render(&Vec::<u32>::new(), OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }
}
