use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod report;
pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let options = table_options();

    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items, options)),
        Value::Object(map) => {
            let headers = ["champ", "valeur"];
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, options))
        }
        scalar => {
            let headers = ["valeur"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, options))
        }
    }
}

fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(aucune entrée)");
    }

    let all_objects = items.iter().all(Value::is_object);
    if !all_objects {
        let headers = ["valeur"];
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&headers, &rows, options);
    }

    let mut headers = Vec::<String>::new();
    for item in items {
        if let Some(map) = item.as_object() {
            for key in map.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }

    if headers.is_empty() {
        return String::from("(aucune colonne)");
    }

    headers.sort();

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
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
            .join(" | "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::{render, render_array_table, table, value_to_cell};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        score_total: u32,
    }

    const PLAIN: table::TableOptions = table::TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn json_render_is_valid_json() {
        let value = Example {
            id: "aud-1",
            score_total: 7,
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "aud-1");
        assert_eq!(parsed["score_total"], 7);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example {
            id: "aud-1",
            score_total: 7,
        };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_object_is_tabular() {
        let value = Example {
            id: "aud-1",
            score_total: 7,
        };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("champ")));
        assert!(out.contains("score_total"));
    }

    #[test]
    fn array_columns_are_sorted_and_missing_cells_dashed() {
        let items = vec![
            json!({"id": "aud-1", "title": "Dissertation", "statut": "Robuste"}),
            json!({"id": "qt-2", "title": "Autodiagnostic rapide"}),
        ];
        let out = render_array_table(&items, PLAIN);
        let lines: Vec<&str> = out.lines().collect();
        let header = lines[0];
        let id = header.find("id").expect("id column");
        let statut = header.find("statut").expect("statut column");
        let title = header.find("title").expect("title column");
        assert!(id < statut && statut < title, "{header}");
        assert_eq!(lines.len(), 4);
        assert!(lines[3].contains(" - "), "{}", lines[3]);
    }

    #[test]
    fn empty_array_has_placeholder() {
        assert_eq!(render_array_table(&[], PLAIN), "(aucune entrée)");
    }

    #[test]
    fn string_lists_are_joined() {
        assert_eq!(value_to_cell(&json!(["a", "b"])), "a | b");
        assert_eq!(value_to_cell(&json!([1, 2])), "[1,2]");
        assert_eq!(value_to_cell(&json!(null)), "-");
    }
}
