use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::format_scalar;

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    print!("{}", render(value));
}

fn render(value: &Value) -> String {
    let mut out = String::new();
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => render_envelope(&mut out, result, map),
            None => push_block(&mut out, None, field_table(map)),
        },
        Value::Array(arr) => push_block(&mut out, None, array_table(arr)),
        other => {
            out.push_str(&format_value(other));
            out.push('\n');
        }
    }
    out
}

fn render_envelope(out: &mut String, result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => {
            push_block(out, None, field_table(res_map));
            // Nested sections (the SIP outcome, the plan list, the trajectory)
            for (key, val) in res_map {
                match val {
                    Value::Object(inner) => push_block(out, Some(key.as_str()), field_table(inner)),
                    Value::Array(items) => push_block(out, Some(key.as_str()), array_table(items)),
                    _ => {}
                }
            }
        }
        Value::Array(items) => push_block(out, None, array_table(items)),
        _ => push_block(out, None, field_table(envelope)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            out.push_str("\nWarnings:\n");
            for w in warnings.iter().filter_map(Value::as_str) {
                out.push_str(&format!("  - {}\n", w));
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        out.push_str(&format!("\nMethodology: {}\n", meth));
    }
}

fn push_block(out: &mut String, title: Option<&str>, table: Option<Table>) {
    let Some(table) = table else {
        return;
    };
    if !out.is_empty() {
        out.push('\n');
    }
    if let Some(title) = title {
        out.push_str(title);
        out.push_str(":\n");
    }
    out.push_str(&table.to_string());
    out.push('\n');
}

/// Two-column table of the scalar fields of an object.
fn field_table(map: &Map<String, Value>) -> Option<Table> {
    let scalars: Vec<(&String, &Value)> = map
        .iter()
        .filter(|(_, v)| !v.is_object() && !v.is_array())
        .collect();
    if scalars.is_empty() {
        return None;
    }
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in scalars {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    Some(Table::from(builder))
}

/// One row per element, headers taken from the first object.
fn array_table(arr: &[Value]) -> Option<Table> {
    if arr.is_empty() {
        return None;
    }

    let mut builder = Builder::default();
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        builder.push_record(headers.clone());
        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
    } else {
        builder.push_record(["Value"]);
        for item in arr {
            builder.push_record([format_value(item)]);
        }
    }
    Some(Table::from(builder))
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        other => format_scalar(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plan_envelope_renders_fields_and_methodology() {
        let v = json!({
            "result": {"label": "SIP", "final_amount": "12809.33"},
            "methodology": "Monthly SIP",
            "warnings": ["capped"]
        });
        let text = render(&v);
        assert!(text.contains("final_amount"));
        assert!(text.contains("12809.33"));
        assert!(text.contains("Warnings:\n  - capped"));
        assert!(text.contains("Methodology: Monthly SIP"));
    }

    #[test]
    fn test_report_sections_get_their_own_tables() {
        let v = json!({
            "result": {
                "best_plan": "nps",
                "plans": [{"label": "NPS", "return_on_investment": "210.00"}],
                "sip": {"final_amount": "1"},
                "trajectory": [{"year": 0, "amount": "0.00"}]
            },
            "warnings": []
        });
        let text = render(&v);
        assert!(text.contains("plans:\n"));
        assert!(text.contains("sip:\n"));
        assert!(text.contains("trajectory:\n"));
        assert!(!text.contains("Warnings"));
    }

    #[test]
    fn test_array_result() {
        let v = json!({"result": [{"year": 0, "amount": "0.00"}, {"year": 1, "amount": "12.06"}]});
        let text = render(&v);
        assert!(text.contains("year"));
        assert!(text.contains("12.06"));
    }
}
