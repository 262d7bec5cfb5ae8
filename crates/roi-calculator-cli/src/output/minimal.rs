use serde_json::Value;

use super::format_scalar;

/// Headline fields, most specific first.
const PRIORITY_KEYS: [&str; 4] = ["return_on_investment", "final_amount", "best_plan", "amount"];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

/// Pick the headline: a priority field of the result, then a priority
/// field of a nested object (`sip.final_amount`), then the first field.
fn headline(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let map = match result_obj {
        Value::Object(map) => map,
        Value::Array(items) => {
            return items
                .last()
                .map(|last| headline(&serde_json::json!({ "result": last })))
                .unwrap_or_default();
        }
        other => return format_scalar(other),
    };

    for key in PRIORITY_KEYS {
        if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
            return format_scalar(val);
        }
    }

    for (name, nested) in map {
        if let Value::Object(inner) = nested {
            for key in PRIORITY_KEYS {
                if let Some(val) = inner.get(key).filter(|v| !v.is_null()) {
                    return format!("{}.{}: {}", name, key, format_scalar(val));
                }
            }
        }
    }

    match map.iter().next() {
        Some((key, val)) => format!("{}: {}", key, format_scalar(val)),
        None => String::new(),
    }
}
