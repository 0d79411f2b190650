use serde_json::Value;

/// Headline figures, most important first.
const PRIORITY_KEYS: [&str; 5] = [
    "monthly_payment",
    "net_income",
    "price",
    "total_paid",
    "roi_pct",
];

/// Print just the headline figure of the result.
///
/// For a single result that is the first priority key present; for a
/// comparison it is one `program: monthly_payment` line per program.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            for key in PRIORITY_KEYS {
                if let Some(val) = map.get(key) {
                    if !val.is_null() {
                        println!("{}", format_minimal(val));
                        return;
                    }
                }
            }
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, format_minimal(val));
            }
        }
        Value::Array(items) => {
            for item in items {
                let label = item
                    .get("program")
                    .or_else(|| item.get("key"))
                    .map(format_minimal)
                    .unwrap_or_default();
                let figure = item
                    .get("monthly_payment")
                    .or_else(|| item.get("rate"))
                    .map(format_minimal)
                    .unwrap_or_default();
                println!("{}: {}", label, figure);
            }
        }
        other => println!("{}", format_minimal(other)),
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
