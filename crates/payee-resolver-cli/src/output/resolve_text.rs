use std::io;

use serde_json::Value;

use super::format::{format_confidence, key_value_rows};

pub fn render_resolve(data: &Value) -> io::Result<String> {
    let real_name = data
        .get("real_name")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("resolve payload is missing `real_name`"))?;
    let confidence = data
        .get("confidence")
        .and_then(Value::as_f64)
        .ok_or_else(|| io::Error::other("resolve payload is missing `confidence`"))?;

    let shown_name = if real_name.is_empty() {
        "(empty)".to_string()
    } else {
        real_name.to_string()
    };

    Ok(key_value_rows(
        &[
            ("Real name:", shown_name),
            ("Confidence:", format_confidence(confidence)),
        ],
        0,
    )
    .join("\n"))
}
