use std::io;

use serde_json::Value;

use super::format::{Column, format_confidence, key_value_rows, render_fixed_table};

const BATCH_COLUMNS: [Column<'static>; 3] = [
    Column {
        name: "ORIGINAL PAYEE",
        width: 50,
        max_chars: Some(47),
    },
    Column {
        name: "RESOLVED NAME",
        width: 30,
        max_chars: Some(27),
    },
    Column {
        name: "CONFIDENCE",
        width: 10,
        max_chars: None,
    },
];

pub fn render_batch(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("batch payload is missing `rows`"))?;

    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                text_field(row, "original_payee"),
                text_field(row, "real_name"),
                row.get("confidence")
                    .and_then(Value::as_f64)
                    .map(format_confidence)
                    .unwrap_or_default(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = render_fixed_table(&BATCH_COLUMNS, &table_rows);
    lines.push(String::new());

    let summary = data.get("summary").cloned().unwrap_or(Value::Null);
    let mut entries = vec![
        ("Payee column:", text_field(data, "payee_column")),
        ("Rows read:", count_field(&summary, "rows_read")),
        ("Rows resolved:", count_field(&summary, "rows_resolved")),
        ("Rows skipped:", count_field(&summary, "rows_skipped")),
    ];
    let stage_counts = stage_breakdown(&summary);
    if !stage_counts.is_empty() {
        entries.push(("By stage:", stage_counts));
    }
    lines.extend(key_value_rows(&entries, 0));

    lines.push(String::new());
    lines.push(format!(
        "Results saved to {}",
        text_field(data, "output_path")
    ));

    Ok(lines.join("\n"))
}

fn stage_breakdown(summary: &Value) -> String {
    let Some(stages) = summary.get("stages").and_then(Value::as_object) else {
        return String::new();
    };
    stages
        .iter()
        .map(|(stage, count)| format!("{stage} {}", count.as_u64().unwrap_or(0)))
        .collect::<Vec<String>>()
        .join(", ")
}

fn text_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn count_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_u64)
        .unwrap_or(0)
        .to_string()
}
