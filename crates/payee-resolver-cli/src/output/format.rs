#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub width: usize,
    /// Longest value shown before it is cut and marked with `..`.
    pub max_chars: Option<usize>,
}

const COLUMN_SEPARATOR: &str = " | ";
const TRUNCATION_MARKER: &str = "..";

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Fixed-width, pipe-separated table with a dashed rule under the header.
pub fn render_fixed_table(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let rule_width = columns.iter().map(|column| column.width).sum::<usize>()
        + COLUMN_SEPARATOR.len() * columns.len().saturating_sub(1);

    let mut output = vec![format_row(columns, &header), "-".repeat(rule_width)];
    for row in rows {
        let cells = columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let value = row.get(index).map(String::as_str).unwrap_or("");
                match column.max_chars {
                    Some(limit) => truncate(value, limit),
                    None => value.to_string(),
                }
            })
            .collect::<Vec<String>>();
        output.push(format_row(columns, &cells));
    }

    output
}

/// Keeps the first `limit` characters and appends `..` when `value` is
/// longer than `limit`.
pub fn truncate(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let mut shortened = value.chars().take(limit).collect::<String>();
    shortened.push_str(TRUNCATION_MARKER);
    shortened
}

pub fn format_confidence(value: f64) -> String {
    format!("{value:.2}")
}

fn format_row(columns: &[Column<'_>], cells: &[String]) -> String {
    let pieces = columns
        .iter()
        .zip(cells.iter())
        .map(|(column, cell)| {
            let width = column.width;
            format!("{cell:<width$}")
        })
        .collect::<Vec<String>>();
    pieces.join(COLUMN_SEPARATOR).trim_end().to_string()
}
