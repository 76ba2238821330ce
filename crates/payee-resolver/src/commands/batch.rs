use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::warn;
use serde::Serialize;

use crate::commands::common::build_resolver;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{BatchData, BatchRow, BatchSummary};
use crate::resolution::Resolver;
use crate::{ResolverError, ResolverResult};

pub const DEFAULT_OUTPUT_PATH: &str = "resolved_payees.csv";
const OUTPUT_HEADERS: [&str; 3] = ["original_payee", "real_name", "confidence"];
const MISSING_MARKERS: [&str; 11] = [
    "", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A", "n/a", "<NA>",
];

#[derive(Debug, Clone)]
pub struct BatchOptions<'a> {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub corpus_override: Option<&'a Path>,
}

#[derive(Debug, Serialize)]
struct OutputRecord<'a> {
    original_payee: &'a str,
    real_name: &'a str,
    confidence: f64,
}

pub fn run(input: &Path, output: Option<&Path>) -> ResolverResult<SuccessEnvelope> {
    run_with_options(BatchOptions {
        input: input.to_path_buf(),
        output: output.map(Path::to_path_buf),
        corpus_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: BatchOptions<'_>) -> ResolverResult<SuccessEnvelope> {
    let loaded = build_resolver(options.corpus_override)?;
    let output = options
        .output
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));
    let data = resolve_file(&loaded.resolver, &options.input, &output)?;
    success("batch", data)
}

/// Resolves every payee cell of `input` and writes the results to `output`.
pub fn resolve_file(resolver: &Resolver, input: &Path, output: &Path) -> ResolverResult<BatchData> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(input)
        .map_err(|error| open_error(input, &error))?;

    let headers = reader
        .headers()
        .map_err(|error| ResolverError::batch_csv_malformed(input, &error.to_string()))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(ResolverError::batch_csv_malformed(
            input,
            "the header row is missing",
        ));
    }

    let column = payee_column(&headers);
    let mut rows = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_skipped = 0usize;
    let mut stages: BTreeMap<String, usize> = BTreeMap::new();

    for record in reader.records() {
        let record =
            record.map_err(|error| ResolverError::batch_csv_malformed(input, &error.to_string()))?;
        rows_read += 1;

        let Some(payee) = record.get(column).filter(|value| !is_missing(value)) else {
            rows_skipped += 1;
            continue;
        };

        let resolution = resolver.resolve(payee);
        *stages
            .entry(resolution.stage.as_str().to_string())
            .or_insert(0) += 1;
        rows.push(BatchRow {
            original_payee: payee.to_string(),
            real_name: resolution.name,
            confidence: resolution.confidence,
            stage: resolution.stage.as_str().to_string(),
        });
    }

    if rows_skipped > 0 {
        warn!(
            "skipped {rows_skipped} of {rows_read} batch rows with a missing `{}` value",
            headers[column]
        );
    }

    write_output(output, &rows)?;

    Ok(BatchData {
        input_path: input.display().to_string(),
        output_path: output.display().to_string(),
        payee_column: headers[column].clone(),
        summary: BatchSummary {
            rows_read,
            rows_resolved: rows.len(),
            rows_skipped,
            stages,
        },
        rows,
    })
}

/// Header `"0"` first, then `payee` in any ASCII case, else the first column.
fn payee_column(headers: &[String]) -> usize {
    headers
        .iter()
        .position(|header| header == "0")
        .or_else(|| {
            headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case("payee"))
        })
        .unwrap_or(0)
}

fn is_missing(value: &str) -> bool {
    MISSING_MARKERS.contains(&value)
}

fn write_output(output: &Path, rows: &[BatchRow]) -> ResolverResult<()> {
    let map_error = |error: csv::Error| ResolverError::batch_output_failed(output, &error.to_string());

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output)
        .map_err(map_error)?;
    writer.write_record(OUTPUT_HEADERS).map_err(map_error)?;
    for row in rows {
        writer
            .serialize(OutputRecord {
                original_payee: &row.original_payee,
                real_name: &row.real_name,
                confidence: row.confidence,
            })
            .map_err(map_error)?;
    }
    writer
        .flush()
        .map_err(|error| ResolverError::batch_output_failed(output, &error.to_string()))
}

fn open_error(input: &Path, error: &csv::Error) -> ResolverError {
    match error.kind() {
        csv::ErrorKind::Io(_) => ResolverError::batch_input_unreadable(input, &error.to_string()),
        _ => ResolverError::batch_csv_malformed(input, &error.to_string()),
    }
}
