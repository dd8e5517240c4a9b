//! CSV batch valuation.
//!
//! Every data row is priced with the same pipeline as `POST /predict`. The
//! output keeps the input columns and appends `predicted_price` and `error`;
//! exactly one of the two is filled per row.

use crate::application::valuation_service::{PredictionResponse, ValuationService};
use crate::domain::errors::ErrorKind;
use anyhow::{Context, Result};
use csv::StringRecord;
use serde_json::{Map, Value};
use std::io::{Read, Write};
use tracing::warn;

pub const PRICE_COLUMN: &str = "predicted_price";
pub const ERROR_COLUMN: &str = "error";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub priced: usize,
    pub failed: usize,
}

/// Prices every row of `input` and writes the result to `output`.
///
/// Only I/O failures and an unreadable header abort the run. Rows with a
/// different cell count than the header are padded or cut to its width.
pub fn value_csv<R: Read, W: Write>(
    service: &ValuationService,
    input: R,
    output: W,
) -> Result<BatchSummary> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers = reader.headers().context("Failed to read CSV header")?.clone();
    let width = headers.len();

    let mut writer = csv::Writer::from_writer(output);
    let mut out_headers = headers.clone();
    out_headers.push_field(PRICE_COLUMN);
    out_headers.push_field(ERROR_COLUMN);
    writer.write_record(&out_headers)?;

    let mut summary = BatchSummary::default();
    for (index, record) in reader.records().enumerate() {
        let line = index + 2;
        let (mut row, response) = match record {
            Ok(record) => {
                let response = service.handle(row_to_request(&headers, &record));
                (fit_to_width(&record, width), response)
            }
            Err(err) if err.is_io_error() => {
                let context = format!("Failed to read CSV row {}", line);
                return Err(anyhow::Error::from(err).context(context));
            }
            Err(err) => (
                fit_to_width(&StringRecord::new(), width),
                PredictionResponse::Failure {
                    error: format!("Malformed CSV row: {}", err),
                    kind: ErrorKind::Validation,
                },
            ),
        };

        match response {
            PredictionResponse::Price { predicted_price } => {
                summary.priced += 1;
                row.push_field(&format!("{:.2}", predicted_price));
                row.push_field("");
            }
            PredictionResponse::Failure { error, .. } => {
                summary.failed += 1;
                warn!("Row {}: {}", line, error);
                row.push_field("");
                row.push_field(&error);
            }
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;

    Ok(summary)
}

/// Empty cells are treated as absent fields. Cells beyond the header are ignored.
pub fn row_to_request(headers: &StringRecord, record: &StringRecord) -> Value {
    let fields: Map<String, Value> = headers
        .iter()
        .zip(record.iter())
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(name, value)| (name.trim().to_string(), Value::String(value.to_string())))
        .collect();
    Value::Object(fields)
}

fn fit_to_width(record: &StringRecord, width: usize) -> StringRecord {
    let mut row: StringRecord = record.iter().take(width).collect();
    while row.len() < width {
        row.push_field("");
    }
    row
}
