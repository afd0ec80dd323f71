// ContentCal - core/export.rs
//
// CSV and JSON export of search results.
// Core layer: writes to any Write trait object.

use crate::core::model::{ContentRecord, SearchResult};
use crate::core::summary::SearchSummary;
use crate::util::constants::CALENDAR_COLUMNS;
use crate::util::error::ExportError;
use serde::Serialize;
use std::io::Write;

/// Export records to CSV in the calendar sheet's column layout, so the
/// output can be pasted back into the sheet or re-read as a source.
pub fn export_csv<W: Write>(records: &[ContentRecord], writer: W) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(CALENDAR_COLUMNS)
        .map_err(|e| ExportError::Csv { source: e })?;

    let mut count = 0;
    for record in records {
        csv_writer
            .write_record(record.to_cells())
            .map_err(|e| ExportError::Csv { source: e })?;
        count += 1;
    }

    csv_writer
        .flush()
        .map_err(|e| ExportError::Io { source: e })?;

    Ok(count)
}

/// JSON document shape: the result, plus the summary when requested.
#[derive(Serialize)]
struct JsonDocument<'a> {
    #[serde(flatten)]
    result: &'a SearchResult,

    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a SearchSummary>,
}

/// Export a search result as pretty JSON (camelCase keys).
/// Returns the number of records written.
pub fn export_json<W: Write>(
    result: &SearchResult,
    summary: Option<&SearchSummary>,
    writer: W,
) -> Result<usize, ExportError> {
    let doc = JsonDocument { result, summary };
    serde_json::to_writer_pretty(writer, &doc).map_err(|e| ExportError::Json { source: e })?;
    Ok(result.results.len())
}
