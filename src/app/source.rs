// ContentCal - app/source.rs
//
// Record sources: where a table snapshot comes from.
// Each `snapshot()` call is a fresh, complete read; sources never hand out
// incremental updates.

use crate::core::model::RawRow;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::SourceError;
use std::path::PathBuf;

/// Something that can produce a read-only snapshot of calendar rows.
pub trait RecordSource {
    /// Read every data row (header excluded), in sheet order.
    ///
    /// An `Err` means the table as a whole could not be read; per-row
    /// problems are left for boundary validation.
    fn snapshot(&self) -> Result<Vec<RawRow>, SourceError>;

    /// Human-readable description for logs.
    fn describe(&self) -> String;
}

// =============================================================================
// CSV file source
// =============================================================================

/// A CSV export of the calendar sheet. The first record is the header.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    max_file_size: u64,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_file_size: constants::DEFAULT_MAX_SOURCE_FILE_SIZE,
        }
    }

    /// Override the size cap (normally from `[source] max_file_size_bytes`).
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}

impl RecordSource for CsvFileSource {
    fn snapshot(&self) -> Result<Vec<RawRow>, SourceError> {
        let path = &self.path;
        if !path.exists() {
            return Err(SourceError::NotFound { path: path.clone() });
        }

        let size = fs::file_size(path).map_err(|e| SourceError::Io {
            path: path.clone(),
            source: e,
        })?;
        if size > self.max_file_size {
            return Err(SourceError::FileTooLarge {
                path: path.clone(),
                size,
                max_size: self.max_file_size,
            });
        }

        let content = fs::read_file_lossy(path).map_err(|e| SourceError::Io {
            path: path.clone(),
            source: e,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| SourceError::Csv {
                path: path.clone(),
                source: e,
            })?
            .clone();
        if headers.len() < constants::CALENDAR_COLUMN_COUNT {
            tracing::debug!(
                path = %path.display(),
                columns = headers.len(),
                expected = constants::CALENDAR_COLUMN_COUNT,
                "Header has fewer columns than the calendar layout; missing cells read as empty"
            );
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| SourceError::Csv {
                path: path.clone(),
                source: e,
            })?;
            rows.push(RawRow::new(record.iter()));
        }

        tracing::debug!(path = %path.display(), rows = rows.len(), bytes = size, "CSV snapshot read");
        Ok(rows)
    }

    fn describe(&self) -> String {
        format!("CSV file '{}'", self.path.display())
    }
}

// =============================================================================
// In-memory source
// =============================================================================

/// Rows held in memory. Can be set to fail, to exercise the
/// structural-failure path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<RawRow>,
    failure: Option<String>,
}

impl MemorySource {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self {
            rows,
            failure: None,
        }
    }

    /// A source whose every snapshot fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            failure: Some(reason.into()),
        }
    }
}

impl RecordSource for MemorySource {
    fn snapshot(&self) -> Result<Vec<RawRow>, SourceError> {
        match self.failure {
            Some(ref reason) => Err(SourceError::Unavailable {
                reason: reason.clone(),
            }),
            None => Ok(self.rows.clone()),
        }
    }

    fn describe(&self) -> String {
        format!("in-memory table ({} rows)", self.rows.len())
    }
}
