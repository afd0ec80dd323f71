// ContentCal - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Strings only appear at the outer edge (SearchResult.error, CLI stderr);
// everything inside the crate propagates one of these enums.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all ContentCal operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum ContentCalError {
    /// Search could not run.
    Search(SearchError),

    /// The record source could not produce a snapshot.
    Source(SourceError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for ContentCalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search(e) => write!(f, "Search error: {e}"),
            Self::Source(e) => write!(f, "Source error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ContentCalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Search(e) => Some(e),
            Self::Source(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Search errors
// ---------------------------------------------------------------------------

/// Errors that stop a search before the scan starts.
///
/// These never escape `core::filter::search`; they are folded into
/// `SearchResult::error` so callers always receive a well-formed result.
#[derive(Debug)]
pub enum SearchError {
    /// Criteria were `null`.
    NoCriteria,

    /// Criteria were present but not an object (array, number, ...).
    InvalidCriteria { found: &'static str },

    /// Criteria text is not valid JSON.
    CriteriaSyntax { source: serde_json::Error },

    /// The backing table could not be read.
    Source(SourceError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCriteria => write!(f, "No search criteria provided"),
            Self::InvalidCriteria { found } => {
                write!(f, "Search criteria must be an object, got {found}")
            }
            Self::CriteriaSyntax { source } => write!(f, "Search criteria is not valid JSON: {source}"),
            Self::Source(e) => write!(f, "Could not read content table: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CriteriaSyntax { source } => Some(source),
            Self::Source(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SourceError> for SearchError {
    fn from(e: SourceError) -> Self {
        Self::Source(e)
    }
}

impl From<SearchError> for ContentCalError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

// ---------------------------------------------------------------------------
// Source errors
// ---------------------------------------------------------------------------

/// Structural failures reading the record store.
#[derive(Debug)]
pub enum SourceError {
    /// The source file does not exist.
    NotFound { path: PathBuf },

    /// The source file exceeds the configured size cap.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// The CSV could not be read.
    Csv { path: PathBuf, source: csv::Error },

    /// I/O error reading the source.
    Io { path: PathBuf, source: io::Error },

    /// A non-file source reported itself unavailable.
    Unavailable { reason: String },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "Content table '{}' does not exist", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Content table '{}' is {size} bytes, exceeds maximum of {max_size} bytes. \
                 Increase [source] max_file_size_bytes in config.",
                path.display()
            ),
            Self::Csv { path, source } => {
                write!(f, "CSV error in '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "I/O error reading '{}': {source}", path.display())
            }
            Self::Unavailable { reason } => write!(f, "Record source unavailable: {reason}"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<SourceError> for ContentCalError {
    fn from(e: SourceError) -> Self {
        Self::Source(e)
    }
}

// ---------------------------------------------------------------------------
// Row errors
// ---------------------------------------------------------------------------

/// A raw row that failed validation at the snapshot boundary.
/// `row` is 1-based and counts data rows only (the header is not row 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// Every cell in the row is empty.
    BlankRow { row: usize },

    /// The ID cell is missing or empty.
    MissingId { row: usize },

    /// The date cell holds something that is not a date.
    InvalidDate { row: usize, id: String, raw: String },

    /// The week cell holds something that is not an integer.
    InvalidWeek { row: usize, id: String, raw: String },
}

impl RowError {
    /// Data row number the error refers to.
    pub fn row(&self) -> usize {
        match self {
            Self::BlankRow { row }
            | Self::MissingId { row }
            | Self::InvalidDate { row, .. }
            | Self::InvalidWeek { row, .. } => *row,
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankRow { row } => write!(f, "row {row}: blank row"),
            Self::MissingId { row } => write!(f, "row {row}: missing ID"),
            Self::InvalidDate { row, id, raw } => {
                write!(f, "row {row} ({id}): cannot parse date '{raw}'")
            }
            Self::InvalidWeek { row, id, raw } => {
                write!(f, "row {row} ({id}): week '{raw}' is not an integer")
            }
        }
    }
}

impl std::error::Error for RowError {}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error flushing the export.
    Io { source: io::Error },

    /// CSV serialisation error.
    Csv { source: csv::Error },

    /// JSON serialisation error.
    Json { source: serde_json::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { source } => write!(f, "Export I/O error: {source}"),
            Self::Csv { source } => write!(f, "CSV export error: {source}"),
            Self::Json { source } => write!(f, "JSON export error: {source}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source } => Some(source),
            Self::Csv { source } => Some(source),
            Self::Json { source } => Some(source),
        }
    }
}

impl From<ExportError> for ContentCalError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for ContentCalError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for ContentCal results.
pub type Result<T> = std::result::Result<T, ContentCalError>;
