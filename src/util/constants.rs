// ContentCal - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "ContentCal";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "ContentCal";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Search limits
// =============================================================================

/// Maximum number of records returned in a single `SearchResult`.
///
/// The true match count is always reported alongside, so callers can tell
/// "50 of 50" from "50 of 3000" and page on their side.
pub const DEFAULT_RESULT_LIMIT: usize = 50;

/// Minimum user-configurable result limit.
pub const MIN_RESULT_LIMIT: usize = 1;

/// Hard upper bound on the user-configurable result limit.
pub const MAX_RESULT_LIMIT: usize = 1_000;

/// Filter value meaning "no constraint" for the exact-match fields.
pub const FILTER_ALL: &str = "All";

/// Hour of day that record dates are pinned to before range comparison.
/// Noon keeps a date inside its own day regardless of DST shifts.
pub const RECORD_DATE_NORMALISED_HOUR: u32 = 12;

// =============================================================================
// Record source limits
// =============================================================================

/// Maximum size of a calendar CSV export in bytes.
pub const DEFAULT_MAX_SOURCE_FILE_SIZE: u64 = 32 * 1024 * 1024; // 32 MB

/// Minimum user-configurable source size cap.
pub const MIN_SOURCE_FILE_SIZE: u64 = 1024; // 1 KB

/// Hard upper bound on the source size cap.
pub const ABSOLUTE_MAX_SOURCE_FILE_SIZE: u64 = 512 * 1024 * 1024; // 512 MB

/// Maximum number of per-row conversion errors retained for reporting.
/// Rows beyond this are still skipped, just not itemised.
pub const MAX_ROW_ERRORS: usize = 1_000;

/// Number of columns in the calendar sheet layout.
pub const CALENDAR_COLUMN_COUNT: usize = 12;

/// Header labels of the calendar sheet, in column order.
pub const CALENDAR_COLUMNS: [&str; CALENDAR_COLUMN_COUNT] = [
    "ID",
    "Date",
    "Week",
    "Status",
    "Channel",
    "Content Idea",
    "Pillar",
    "Format",
    "Assigned To",
    "Notes",
    "Created",
    "Last Modified",
];

/// Pattern for the conventional content ID (`CONT-001`).
pub const CONTENT_ID_PATTERN: &str = r"^CONT-\d+$";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of a cell value included in debug output.
pub const DEBUG_MAX_CELL_PREVIEW: usize = 80;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
