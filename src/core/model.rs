// ContentCal - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use crate::util::error::SearchError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

// =============================================================================
// Content Record (validated row of the calendar sheet)
// =============================================================================

/// One planned piece of content, i.e. one row of the calendar sheet.
///
/// Built from a `RawRow` by `ContentRecord::from_row` (see `core::record`);
/// rows that fail validation never become records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// Content ID, conventionally `CONT-NNN`. Unique by convention only.
    pub id: String,

    /// Planned publish date. `None` when the cell was empty.
    pub date: Option<NaiveDate>,

    /// Week number as entered in the sheet.
    pub week: Option<i64>,

    /// Workflow status (e.g. "Planned", "Schedule", "Published").
    pub status: String,

    /// Publishing channel (e.g. "Instagram").
    pub channel: String,

    /// Free-text description of the post.
    pub content_idea: String,

    /// Content pillar / theme.
    pub pillar: String,

    /// Post format (e.g. "Reel", "Carousel").
    pub format: String,

    /// Person responsible.
    pub assigned_to: String,

    /// Free-text notes.
    pub notes: String,

    /// Row creation time, if recorded.
    pub created_at: Option<DateTime<Utc>>,

    /// Last modification time, if recorded.
    pub updated_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Raw Row (untyped snapshot cells)
// =============================================================================

/// Cells of one sheet row, in column order, exactly as the source produced
/// them. Column layout is `constants::CALENDAR_COLUMNS`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Trimmed cell at `index`, or "" for a short (ragged) row.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(|c| c.trim()).unwrap_or("")
    }

    /// True if every cell is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

// =============================================================================
// Search Context (request-scoped inputs)
// =============================================================================

/// Everything a search needs besides criteria and table.
///
/// Passed explicitly so the filter has no ambient clock or global settings:
/// same context, same inputs, same output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchContext {
    /// "Today" for resolving relative date ranges.
    pub today: NaiveDate,

    /// Maximum number of records returned.
    pub limit: usize,
}

impl SearchContext {
    /// Context for a fixed `today` with the default result limit.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            limit: constants::DEFAULT_RESULT_LIMIT,
        }
    }

    /// Context for the local calendar date right now.
    pub fn from_clock() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    /// Override the limit, clamped to the allowed range.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(constants::MIN_RESULT_LIMIT, constants::MAX_RESULT_LIMIT);
        self
    }
}

// =============================================================================
// Search Result
// =============================================================================

/// Outcome of one search call.
///
/// Invariants: `results.len() <= limit_applied`,
/// `total_matches >= results.len()`, and when `error` is set `results` is
/// empty and `total_matches` is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// First `limit_applied` matches, in table order.
    pub results: Vec<ContentRecord>,

    /// Number of matching records before the cap.
    pub total_matches: usize,

    /// Cap that was applied to `results`.
    pub limit_applied: usize,

    /// Set when the search could not run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResult {
    /// Well-formed empty result carrying an error message.
    pub fn failed(error: &SearchError, limit: usize) -> Self {
        Self {
            results: Vec::new(),
            total_matches: 0,
            limit_applied: limit,
            error: Some(error.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// True when the cap hid some matches.
    pub fn is_truncated(&self) -> bool {
        self.total_matches > self.results.len()
    }
}
