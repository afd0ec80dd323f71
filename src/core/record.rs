// ContentCal - core/record.rs
//
// Boundary conversion from raw positional sheet rows to typed
// `ContentRecord`s. Anything malformed is rejected here, per row, so the
// filter only ever sees well-typed records.

use crate::core::date_range::parse_date;
use crate::core::model::{ContentRecord, RawRow};
use crate::util::constants;
use crate::util::error::RowError;
use crate::util::logging::preview;
use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

// Column indices into `constants::CALENDAR_COLUMNS`.
const COL_ID: usize = 0;
const COL_DATE: usize = 1;
const COL_WEEK: usize = 2;
const COL_STATUS: usize = 3;
const COL_CHANNEL: usize = 4;
const COL_CONTENT_IDEA: usize = 5;
const COL_PILLAR: usize = 6;
const COL_FORMAT: usize = 7;
const COL_ASSIGNED_TO: usize = 8;
const COL_NOTES: usize = 9;
const COL_CREATED: usize = 10;
const COL_MODIFIED: usize = 11;

fn content_id_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(constants::CONTENT_ID_PATTERN).ok())
        .as_ref()
}

impl ContentRecord {
    /// Validate one raw row. `row_number` is the 1-based data row index,
    /// used only for error reporting.
    pub fn from_row(row: &RawRow, row_number: usize) -> Result<Self, RowError> {
        if row.is_blank() {
            return Err(RowError::BlankRow { row: row_number });
        }

        let id = row.cell(COL_ID);
        if id.is_empty() {
            return Err(RowError::MissingId { row: row_number });
        }
        if let Some(re) = content_id_regex() {
            if !re.is_match(id) {
                tracing::debug!(row = row_number, id = %preview(id), "ID does not follow CONT-NNN convention");
            }
        }

        let raw_date = row.cell(COL_DATE);
        let date = if raw_date.is_empty() {
            None
        } else {
            Some(parse_date(raw_date).ok_or_else(|| RowError::InvalidDate {
                row: row_number,
                id: id.to_string(),
                raw: preview(raw_date).to_string(),
            })?)
        };

        let raw_week = row.cell(COL_WEEK);
        let week = if raw_week.is_empty() {
            None
        } else {
            Some(parse_week(raw_week).ok_or_else(|| RowError::InvalidWeek {
                row: row_number,
                id: id.to_string(),
                raw: preview(raw_week).to_string(),
            })?)
        };

        Ok(Self {
            id: id.to_string(),
            date,
            week,
            status: row.cell(COL_STATUS).to_string(),
            channel: row.cell(COL_CHANNEL).to_string(),
            content_idea: row.cell(COL_CONTENT_IDEA).to_string(),
            pillar: row.cell(COL_PILLAR).to_string(),
            format: row.cell(COL_FORMAT).to_string(),
            assigned_to: row.cell(COL_ASSIGNED_TO).to_string(),
            notes: row.cell(COL_NOTES).to_string(),
            created_at: parse_timestamp(row.cell(COL_CREATED)),
            updated_at: parse_timestamp(row.cell(COL_MODIFIED)),
        })
    }

    /// Cells in sheet column order, the inverse of `from_row` for export.
    pub fn to_cells(&self) -> [String; constants::CALENDAR_COLUMN_COUNT] {
        [
            self.id.clone(),
            self.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            self.week.map(|w| w.to_string()).unwrap_or_default(),
            self.status.clone(),
            self.channel.clone(),
            self.content_idea.clone(),
            self.pillar.clone(),
            self.format.clone(),
            self.assigned_to.clone(),
            self.notes.clone(),
            self.created_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            self.updated_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        ]
    }
}

/// Sheets export whole numbers as "42" or "42.0".
fn parse_week(raw: &str) -> Option<i64> {
    if let Ok(w) = raw.parse::<i64>() {
        return Some(w);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .map(|f| f as i64)
}

/// Bookkeeping timestamps are best-effort: unparseable means `None`.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Convert a snapshot, skipping rows that fail validation.
///
/// Returns records in row order plus the rejected rows' errors (capped at
/// `MAX_ROW_ERRORS`; the skipped count is `rows.len() - records.len()`).
pub fn records_from_rows(rows: &[RawRow]) -> (Vec<ContentRecord>, Vec<RowError>) {
    let mut records = Vec::with_capacity(rows.len());
    let mut errors = Vec::new();
    let mut suppressed = 0usize;

    for (idx, row) in rows.iter().enumerate() {
        match ContentRecord::from_row(row, idx + 1) {
            Ok(record) => records.push(record),
            Err(RowError::BlankRow { .. }) => {
                // Trailing blank rows are normal in sheet exports.
                tracing::trace!(row = idx + 1, "Skipping blank row");
            }
            Err(e) => {
                tracing::debug!(error = %e, "Skipping malformed row");
                if errors.len() < constants::MAX_ROW_ERRORS {
                    errors.push(e);
                } else {
                    suppressed += 1;
                }
            }
        }
    }

    if suppressed > 0 {
        tracing::warn!(
            suppressed,
            max = constants::MAX_ROW_ERRORS,
            "Row error limit reached; further row errors not itemised"
        );
    }

    (records, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(cells: &[&str]) -> RawRow {
        RawRow::new(cells.iter().copied())
    }

    #[test]
    fn test_full_row_converts() {
        let r = row(&[
            "CONT-001",
            "2026-10-19",
            "43",
            "Planned",
            "Instagram",
            "Launch Campaign teaser",
            "Product",
            "Reel",
            "Sam",
            "Needs final copy",
            "2026-10-01T09:00:00Z",
            "2026-10-02 10:30:00",
        ]);
        let rec = ContentRecord::from_row(&r, 1).unwrap();
        assert_eq!(rec.id, "CONT-001");
        assert_eq!(rec.date, NaiveDate::from_ymd_opt(2026, 10, 19));
        assert_eq!(rec.week, Some(43));
        assert_eq!(rec.assigned_to, "Sam");
        assert!(rec.created_at.is_some());
        assert!(rec.updated_at.is_some());
    }

    #[test]
    fn test_ragged_row_fills_empty_fields() {
        let rec = ContentRecord::from_row(&row(&["CONT-002", "", "", "Idea"]), 2).unwrap();
        assert_eq!(rec.date, None);
        assert_eq!(rec.week, None);
        assert_eq!(rec.status, "Idea");
        assert_eq!(rec.notes, "");
        assert_eq!(rec.created_at, None);
    }

    #[test]
    fn test_week_accepts_sheet_float() {
        let rec = ContentRecord::from_row(&row(&["CONT-003", "", "42.0"]), 1).unwrap();
        assert_eq!(rec.week, Some(42));
    }

    #[test]
    fn test_invalid_cells_rejected() {
        assert_eq!(
            ContentRecord::from_row(&row(&["", "2026-10-19"]), 4),
            Err(RowError::MissingId { row: 4 })
        );
        assert!(matches!(
            ContentRecord::from_row(&row(&["CONT-004", "soon"]), 5),
            Err(RowError::InvalidDate { row: 5, .. })
        ));
        assert!(matches!(
            ContentRecord::from_row(&row(&["CONT-004", "", "week 3"]), 6),
            Err(RowError::InvalidWeek { row: 6, .. })
        ));
    }

    #[test]
    fn test_unparseable_timestamp_is_dropped_not_rejected() {
        let mut cells = vec![""; 12];
        cells[0] = "CONT-005";
        cells[10] = "yesterday";
        let rec = ContentRecord::from_row(&row(&cells), 1).unwrap();
        assert_eq!(rec.created_at, None);
    }

    #[test]
    fn test_records_from_rows_skips_bad_rows_in_order() {
        let rows = vec![
            row(&["CONT-001", "2026-10-19"]),
            row(&["CONT-002", "not a date"]),
            row(&["", "", ""]),
            row(&["CONT-003"]),
        ];
        let (records, errors) = records_from_rows(&rows);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["CONT-001", "CONT-003"]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].row(), 2);
    }

    #[test]
    fn test_to_cells_matches_column_layout() {
        let rec = ContentRecord {
            id: "CONT-010".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 19),
            week: Some(43),
            status: "Planned".to_string(),
            ..Default::default()
        };
        let cells = rec.to_cells();
        assert_eq!(cells[0], "CONT-010");
        assert_eq!(cells[1], "2026-10-19");
        assert_eq!(cells[2], "43");
        assert_eq!(cells[3], "Planned");
        assert_eq!(cells[11], "");
        let back = ContentRecord::from_row(&RawRow::new(cells), 1).unwrap();
        assert_eq!(back, rec);
    }
}
