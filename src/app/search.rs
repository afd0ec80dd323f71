// ContentCal - app/search.rs
//
// Search pipeline: snapshot the source, validate rows at the boundary,
// run the record filter. Every path ends in a well-formed SearchResult.

use crate::app::source::RecordSource;
use crate::core::criteria::FilterCriteria;
use crate::core::filter;
use crate::core::model::{ContentRecord, SearchContext, SearchResult};
use crate::core::record::records_from_rows;
use crate::core::summary::{summarize, SearchSummary};
use crate::util::error::{RowError, SearchError};

/// Everything a caller may want to report about one search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The filter's result (possibly carrying an error).
    pub result: SearchResult,

    /// Breakdown of the full match set (not just the capped page).
    /// `None` when the search failed or no summary was requested.
    pub summary: Option<SearchSummary>,

    /// Rows in the snapshot, before boundary validation.
    pub rows_read: usize,

    /// Rows dropped at the boundary (malformed or blank).
    pub rows_skipped: usize,

    /// Itemised boundary errors (capped; blank rows are not itemised).
    pub row_errors: Vec<RowError>,
}

impl SearchOutcome {
    /// Outcome for a search that never reached the filter.
    pub fn failed(error: &SearchError, ctx: &SearchContext) -> Self {
        Self {
            result: SearchResult::failed(error, ctx.limit),
            summary: None,
            rows_read: 0,
            rows_skipped: 0,
            row_errors: Vec::new(),
        }
    }
}

/// Run one search against `source`.
///
/// `criteria` is `None` for a JSON `null`, which yields an error result
/// without reading the source. A source failure also yields an error result.
pub fn run_search(
    criteria: Option<&FilterCriteria>,
    source: &dyn RecordSource,
    ctx: &SearchContext,
    with_summary: bool,
) -> SearchOutcome {
    let Some(criteria) = criteria else {
        let e = SearchError::NoCriteria;
        tracing::warn!(error = %e, "Search rejected");
        return SearchOutcome::failed(&e, ctx);
    };

    tracing::info!(source = %source.describe(), today = %ctx.today, limit = ctx.limit, "Searching");

    let rows = match source.snapshot() {
        Ok(rows) => rows,
        Err(e) => {
            let e = SearchError::from(e);
            tracing::error!(error = %e, "Could not read record source");
            return SearchOutcome::failed(&e, ctx);
        }
    };

    let (records, row_errors) = records_from_rows(&rows);
    let rows_skipped = rows.len() - records.len();
    if rows_skipped > 0 {
        tracing::warn!(
            skipped = rows_skipped,
            itemised = row_errors.len(),
            "Skipped rows that failed validation"
        );
    }

    let result = filter::search(Some(criteria), &records, ctx);
    let summary = with_summary.then(|| full_match_summary(&records, criteria, ctx));

    tracing::info!(
        total_matches = result.total_matches,
        returned = result.results.len(),
        "Search finished"
    );

    SearchOutcome {
        result,
        summary,
        rows_read: rows.len(),
        rows_skipped,
        row_errors,
    }
}

fn full_match_summary(
    records: &[ContentRecord],
    criteria: &FilterCriteria,
    ctx: &SearchContext,
) -> SearchSummary {
    let indices = filter::matching_indices(records, criteria, ctx);
    summarize(indices.iter().map(|&i| &records[i]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::source::MemorySource;
    use crate::core::model::RawRow;
    use chrono::NaiveDate;

    fn ctx() -> SearchContext {
        SearchContext::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    fn source() -> MemorySource {
        MemorySource::new(vec![
            RawRow::new(["CONT-001", "2026-10-19", "43", "Planned", "Instagram", "Launch"]),
            RawRow::new(["CONT-002", "bad date", "43", "Planned", "Instagram", "Launch"]),
            RawRow::new(["CONT-003", "2026-10-20", "43", "Draft", "LinkedIn", "Recap"]),
            RawRow::new(["", "", ""]),
        ])
    }

    #[test]
    fn test_pipeline_skips_bad_rows() {
        let outcome = run_search(Some(&FilterCriteria::default()), &source(), &ctx(), false);
        assert_eq!(outcome.rows_read, 4);
        assert_eq!(outcome.rows_skipped, 2);
        assert_eq!(outcome.row_errors.len(), 1);
        assert_eq!(outcome.result.total_matches, 2);
        assert!(outcome.summary.is_none());
    }

    #[test]
    fn test_pipeline_summary_covers_full_match_set() {
        let table: Vec<RawRow> = (1..=60)
            .map(|i| RawRow::new([format!("CONT-{i:03}"), String::new(), String::new(), "Planned".to_string()]))
            .collect();
        let outcome = run_search(
            Some(&FilterCriteria::default()),
            &MemorySource::new(table),
            &ctx(),
            true,
        );
        assert_eq!(outcome.result.results.len(), 50);
        let summary = outcome.summary.unwrap();
        assert_eq!(summary.total, 60);
        assert_eq!(summary.by_status.get("Planned"), Some(&60));
    }

    #[test]
    fn test_source_failure_becomes_error_result() {
        let outcome = run_search(
            Some(&FilterCriteria::default()),
            &MemorySource::failing("spreadsheet unavailable"),
            &ctx(),
            true,
        );
        let r = &outcome.result;
        assert!(r.error.as_deref().unwrap().contains("spreadsheet unavailable"));
        assert!(r.results.is_empty());
        assert_eq!(r.total_matches, 0);
        assert_eq!(r.limit_applied, 50);
        assert!(outcome.summary.is_none());
    }

    #[test]
    fn test_null_criteria_does_not_read_source() {
        let outcome = run_search(None, &MemorySource::failing("should not be read"), &ctx(), false);
        let err = outcome.result.error.unwrap();
        assert!(err.contains("No search criteria"), "unexpected error: {err}");
    }
}
