// ContentCal - tests/e2e_search.rs
//
// End-to-end tests for the search pipeline.
//
// These tests exercise a real CSV export on disk, real boundary validation,
// real chrono date resolution and the record filter together -- no mocks.
// "Today" is pinned to Wednesday 2026-10-21 so relative ranges are stable.

use chrono::NaiveDate;
use contentcal::app::search::{run_search, SearchOutcome};
use contentcal::app::source::{CsvFileSource, RecordSource};
use contentcal::core::criteria::{CriteriaOverrides, FilterCriteria};
use contentcal::core::date_range::{DateRange, DateRangeKind};
use contentcal::core::export;
use contentcal::core::model::{SearchContext, SearchResult};
use contentcal::util::error::RowError;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to an on-disk fixture file.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn calendar() -> CsvFileSource {
    CsvFileSource::new(fixture("content_calendar.csv"))
}

fn ctx() -> SearchContext {
    SearchContext::new(NaiveDate::from_ymd_opt(2026, 10, 21).unwrap())
}

fn search(criteria: &FilterCriteria) -> SearchResult {
    run_search(Some(criteria), &calendar(), &ctx(), false).result
}

fn ids(result: &SearchResult) -> Vec<String> {
    result.results.iter().map(|r| r.id.clone()).collect()
}

fn range(kind: DateRangeKind) -> FilterCriteria {
    FilterCriteria {
        date_range: DateRange::named(kind),
        ..Default::default()
    }
}

// =============================================================================
// Snapshot and boundary
// =============================================================================

/// The fixture has 11 data rows: 8 valid, 2 malformed, 1 trailing blank.
#[test]
fn e2e_fixture_rows_validated_at_boundary() {
    let outcome = run_search(Some(&FilterCriteria::default()), &calendar(), &ctx(), false);

    assert_eq!(outcome.rows_read, 11);
    assert_eq!(outcome.rows_skipped, 3);
    assert_eq!(outcome.result.total_matches, 8);
    assert!(outcome.result.error.is_none());

    assert!(
        matches!(
            outcome.row_errors.as_slice(),
            [RowError::InvalidDate { row: 8, .. }, RowError::MissingId { row: 9 }]
        ),
        "unexpected row errors: {:?}",
        outcome.row_errors
    );
}

/// Empty criteria return every valid row in sheet order.
#[test]
fn e2e_empty_criteria_returns_table_order() {
    let r = search(&FilterCriteria::default());
    assert_eq!(
        ids(&r),
        vec![
            "CONT-001", "CONT-002", "CONT-003", "CONT-004", "CONT-005", "CONT-006", "CONT-007",
            "CONT-009"
        ]
    );
    assert_eq!(r.limit_applied, 50);
}

/// US-style dates and sheet timestamps survive the boundary.
#[test]
fn e2e_fields_parsed_from_csv() {
    let r = search(&FilterCriteria::default());
    let first = &r.results[0];
    assert_eq!(first.week, Some(43));
    assert_eq!(first.assigned_to, "Sam");
    assert!(first.created_at.is_some());
    assert!(first.updated_at.is_some());

    let spotlight = r.results.iter().find(|rec| rec.id == "CONT-005").unwrap();
    assert_eq!(spotlight.date, NaiveDate::from_ymd_opt(2026, 10, 14));
}

// =============================================================================
// Filters
// =============================================================================

#[test]
fn e2e_keyword_matches_idea_and_notes() {
    let launch = FilterCriteria {
        keyword: Some("LAUNCH".to_string()),
        ..Default::default()
    };
    assert_eq!(ids(&search(&launch)), vec!["CONT-001", "CONT-009"]);

    // "campaign" is in CONT-001's idea and CONT-003's notes.
    let campaign = FilterCriteria {
        keyword: Some("campaign".to_string()),
        ..Default::default()
    };
    assert_eq!(ids(&search(&campaign)), vec!["CONT-001", "CONT-003"]);
}

#[test]
fn e2e_status_and_channel_are_and_combined() {
    let c = FilterCriteria {
        status: Some("Planned".to_string()),
        channel: Some("Instagram".to_string()),
        ..Default::default()
    };
    assert_eq!(ids(&search(&c)), vec!["CONT-001", "CONT-003"]);
}

#[test]
fn e2e_assignee_and_pillar() {
    let c = FilterCriteria {
        assignee: Some("Sam".to_string()),
        ..Default::default()
    };
    assert_eq!(ids(&search(&c)), vec!["CONT-001", "CONT-003", "CONT-009"]);

    let c = FilterCriteria {
        pillar: Some("Product".to_string()),
        format: Some("Video".to_string()),
        ..Default::default()
    };
    assert_eq!(ids(&search(&c)), vec!["CONT-004"]);
}

#[test]
fn e2e_week_number() {
    let c = FilterCriteria {
        week_number: Some(42),
        ..Default::default()
    };
    assert_eq!(ids(&search(&c)), vec!["CONT-005"]);

    let c = FilterCriteria {
        week_number: Some(41),
        ..Default::default()
    };
    assert_eq!(search(&c).total_matches, 0);
}

#[test]
fn e2e_named_date_ranges() {
    assert_eq!(
        ids(&search(&range(DateRangeKind::ThisWeek))),
        vec!["CONT-001", "CONT-002", "CONT-003"]
    );
    assert_eq!(
        ids(&search(&range(DateRangeKind::Last7Days))),
        vec!["CONT-001", "CONT-002"]
    );
    assert_eq!(
        ids(&search(&range(DateRangeKind::Next7Days))),
        vec!["CONT-002", "CONT-003", "CONT-004"]
    );
    assert_eq!(
        ids(&search(&range(DateRangeKind::ThisMonth))),
        vec!["CONT-001", "CONT-002", "CONT-003", "CONT-004", "CONT-005"]
    );
    assert_eq!(ids(&search(&range(DateRangeKind::LastMonth))), vec!["CONT-006"]);
}

#[test]
fn e2e_custom_date_range() {
    let c = FilterCriteria {
        date_range: DateRange::custom("10/14/2026", "2026-10-19"),
        ..Default::default()
    };
    assert_eq!(ids(&search(&c)), vec!["CONT-001", "CONT-005"]);

    let reversed = FilterCriteria {
        date_range: DateRange::custom("2026-10-19", "2026-10-14"),
        ..Default::default()
    };
    let r = search(&reversed);
    assert_eq!(r.total_matches, 0);
    assert!(r.error.is_none());
}

// =============================================================================
// Criteria decoding through the pipeline
// =============================================================================

#[test]
fn e2e_json_criteria() {
    let value = json!({
        "keyword": "",
        "status": "All",
        "channel": "LinkedIn",
        "weekNumber": "43",
        "dateRange": { "type": "This Week" }
    });
    let criteria = FilterCriteria::from_json_value(&value).unwrap();
    let outcome = run_search(criteria.as_ref(), &calendar(), &ctx(), false);
    assert_eq!(ids(&outcome.result), vec!["CONT-002"]);
}

#[test]
fn e2e_null_criteria_is_error_result() {
    let criteria = FilterCriteria::from_json_value(&serde_json::Value::Null).unwrap();
    let r = run_search(criteria.as_ref(), &calendar(), &ctx(), false).result;
    assert!(r.error.is_some());
    assert!(r.results.is_empty());
    assert_eq!(r.total_matches, 0);
}

/// A JSON array is not criteria: the caller still gets a well-formed result.
#[test]
fn e2e_array_criteria_is_error_result() {
    let err = FilterCriteria::from_json_str("[]").unwrap_err();
    let r = SearchOutcome::failed(&err, &ctx()).result;
    assert!(r.error.as_deref().unwrap().contains("array"));
    assert!(r.results.is_empty());
    assert_eq!(r.total_matches, 0);
    assert_eq!(r.limit_applied, 50);
}

/// Overrides replace JSON fields before the search runs.
#[test]
fn e2e_overrides_applied_to_json_criteria() {
    let mut criteria = FilterCriteria::from_json_str(r#"{"keyword":"launch","status":"Draft"}"#)
        .unwrap()
        .unwrap();
    assert_eq!(search(&criteria).total_matches, 0);

    // Bounds alone switch the range to custom.
    CriteriaOverrides {
        status: Some("Planned".to_string()),
        start: Some("2026-10-01".to_string()),
        end: Some("2026-10-20".to_string()),
        ..Default::default()
    }
    .apply(&mut criteria);
    assert_eq!(ids(&search(&criteria)), vec!["CONT-001"]);

    CriteriaOverrides {
        range: Some(DateRangeKind::AllTime),
        ..Default::default()
    }
    .apply(&mut criteria);
    assert_eq!(ids(&search(&criteria)), vec!["CONT-001", "CONT-009"]);
}

// =============================================================================
// Result cap and source failures
// =============================================================================

/// 60 planned rows: all counted, 50 returned.
#[test]
fn e2e_result_cap_reports_true_total() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.csv");
    let mut content = String::from("ID,Date,Week,Status\n");
    for i in 1..=60 {
        content.push_str(&format!("CONT-{i:03},2026-10-19,43,Planned\n"));
    }
    fs::write(&path, content).unwrap();

    let c = FilterCriteria {
        status: Some("Planned".to_string()),
        ..Default::default()
    };
    let outcome = run_search(Some(&c), &CsvFileSource::new(&path), &ctx(), true);
    let r = &outcome.result;
    assert_eq!(r.total_matches, 60);
    assert_eq!(r.results.len(), 50);
    assert_eq!(r.limit_applied, 50);
    assert_eq!(r.results.last().unwrap().id, "CONT-050");
    assert_eq!(outcome.summary.unwrap().total, 60);
}

#[test]
fn e2e_missing_table_is_error_result() {
    let source = CsvFileSource::new(fixture("does_not_exist.csv"));
    assert!(source.snapshot().is_err());

    let r = run_search(Some(&FilterCriteria::default()), &source, &ctx(), false).result;
    let err = r.error.expect("expected an error");
    assert!(err.contains("does_not_exist.csv"), "unexpected error: {err}");
    assert!(r.results.is_empty());
    assert_eq!(r.total_matches, 0);
    assert_eq!(r.limit_applied, 50);
}

// =============================================================================
// Export
// =============================================================================

/// Exported CSV reads back through the same source with identical results.
#[test]
fn e2e_csv_export_reads_back() {
    let original = search(&FilterCriteria::default());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    let file = fs::File::create(&path).unwrap();
    let written = export::export_csv(&original.results, file).unwrap();
    assert_eq!(written, 8);

    let reread = run_search(
        Some(&FilterCriteria::default()),
        &CsvFileSource::new(&path),
        &ctx(),
        false,
    );
    assert_eq!(reread.rows_skipped, 0);
    assert_eq!(reread.result.results, original.results);
}
