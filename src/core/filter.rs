// ContentCal - core/filter.rs
//
// Multi-criteria record filter over a content table snapshot.
// All active filters are AND-combined; a single order-preserving pass.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::criteria::{exact_constraint, FilterCriteria};
use crate::core::date_range::{self, DateWindow};
use crate::core::model::{ContentRecord, SearchContext, SearchResult};
use crate::util::error::SearchError;

/// Criteria resolved once per search: lowered keyword, concrete window.
struct ActiveFilters<'a> {
    keyword: Option<String>,
    status: Option<&'a str>,
    channel: Option<&'a str>,
    pillar: Option<&'a str>,
    format: Option<&'a str>,
    assignee: Option<&'a str>,
    week: Option<i64>,
    window: Option<DateWindow>,
}

impl<'a> ActiveFilters<'a> {
    fn resolve(criteria: &'a FilterCriteria, ctx: &SearchContext) -> Self {
        Self {
            keyword: criteria.keyword_needle(),
            status: exact_constraint(&criteria.status),
            channel: exact_constraint(&criteria.channel),
            pillar: exact_constraint(&criteria.pillar),
            format: exact_constraint(&criteria.format),
            assignee: exact_constraint(&criteria.assignee),
            week: criteria.week_number,
            window: date_range::resolve(&criteria.date_range, ctx.today),
        }
    }
}

/// Search the table. Never fails: errors are reported in
/// `SearchResult::error` with an empty result set.
///
/// `None` criteria (a JSON `null`) is an error; empty criteria match every
/// record.
pub fn search(
    criteria: Option<&FilterCriteria>,
    table: &[ContentRecord],
    ctx: &SearchContext,
) -> SearchResult {
    match try_search(criteria, table, ctx) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(error = %e, "Search failed");
            SearchResult::failed(&e, ctx.limit)
        }
    }
}

/// `search` with the error kept as a typed value.
pub fn try_search(
    criteria: Option<&FilterCriteria>,
    table: &[ContentRecord],
    ctx: &SearchContext,
) -> Result<SearchResult, SearchError> {
    let criteria = criteria.ok_or(SearchError::NoCriteria)?;
    let matches = matching_indices(table, criteria, ctx);
    let total_matches = matches.len();

    let results: Vec<ContentRecord> = matches
        .into_iter()
        .take(ctx.limit)
        .map(|idx| table[idx].clone())
        .collect();

    tracing::debug!(
        rows = table.len(),
        total_matches,
        returned = results.len(),
        limit = ctx.limit,
        "Search complete"
    );

    Ok(SearchResult {
        results,
        total_matches,
        limit_applied: ctx.limit,
        error: None,
    })
}

/// Indices of every matching record, in table order, ignoring the cap.
///
/// Returns indices rather than copies so callers (e.g. the summary) can look
/// at the full match set without cloning it.
pub fn matching_indices(
    table: &[ContentRecord],
    criteria: &FilterCriteria,
    ctx: &SearchContext,
) -> Vec<usize> {
    if criteria.is_empty() {
        return (0..table.len()).collect();
    }

    let active = ActiveFilters::resolve(criteria, ctx);

    table
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_all(record, &active))
        .map(|(idx, _)| idx)
        .collect()
}

/// Check if a single record matches all active filters.
fn matches_all(record: &ContentRecord, active: &ActiveFilters<'_>) -> bool {
    // Keyword (case-insensitive substring over id, idea, notes)
    if let Some(ref needle) = active.keyword {
        let hit = [&record.id, &record.content_idea, &record.notes]
            .iter()
            .any(|field| field.to_lowercase().contains(needle.as_str()));
        if !hit {
            return false;
        }
    }

    // Exact-match fields, compared as-is
    let exact = [
        (active.status, &record.status),
        (active.channel, &record.channel),
        (active.pillar, &record.pillar),
        (active.format, &record.format),
        (active.assignee, &record.assigned_to),
    ];
    for (wanted, actual) in exact {
        if let Some(wanted) = wanted {
            if actual.as_str() != wanted {
                return false;
            }
        }
    }

    // Week number
    if let Some(week) = active.week {
        if record.week != Some(week) {
            return false;
        }
    }

    // Date window. Undated records are excluded while a window is active.
    if let Some(ref window) = active.window {
        match record.date {
            Some(date) if window.contains(date) => {}
            _ => return false,
        }
    }

    true
}
