// ContentCal - core/date_range.rs
//
// Named date ranges ("This Week", "Last Month", custom) and their
// resolution to concrete inclusive windows relative to a given "today".
// Core layer: pure logic, no clock access (today is always passed in).

use crate::util::constants;
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// Predefined window types offered by the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateRangeKind {
    #[default]
    AllTime,
    ThisWeek,
    Last7Days,
    Next7Days,
    ThisMonth,
    LastMonth,
    Custom,
}

impl DateRangeKind {
    /// Returns all variants in display order.
    pub fn all() -> &'static [DateRangeKind] {
        &[
            DateRangeKind::AllTime,
            DateRangeKind::ThisWeek,
            DateRangeKind::Last7Days,
            DateRangeKind::Next7Days,
            DateRangeKind::ThisMonth,
            DateRangeKind::LastMonth,
            DateRangeKind::Custom,
        ]
    }

    /// Label as it appears in the search form.
    pub fn label(&self) -> &'static str {
        match self {
            DateRangeKind::AllTime => "All Time",
            DateRangeKind::ThisWeek => "This Week",
            DateRangeKind::Last7Days => "Last 7 Days",
            DateRangeKind::Next7Days => "Next 7 Days",
            DateRangeKind::ThisMonth => "This Month",
            DateRangeKind::LastMonth => "Last Month",
            DateRangeKind::Custom => "custom",
        }
    }

    /// Case-insensitive lookup by label. Returns `None` for unknown labels.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        Self::all()
            .iter()
            .copied()
            .find(|k| k.label().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for DateRangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Date-range descriptor as supplied by the caller.
///
/// `start_date`/`end_date` are only consulted for `Custom` and are kept as
/// the raw strings the caller sent; parsing happens at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateRange {
    pub kind: DateRangeKind,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRange {
    pub fn named(kind: DateRangeKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn custom(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            kind: DateRangeKind::Custom,
            start_date: Some(start.into()),
            end_date: Some(end.into()),
        }
    }
}

/// Concrete inclusive window `[start, end]`.
///
/// A window whose start lies after its end contains nothing; that is how a
/// reversed custom range resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateWindow {
    /// Window from the start of `first` to the end of `last`.
    pub fn days(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: first.and_time(NaiveTime::MIN),
            end: last.and_time(end_of_day()),
        }
    }

    /// Whether a record date, pinned to noon, falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let at = date.and_time(noon());
        self.start <= at && at <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// A window that contains no date at all.
    fn nothing() -> Self {
        Self {
            start: NaiveDate::MAX.and_time(end_of_day()),
            end: NaiveDate::MIN.and_time(NaiveTime::MIN),
        }
    }
}

fn noon() -> NaiveTime {
    NaiveTime::from_hms_opt(constants::RECORD_DATE_NORMALISED_HOUR, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

/// Resolve a descriptor to a window relative to `today`.
///
/// Returns `None` when no date constraint applies: `All Time`, or a custom
/// range with a missing or unparseable bound. Windows that would run past
/// the representable calendar are clamped to its first or last day.
pub fn resolve(range: &DateRange, today: NaiveDate) -> Option<DateWindow> {
    let window = match range.kind {
        DateRangeKind::AllTime => return None,
        DateRangeKind::ThisWeek => {
            let monday = days_before(today, u64::from(today.weekday().num_days_from_monday()));
            DateWindow::days(monday, days_after(monday, 6))
        }
        DateRangeKind::Last7Days => DateWindow::days(days_before(today, 6), today),
        DateRangeKind::Next7Days => DateWindow::days(today, days_after(today, 6)),
        DateRangeKind::ThisMonth => {
            let first = first_of_month(today);
            DateWindow::days(first, last_of_month(first))
        }
        DateRangeKind::LastMonth => match first_of_month(today).pred_opt() {
            Some(last) => DateWindow::days(first_of_month(last), last),
            // No month before the first representable one.
            None => DateWindow::nothing(),
        },
        DateRangeKind::Custom => {
            let start = range.start_date.as_deref().and_then(parse_date);
            let end = range.end_date.as_deref().and_then(parse_date);
            let (Some(s), Some(e)) = (start, end) else {
                tracing::debug!(
                    start = ?range.start_date,
                    end = ?range.end_date,
                    "Custom date range incomplete; date filter skipped"
                );
                return None;
            };
            DateWindow::days(s, e)
        }
    };

    if window.is_empty() {
        tracing::debug!(
            range = %range.kind,
            start = %window.start,
            end = %window.end,
            "Date range is empty; matches nothing"
        );
    }
    Some(window)
}

fn days_before(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN)
}

fn days_after(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_add_days(Days::new(n)).unwrap_or(NaiveDate::MAX)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month starting at `first`. The final representable
/// month has no successor, so it ends on `NaiveDate::MAX`.
fn last_of_month(first: NaiveDate) -> NaiveDate {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Parse a date as typed into the sheet or the search form.
///
/// Accepts ISO `2026-10-19`, US `10/19/2026`, and RFC 3339 / ISO datetimes
/// (date part only). Returns `None` for anything else, including "".
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}
