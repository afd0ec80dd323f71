// ContentCal - core/criteria.rs
//
// Filter criteria and their lenient decoding from JSON.
// Malformed fields degrade to "no constraint" instead of failing the
// search; only a non-object top level is rejected.

use crate::core::date_range::{DateRange, DateRangeKind};
use crate::util::constants::FILTER_ALL;
use crate::util::error::SearchError;
use serde_json::{Map, Value};

/// Complete filter state. All active fields are AND-combined when applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    /// Case-insensitive substring over id, content idea and notes.
    /// Blank after trimming = no filter.
    pub keyword: Option<String>,

    /// Exact-match fields. `None`, "" or "All" = no filter.
    pub status: Option<String>,
    pub channel: Option<String>,
    pub pillar: Option<String>,
    pub format: Option<String>,
    /// Matched against `ContentRecord::assigned_to`.
    pub assignee: Option<String>,

    /// Exact week number. `None` = no filter.
    pub week_number: Option<i64>,

    /// Named or custom date window. `All Time` = no filter.
    pub date_range: DateRange,
}

impl FilterCriteria {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.keyword_needle().is_none()
            && exact_constraint(&self.status).is_none()
            && exact_constraint(&self.channel).is_none()
            && exact_constraint(&self.pillar).is_none()
            && exact_constraint(&self.format).is_none()
            && exact_constraint(&self.assignee).is_none()
            && self.week_number.is_none()
            && self.date_range.kind == DateRangeKind::AllTime
    }

    /// Trimmed, lower-cased keyword, or `None` when blank.
    pub fn keyword_needle(&self) -> Option<String> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_lowercase)
    }

    /// Decode criteria from a JSON value.
    ///
    /// `null` decodes to `Ok(None)` (the caller reports "no criteria");
    /// any other non-object is `InvalidCriteria`. Inside an object every
    /// field is read leniently: wrong types are ignored.
    pub fn from_json_value(value: &Value) -> Result<Option<Self>, SearchError> {
        let obj = match value {
            Value::Null => return Ok(None),
            Value::Object(map) => map,
            Value::Array(_) => return Err(SearchError::InvalidCriteria { found: "an array" }),
            Value::Bool(_) => return Err(SearchError::InvalidCriteria { found: "a boolean" }),
            Value::Number(_) => return Err(SearchError::InvalidCriteria { found: "a number" }),
            Value::String(_) => return Err(SearchError::InvalidCriteria { found: "a string" }),
        };

        Ok(Some(Self {
            keyword: string_field(obj, &["keyword"]),
            status: string_field(obj, &["status"]),
            channel: string_field(obj, &["channel"]),
            pillar: string_field(obj, &["pillar"]),
            format: string_field(obj, &["format"]),
            assignee: string_field(obj, &["assignee", "assignedTo", "assigned_to"]),
            week_number: lookup(obj, &["weekNumber", "week_number", "week"]).and_then(week_value),
            date_range: lookup(obj, &["dateRange", "date_range"])
                .map(date_range_value)
                .unwrap_or_default(),
        }))
    }

    /// Decode criteria from JSON text.
    ///
    /// Text that is not JSON at all is `CriteriaSyntax`; otherwise the same
    /// rules as [`FilterCriteria::from_json_value`] apply.
    pub fn from_json_str(text: &str) -> Result<Option<Self>, SearchError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| SearchError::CriteriaSyntax { source: e })?;
        Self::from_json_value(&value)
    }
}

/// Per-field values that replace whatever the decoded criteria carried.
///
/// A `None` field leaves the criteria untouched. Setting `start` or `end`
/// switches the range to `custom` unless `range` is also set.
#[derive(Debug, Clone, Default)]
pub struct CriteriaOverrides {
    pub keyword: Option<String>,
    pub status: Option<String>,
    pub channel: Option<String>,
    pub pillar: Option<String>,
    pub format: Option<String>,
    pub assignee: Option<String>,
    pub week: Option<i64>,
    pub range: Option<DateRangeKind>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl CriteriaOverrides {
    pub fn apply(&self, criteria: &mut FilterCriteria) {
        let text_fields = [
            (&mut criteria.keyword, &self.keyword),
            (&mut criteria.status, &self.status),
            (&mut criteria.channel, &self.channel),
            (&mut criteria.pillar, &self.pillar),
            (&mut criteria.format, &self.format),
            (&mut criteria.assignee, &self.assignee),
        ];
        for (field, value) in text_fields {
            if value.is_some() {
                field.clone_from(value);
            }
        }
        if self.week.is_some() {
            criteria.week_number = self.week;
        }

        let range = &mut criteria.date_range;
        if let Some(kind) = self.range {
            range.kind = kind;
        } else if self.start.is_some() || self.end.is_some() {
            range.kind = DateRangeKind::Custom;
        }
        if self.start.is_some() {
            range.start_date.clone_from(&self.start);
        }
        if self.end.is_some() {
            range.end_date.clone_from(&self.end);
        }
    }
}

/// The constraint value for an exact-match field, or `None` if inactive.
pub fn exact_constraint(value: &Option<String>) -> Option<&str> {
    match value.as_deref() {
        None => None,
        Some(v) if v.trim().is_empty() || v == FILTER_ALL => None,
        Some(v) => Some(v),
    }
}

/// First non-null value among the alias `keys`.
fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k).filter(|v| !v.is_null()))
}

fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    match lookup(obj, keys)? {
        Value::String(s) => Some(s.clone()),
        other => {
            tracing::debug!(field = keys[0], value = %other, "Ignoring non-string criteria field");
            None
        }
    }
}

fn week_value(value: &Value) -> Option<i64> {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    if parsed.is_none() {
        tracing::debug!(value = %value, "Week number is not an integer; week filter skipped");
    }
    parsed
}

fn date_range_value(value: &Value) -> DateRange {
    let Value::Object(obj) = value else {
        tracing::debug!(value = %value, "Ignoring non-object date range");
        return DateRange::default();
    };

    let kind = match string_field(obj, &["type", "kind"]) {
        Some(label) => DateRangeKind::from_label(&label).unwrap_or_else(|| {
            tracing::debug!(label = %label, "Unknown date range type; treating as All Time");
            DateRangeKind::AllTime
        }),
        None => DateRangeKind::AllTime,
    };

    DateRange {
        kind,
        start_date: string_field(obj, &["startDate", "start_date"]),
        end_date: string_field(obj, &["endDate", "end_date"]),
    }
}
