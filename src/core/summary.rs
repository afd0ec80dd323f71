// ContentCal - core/summary.rs
//
// Breakdown of a matched record set by status and channel.

use crate::core::model::ContentRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Label used for records whose status or channel cell was empty.
const UNSET_LABEL: &str = "(none)";

/// Counts over a set of matched records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSummary {
    /// Number of records summarised.
    pub total: usize,

    /// Records per status value. Empty status counts under "(none)".
    pub by_status: BTreeMap<String, usize>,

    /// Records per channel value. Empty channel counts under "(none)".
    pub by_channel: BTreeMap<String, usize>,

    /// Records with no planned date.
    pub undated: usize,
}

/// Summarise the given records.
pub fn summarize<'a, I>(records: I) -> SearchSummary
where
    I: IntoIterator<Item = &'a ContentRecord>,
{
    let mut summary = SearchSummary::default();
    for record in records {
        summary.total += 1;
        *summary.by_status.entry(label(&record.status)).or_insert(0) += 1;
        *summary.by_channel.entry(label(&record.channel)).or_insert(0) += 1;
        if record.date.is_none() {
            summary.undated += 1;
        }
    }
    summary
}

fn label(value: &str) -> String {
    if value.is_empty() {
        UNSET_LABEL.to_string()
    } else {
        value.to_string()
    }
}
