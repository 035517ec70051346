//! Display rows for the timesheet table, one per entry.
//!
//! The per-row delta here is advisory: each row is judged as if it were the
//! only entry of its day. When a day holds several work entries the row
//! deltas do not add up to the day delta from `accounting`, and only the
//! latter feeds the footer totals.

use crate::accounting::DayMap;
use crate::fmt::{dmy, duration, signed_delta};
use crate::i18n::Labels;
use crate::models::{EntryType, TimeEntry};

/// Notes longer than this are shortened in the info column and repeated in
/// full under remarks.
pub const NOTE_SHORT_LEN: usize = 36;
pub const ELLIPSIS: char = '…';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRow {
    pub date_label: String,
    pub start: String,
    pub end: String,
    pub net_label: String,
    pub delta_label: String,
    pub info: String,
    pub remarks: String,
}

impl ProjectedRow {
    pub fn cells(&self) -> [&str; 7] {
        [
            self.date_label.as_str(),
            self.start.as_str(),
            self.end.as_str(),
            self.net_label.as_str(),
            self.delta_label.as_str(),
            self.info.as_str(),
            self.remarks.as_str(),
        ]
    }
}

/// Display-only delta for a single entry. Never use it for balances.
pub fn advisory_row_delta(entry: &TimeEntry, norm_minutes: i64) -> i64 {
    match entry.entry_type {
        EntryType::Work => entry.net_minutes - norm_minutes,
        EntryType::Recup => -norm_minutes,
        _ => 0,
    }
}

/// Split a note into `(info, remarks)`.
pub fn split_note(note: &str, entry_type: &EntryType, labels: &Labels) -> (String, String) {
    let note = note.trim();
    if note.is_empty() {
        return (labels.default_info(entry_type).to_string(), String::new());
    }
    if note.chars().count() > NOTE_SHORT_LEN {
        let head: String = note.chars().take(NOTE_SHORT_LEN).collect();
        let mut info = head.trim_end().to_string();
        info.push(ELLIPSIS);
        (info, note.to_string())
    } else {
        (note.to_string(), String::new())
    }
}

pub struct RowProjector<'a> {
    labels: &'a Labels,
    norm_minutes: i64,
}

impl<'a> RowProjector<'a> {
    pub fn new(labels: &'a Labels, norm_minutes: i64) -> Self {
        Self {
            labels,
            norm_minutes,
        }
    }

    pub fn project(&self, entry: &TimeEntry) -> ProjectedRow {
        let unit = self.labels.unit_h;
        let (info, remarks) = split_note(&entry.note, &entry.entry_type, self.labels);
        ProjectedRow {
            date_label: dmy(&entry.date),
            start: entry.start.clone(),
            end: entry.end.clone(),
            net_label: duration(entry.net_minutes, unit),
            delta_label: signed_delta(advisory_row_delta(entry, self.norm_minutes), unit),
            info,
            remarks,
        }
    }

    /// Rows for every entry of every day in `from..=to`, days ascending and
    /// entries in their logged order.
    pub fn project_range(&self, days: &DayMap<'_>, from: &str, to: &str) -> Vec<ProjectedRow> {
        days.iter()
            .filter(|(day, _)| **day >= from && **day <= to)
            .flat_map(|(_, entries)| entries.iter().map(move |e| self.project(e)))
            .collect()
    }
}
