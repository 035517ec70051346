use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::error::{Result, ShiftTapError};
use crate::fmt::{dmy, month_label, parse_ymd};
use crate::models::Snapshot;

/// How the user picked the period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportMode {
    /// `YYYY-MM`
    Month(String),
    /// Explicit ISO bounds, both inclusive.
    Dates { from: String, to: String },
}

/// Validated, inclusive report period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn from_iso(&self) -> String {
        self.from.format("%Y-%m-%d").to_string()
    }

    pub fn to_iso(&self) -> String {
        self.to.format("%Y-%m-%d").to_string()
    }

    /// `dd/mm/yyyy – dd/mm/yyyy`
    pub fn label(&self) -> String {
        period_label(&self.from_iso(), &self.to_iso())
    }
}

pub fn period_label(from_ymd: &str, to_ymd: &str) -> String {
    let f = dmy(from_ymd);
    let t = dmy(to_ymd);
    match (f.is_empty(), t.is_empty()) {
        (false, false) => format!("{f} – {t}"),
        (false, true) => f,
        _ => String::new(),
    }
}

/// First and last calendar day of a `YYYY-MM` month.
pub fn month_bounds(ym: &str) -> Option<(NaiveDate, NaiveDate)> {
    let (y, m) = ym.trim().split_once('-')?;
    let year: i32 = y.parse().ok()?;
    let month: u32 = m.parse().ok()?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

impl ExportMode {
    /// Turn the user's choice into a checked range. Any failure here aborts
    /// the build before layout starts.
    pub fn resolve(&self) -> Result<DateRange> {
        let (from, to) = match self {
            ExportMode::Month(ym) => month_bounds(ym).ok_or_else(|| {
                ShiftTapError::InvalidRange(format!("not a YYYY-MM month: {ym:?}"))
            })?,
            ExportMode::Dates { from, to } => {
                if from.trim().is_empty() || to.trim().is_empty() {
                    return Err(ShiftTapError::InvalidRange(
                        "both --from and --to are required".to_string(),
                    ));
                }
                let f = parse_ymd(from).ok_or_else(|| {
                    ShiftTapError::InvalidRange(format!("not a YYYY-MM-DD date: {from:?}"))
                })?;
                let t = parse_ymd(to).ok_or_else(|| {
                    ShiftTapError::InvalidRange(format!("not a YYYY-MM-DD date: {to:?}"))
                })?;
                (f, t)
            }
        };
        if from > to {
            return Err(ShiftTapError::InvalidRange(format!(
                "--from {} is after --to {}",
                from.format("%Y-%m-%d"),
                to.format("%Y-%m-%d")
            )));
        }
        Ok(DateRange { from, to })
    }
}

/// Distinct `YYYY-MM` months that have usable entries, ascending.
pub fn available_months(snapshot: &Snapshot) -> Vec<String> {
    let months: BTreeSet<String> = snapshot
        .usable_entries()
        .filter_map(|e| e.date.get(..7).map(str::to_string))
        .collect();
    months.into_iter().collect()
}

/// Month preselected for export: `today`'s month when it has data, else the
/// latest month with data, else `today`'s month anyway.
pub fn default_month(months: &[String], today: NaiveDate) -> String {
    let current = format!("{:04}-{:02}", today.year(), today.month());
    if months.contains(&current) {
        return current;
    }
    months.last().cloned().unwrap_or(current)
}

/// `2026-02` -> `02/2026`
pub fn display_month(ym: &str) -> String {
    month_label(&format!("{ym}-01"))
}
