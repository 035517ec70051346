//! Overtime accounting: per-day deltas, the balance carried into a period,
//! and the period totals. These numbers are authoritative; the per-row
//! figures in `projector` are display hints only.

use std::collections::BTreeMap;

use crate::models::{EntryType, TimeEntry};

/// Usable entries keyed by ISO date. `BTreeMap` keeps days in ascending
/// order, which for `YYYY-MM-DD` strings is chronological.
pub type DayMap<'a> = BTreeMap<&'a str, Vec<&'a TimeEntry>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyAggregate {
    pub date: String,
    pub delta_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodAggregate {
    pub from_date: String,
    pub to_date: String,
    pub total_work_minutes: i64,
    pub overtime_minutes: i64,
    pub prior_saldo_minutes: i64,
    pub new_saldo_minutes: i64,
}

/// Group entries by date, leaving out soft-deleted and undated ones.
pub fn group_by_date<'a, I>(entries: I) -> DayMap<'a>
where
    I: IntoIterator<Item = &'a TimeEntry>,
{
    let mut map: DayMap<'a> = BTreeMap::new();
    for e in entries {
        if !e.is_usable() {
            continue;
        }
        map.entry(e.date.as_str()).or_default().push(e);
    }
    map
}

/// Authoritative delta for one day.
///
/// Net work above zero moves the balance by `work - norm`; each recup entry
/// costs one full norm day. Leave types are neutral.
pub fn delta_for_day(entries_of_day: &[&TimeEntry], norm_minutes: i64) -> i64 {
    let work_net: i64 = entries_of_day
        .iter()
        .filter(|e| e.entry_type == EntryType::Work)
        .map(|e| e.net_minutes)
        .sum();
    let recups = entries_of_day
        .iter()
        .filter(|e| e.entry_type == EntryType::Recup)
        .count() as i64;

    let mut delta = 0;
    if work_net > 0 {
        delta += work_net - norm_minutes;
    }
    delta - norm_minutes * recups
}

/// Daily deltas for every grouped day, ascending.
pub fn daily_aggregates(days: &DayMap<'_>, norm_minutes: i64) -> Vec<DailyAggregate> {
    days.iter()
        .map(|(date, entries)| DailyAggregate {
            date: (*date).to_string(),
            delta_minutes: delta_for_day(entries, norm_minutes),
        })
        .collect()
}

/// Balance carried into a period starting at `range_start`: the starting
/// saldo, minus what was paid out, plus every day strictly before the start.
pub fn prior_balance(
    days: &DayMap<'_>,
    norm_minutes: i64,
    range_start: &str,
    start_saldo: i64,
    paid_minutes: i64,
) -> i64 {
    let mut saldo = start_saldo - paid_minutes;
    for (day, entries) in days {
        if *day >= range_start {
            break;
        }
        saldo += delta_for_day(entries, norm_minutes);
    }
    saldo
}

/// `(total_work_minutes, overtime_minutes)` over the days in `from..=to`.
pub fn period_totals(days: &DayMap<'_>, norm_minutes: i64, from: &str, to: &str) -> (i64, i64) {
    let mut total_work = 0;
    let mut overtime = 0;
    for (day, entries) in days {
        if *day < from {
            continue;
        }
        if *day > to {
            break;
        }
        total_work += entries
            .iter()
            .filter(|e| e.entry_type == EntryType::Work)
            .map(|e| e.net_minutes)
            .sum::<i64>();
        overtime += delta_for_day(entries, norm_minutes);
    }
    (total_work, overtime)
}

pub struct AccountingInput<'a> {
    pub days: &'a DayMap<'a>,
    pub norm_minutes: i64,
    pub start_saldo: i64,
    pub paid_minutes: i64,
}

/// Full accounting for `from..=to`.
pub fn period_aggregate(input: &AccountingInput<'_>, from: &str, to: &str) -> PeriodAggregate {
    let prior = prior_balance(
        input.days,
        input.norm_minutes,
        from,
        input.start_saldo,
        input.paid_minutes,
    );
    let (total_work_minutes, overtime_minutes) =
        period_totals(input.days, input.norm_minutes, from, to);
    PeriodAggregate {
        from_date: from.to_string(),
        to_date: to.to_string(),
        total_work_minutes,
        overtime_minutes,
        prior_saldo_minutes: prior,
        new_saldo_minutes: prior + overtime_minutes,
    }
}
