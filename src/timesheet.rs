use tracing::{debug, trace};

use crate::accounting::{self, AccountingInput, PeriodAggregate};
use crate::i18n::Lang;
use crate::models::Snapshot;
use crate::period::DateRange;
use crate::projector::{ProjectedRow, RowProjector};

/// Everything one report needs, computed from a snapshot and a period.
#[derive(Debug, Clone, PartialEq)]
pub struct Timesheet {
    pub range: DateRange,
    pub lang: Lang,
    pub norm_day_minutes: i64,
    pub employer: String,
    pub employee: String,
    pub aggregate: PeriodAggregate,
    pub rows: Vec<ProjectedRow>,
}

impl Timesheet {
    pub fn build(snapshot: &Snapshot, range: &DateRange) -> Self {
        let settings = &snapshot.settings;
        let lang = Lang::from_code(&settings.lang);
        let norm = settings.norm_day_minutes;
        let from = range.from_iso();
        let to = range.to_iso();

        let days = accounting::group_by_date(&snapshot.entries);
        let aggregate = accounting::period_aggregate(
            &AccountingInput {
                days: &days,
                norm_minutes: norm,
                start_saldo: settings.start_saldo_minutes,
                paid_minutes: settings.overtime_paid_minutes,
            },
            &from,
            &to,
        );
        let rows = RowProjector::new(lang.labels(), norm).project_range(&days, &from, &to);

        for day in accounting::daily_aggregates(&days, norm) {
            trace!(date = %day.date, delta = day.delta_minutes, "day delta");
        }
        debug!(
            from = %aggregate.from_date,
            to = %aggregate.to_date,
            rows = rows.len(),
            total_work = aggregate.total_work_minutes,
            overtime = aggregate.overtime_minutes,
            prior_saldo = aggregate.prior_saldo_minutes,
            new_saldo = aggregate.new_saldo_minutes,
            "built timesheet"
        );

        Self {
            range: *range,
            lang,
            norm_day_minutes: norm,
            employer: settings.employer_name.trim().to_string(),
            employee: settings.employee_name.trim().to_string(),
            aggregate,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::ExportMode;
    use crate::state::parse_snapshot;

    fn feb() -> DateRange {
        ExportMode::Month("2026-02".into()).resolve().unwrap()
    }

    #[test]
    fn test_single_work_day_month() {
        let snap = parse_snapshot(
            r#"{"entries":[{"date":"2026-02-02","type":"Werk","netMin":480}],
                "settings":{"normDayMin":450,"startSaldoMin":0}}"#,
        )
        .unwrap();
        let sheet = Timesheet::build(&snap, &feb());
        assert_eq!(sheet.aggregate.total_work_minutes, 480);
        assert_eq!(sheet.aggregate.overtime_minutes, 30);
        assert_eq!(sheet.aggregate.prior_saldo_minutes, 0);
        assert_eq!(sheet.aggregate.new_saldo_minutes, 30);
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.lang, Lang::Nl);
    }

    #[test]
    fn test_history_and_payout_carry_into_prior_saldo() {
        let snap = parse_snapshot(
            r#"{"entries":[
                    {"date":"2026-01-12","type":"Werk","netMin":510},
                    {"date":"2026-01-13","type":"Recup"},
                    {"date":"2026-01-14","type":"Werk","netMin":900,"deletedAt":"x"},
                    {"date":"2026-02-03","type":"Werk","netMin":420},
                    {"date":"2026-02-04","type":"Vakantie"}
                ],
                "settings":{"normDayMin":450,"startSaldoMin":600,"lang":"en-US"},
                "overtimePaidMinutes":120}"#,
        )
        .unwrap();
        let sheet = Timesheet::build(&snap, &feb());
        assert_eq!(sheet.aggregate.prior_saldo_minutes, 600 - 120 + 60 - 450);
        assert_eq!(sheet.aggregate.overtime_minutes, -30);
        assert_eq!(
            sheet.aggregate.new_saldo_minutes,
            sheet.aggregate.prior_saldo_minutes - 30
        );
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[1].info, "Vacation day");
        assert_eq!(sheet.lang, Lang::En);
    }

    #[test]
    fn test_build_is_deterministic() {
        let snap = parse_snapshot(
            r#"{"entries":[
                    {"date":"2026-01-30","type":"Werk","netMin":500},
                    {"date":"2026-02-02","type":"Werk","netMin":240},
                    {"date":"2026-02-02","type":"Werk","netMin":250}
                ]}"#,
        )
        .unwrap();
        let a = Timesheet::build(&snap, &feb());
        let b = Timesheet::build(&snap, &feb());
        assert_eq!(a, b);
    }
}
