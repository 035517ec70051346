use colored::Colorize;
use comfy_table::{CellAlignment, Table};

use crate::cli::PeriodArgs;
use crate::composer::document_title;
use crate::error::Result;
use crate::fmt::{duration, signed_delta};
use crate::timesheet::Timesheet;

pub fn run(period: PeriodArgs) -> Result<()> {
    let Some(snapshot) = super::load(period.state.as_deref())? else {
        return Ok(());
    };
    let range = period.export_mode(&snapshot).resolve()?;
    let sheet = Timesheet::build(&snapshot, &range);
    println!("{}", format_timesheet(&sheet));
    Ok(())
}

/// Terminal rendition of the same report the PDF shows.
pub fn format_timesheet(sheet: &Timesheet) -> String {
    let l = sheet.lang.labels();
    let unit = l.unit_h;
    let agg = &sheet.aggregate;
    let mut out = String::new();

    out.push_str(&format!("{}\n", document_title(sheet).bold()));
    if !sheet.employer.is_empty() {
        out.push_str(&format!("{}: {}\n", l.employer, sheet.employer));
    }
    if !sheet.employee.is_empty() {
        out.push_str(&format!("{}: {}\n", l.employee, sheet.employee));
    }
    out.push_str(&format!("{}: {}\n", l.norm_day, duration(sheet.norm_day_minutes, unit)));
    out.push_str(&format!(
        "{}: {}\n\n",
        l.saldo,
        saldo(signed_delta(agg.prior_saldo_minutes, unit), agg.prior_saldo_minutes)
    ));

    let mut table = Table::new();
    table.set_header(l.columns.to_vec());
    for row in &sheet.rows {
        table.add_row(row.cells().to_vec());
    }
    for idx in [3, 4] {
        if let Some(col) = table.column_mut(idx) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    out.push_str(&format!("{table}\n\n"));

    out.push_str(&format!(
        "{}: {}\n",
        l.total_hours.bold(),
        duration(agg.total_work_minutes, unit)
    ));
    out.push_str(&format!(
        "{}: {}\n",
        l.overtime_period.bold(),
        saldo(signed_delta(agg.overtime_minutes, unit), agg.overtime_minutes)
    ));
    out.push_str(&format!(
        "{}: {}",
        l.saldo.bold(),
        saldo(signed_delta(agg.new_saldo_minutes, unit), agg.new_saldo_minutes)
    ));
    out
}

fn saldo(label: String, minutes: i64) -> colored::ColoredString {
    if minutes < 0 {
        label.red()
    } else {
        label.green()
    }
}
