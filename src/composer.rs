//! Lays out one timesheet: title, meta block, balance headline, the entry
//! table and the footer totals.

use crate::fmt::{duration, month_label, signed_delta};
use crate::layout::{Align, Col, FontWeight, Rgb, Surface, Table, CONTINUATION_TOP};
use crate::timesheet::Timesheet;

pub const APP_NAME: &str = "Shift-Tap";
pub const EXTENSION: &str = "pdf";

pub const MARGIN: f32 = 16.0;
pub const ROW_H: f32 = 7.0;

/// Date, start, end, net, +/-, info. Remarks takes what is left.
const FIXED_WIDTHS: [f32; 6] = [24.0, 18.0, 18.0, 24.0, 22.0, 28.0];
const MIN_REMARKS_WIDTH: f32 = 24.0;
const NET_COL: usize = 3;
const DELTA_COL: usize = 4;

const TITLE_SIZE: f32 = 18.0;
const META_SIZE: f32 = 10.0;
const HEADLINE_SIZE: f32 = 12.0;
const FOOTER_SIZE: f32 = 11.0;
const LINE_GAP: f32 = 5.0;
const FOOTER_GAP: f32 = 6.0;
/// Height of the three total lines below the footer rule.
const FOOTER_BLOCK: f32 = 8.0 + 2.0 * FOOTER_GAP;
const FOOTER_BOTTOM_MARGIN: f32 = 10.0;

/// Column geometry for a page of `page_width`.
pub fn columns(page_width: f32) -> [Col; 7] {
    let avail = page_width - 2.0 * MARGIN;
    let fixed: f32 = FIXED_WIDTHS.iter().sum();
    let remarks = (avail - fixed).max(MIN_REMARKS_WIDTH);
    let mut cols = [Col { width: 0.0, align: Align::Left }; 7];
    for (i, w) in FIXED_WIDTHS.iter().enumerate() {
        cols[i].width = *w;
    }
    cols[6].width = remarks;
    cols[NET_COL].align = Align::Right;
    cols[DELTA_COL].align = Align::Right;
    cols
}

/// Keep only digits, `-`, `/` and `_`.
pub fn safe_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '-' | '/' | '_'))
        .collect()
}

/// `Shift-Tap_<safe period>.pdf`
pub fn report_filename(sheet: &Timesheet) -> String {
    let mut label = sheet.range.label();
    if label.is_empty() {
        label = month_label(&sheet.range.from_iso());
    }
    format!("{APP_NAME}_{}.{EXTENSION}", safe_label(&label))
}

pub fn document_title(sheet: &Timesheet) -> String {
    sheet.lang.labels().title(&sheet.range.label())
}

/// Draw the whole report onto `surface`. Returns the final cursor.
pub fn compose<S: Surface>(surface: &mut S, sheet: &Timesheet) -> f32 {
    let l = sheet.lang.labels();
    let unit = l.unit_h;
    let agg = &sheet.aggregate;
    let page_w = surface.page_width();

    surface.set_font(FontWeight::Bold, TITLE_SIZE);
    surface.text(&document_title(sheet), MARGIN, 18.0);

    surface.set_font(FontWeight::Normal, META_SIZE);
    let mut y = 26.0;
    if !sheet.employer.is_empty() {
        surface.text(&format!("{}: {}", l.employer, sheet.employer), MARGIN, y);
        y += LINE_GAP;
    }
    if !sheet.employee.is_empty() {
        surface.text(&format!("{}: {}", l.employee, sheet.employee), MARGIN, y);
        y += LINE_GAP;
    }
    surface.text(
        &format!("{}: {}", l.norm_day, duration(sheet.norm_day_minutes, unit)),
        MARGIN,
        y,
    );
    y += LINE_GAP;
    surface.text(
        &format!("{}: {}", l.prev_saldo, signed_delta(agg.prior_saldo_minutes, unit)),
        MARGIN,
        y,
    );

    y += 6.0;
    surface.hline(MARGIN, page_w - MARGIN, y, Rgb(180, 180, 180), 0.3);
    y += 6.0;

    surface.set_font(FontWeight::Bold, HEADLINE_SIZE);
    surface.text(
        &format!("{}: {}", l.saldo, signed_delta(agg.prior_saldo_minutes, unit)),
        MARGIN,
        y,
    );
    y += 8.0;

    let cols = columns(page_w);
    let table = Table {
        x: MARGIN,
        y,
        cols: &cols,
        row_h: ROW_H,
        headers: &l.columns,
    };
    y = table.draw(surface, sheet.rows.iter().map(|r| r.cells()));

    let mut rule_y = y + 10.0;
    if rule_y + FOOTER_BLOCK > surface.page_height() - FOOTER_BOTTOM_MARGIN {
        surface.new_page();
        rule_y = CONTINUATION_TOP;
    }
    surface.hline(MARGIN, page_w - MARGIN, rule_y, Rgb(120, 120, 120), 0.4);

    surface.set_font(FontWeight::Bold, FOOTER_SIZE);
    let y2 = rule_y + 8.0;
    surface.text(
        &format!("{}: {}", l.total_hours, duration(agg.total_work_minutes, unit)),
        MARGIN,
        y2,
    );
    surface.text(
        &format!("{}: {}", l.overtime_period, signed_delta(agg.overtime_minutes, unit)),
        MARGIN,
        y2 + FOOTER_GAP,
    );
    surface.text(
        &format!("{}: {}", l.saldo, signed_delta(agg.new_saldo_minutes, unit)),
        MARGIN,
        y2 + 2.0 * FOOTER_GAP,
    );
    y2 + 2.0 * FOOTER_GAP
}
