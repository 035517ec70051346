use crate::error::Result;
use crate::period::{available_months, default_month, display_month};

pub fn run(state: Option<&str>) -> Result<()> {
    let Some(snapshot) = super::load(state)? else {
        println!("No logged entries.");
        return Ok(());
    };
    let months = available_months(&snapshot);
    let selected = default_month(&months, chrono::Local::now().date_naive());
    print!("{}", format_months(&months, &selected));
    Ok(())
}

/// One `MM/YYYY` per line, the default export month marked with `*`.
pub fn format_months(months: &[String], selected: &str) -> String {
    let mut out = String::new();
    if !months.iter().any(|m| m == selected) {
        out.push_str(&format!("* {} (no entries)\n", display_month(selected)));
    }
    for m in months {
        let mark = if m == selected { '*' } else { ' ' };
        out.push_str(&format!("{mark} {}\n", display_month(m)));
    }
    out
}
