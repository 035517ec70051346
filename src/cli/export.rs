use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::PeriodArgs;
use crate::composer::report_filename;
use crate::config::{load_config, shellexpand_path};
use crate::error::{Result, ShiftTapError};
use crate::timesheet::Timesheet;

/// Fails fast when the PDF backend was compiled out.
fn ensure_backend() -> Result<()> {
    if cfg!(feature = "pdf") {
        Ok(())
    } else {
        Err(ShiftTapError::MissingBackend)
    }
}

/// `<output_dir>/<report filename>`, with `/` from the period label mapped
/// to `-` so the name stays a single path component.
fn default_path(sheet: &Timesheet) -> PathBuf {
    let dir = PathBuf::from(shellexpand_path(&load_config().output_dir));
    dir.join(report_filename(sheet).replace('/', "-"))
}

fn write_pdf(bytes: &[u8], path: &Path) -> Result<String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    let shown = path.display().to_string();
    info!(path = %shown, bytes = bytes.len(), "wrote report");
    println!("Wrote {shown}");
    Ok(shown)
}

/// Build and save one PDF. Returns the written path, or `None` when there
/// was no state to export.
pub fn run(period: PeriodArgs, output: Option<String>) -> Result<Option<String>> {
    let Some(snapshot) = super::load(period.state.as_deref())? else {
        return Ok(None);
    };
    ensure_backend()?;

    let range = period.export_mode(&snapshot).resolve()?;
    info!(from = %range.from_iso(), to = %range.to_iso(), "exporting period");
    let sheet = Timesheet::build(&snapshot, &range);

    let bytes = render(&sheet)?;
    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_path(&sheet));
    write_pdf(&bytes, &path).map(Some)
}

fn render(sheet: &Timesheet) -> Result<Vec<u8>> {
    #[cfg(not(feature = "pdf"))]
    {
        let _ = sheet;
        return Err(ShiftTapError::MissingBackend);
    }

    #[cfg(feature = "pdf")]
    {
        crate::pdf::render_timesheet(sheet)
    }
}
