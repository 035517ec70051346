pub mod config;
pub mod export;
pub mod months;
pub mod report;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use crate::config::{load_config, resolve_state_source};
use crate::error::Result;
use crate::models::Snapshot;
use crate::period::{available_months, default_month, ExportMode};
use crate::state::load_snapshot;

#[derive(Parser)]
#[command(name = "shifttap", about = "Timesheet and overtime balance exporter.")]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export a period as a paginated PDF timesheet.
    Export {
        #[command(flatten)]
        period: PeriodArgs,
        /// Output file path (default: <output_dir>/Shift-Tap_<period>.pdf)
        #[arg(long)]
        output: Option<String>,
    },
    /// Print a period's timesheet to the terminal.
    Report {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// List the months that have logged entries.
    Months {
        /// Path to the persisted state file
        #[arg(long)]
        state: Option<String>,
    },
    /// Show or change the tool configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the configuration file location and values.
    Show,
    /// Set the default state file.
    SetState {
        /// Path to the persisted state JSON
        path: String,
    },
    /// Set the default export directory.
    SetOutput {
        /// Directory that receives exported PDFs
        dir: String,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Month to report: YYYY-MM (default: current month, or the latest with data)
    #[arg(long, conflicts_with_all = ["from_date", "to_date"])]
    pub month: Option<String>,
    /// First day of an explicit range: YYYY-MM-DD
    #[arg(long = "from")]
    pub from_date: Option<String>,
    /// Last day of an explicit range: YYYY-MM-DD
    #[arg(long = "to")]
    pub to_date: Option<String>,
    /// Path to the persisted state file
    #[arg(long)]
    pub state: Option<String>,
}

impl PeriodArgs {
    /// Explicit bounds win; a lone `--from` or `--to` still selects date
    /// mode so the missing bound is reported instead of silently ignored.
    pub fn export_mode(&self, snapshot: &Snapshot) -> ExportMode {
        if self.from_date.is_some() || self.to_date.is_some() {
            return ExportMode::Dates {
                from: self.from_date.clone().unwrap_or_default(),
                to: self.to_date.clone().unwrap_or_default(),
            };
        }
        match &self.month {
            Some(m) => ExportMode::Month(m.clone()),
            None => {
                let months = available_months(snapshot);
                ExportMode::Month(default_month(&months, chrono::Local::now().date_naive()))
            }
        }
    }
}

/// Load the snapshot a command works on. `None` means nothing to do.
pub(crate) fn load(state: Option<&str>) -> Result<Option<Snapshot>> {
    let config = load_config();
    let source = resolve_state_source(state, &config);
    debug!(path = %source.path().display(), "state source");
    let snapshot = load_snapshot(&source)?;
    if snapshot.is_none() {
        info!(path = %source.path().display(), "nothing to export");
    }
    Ok(snapshot)
}
