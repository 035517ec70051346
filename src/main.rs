mod accounting;
mod cli;
mod composer;
mod config;
mod error;
mod fmt;
mod i18n;
mod layout;
mod models;
mod period;
#[cfg(feature = "pdf")]
mod pdf;
mod projector;
mod state;
mod timesheet;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands, ConfigCommands};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Export { period, output } => cli::export::run(period, output).map(|_| ()),
        Commands::Report { period } => cli::report::run(period),
        Commands::Months { state } => cli::months::run(state.as_deref()),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::SetState { path } => cli::config::set_state(&path),
            ConfigCommands::SetOutput { dir } => cli::config::set_output(&dir),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
