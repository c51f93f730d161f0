mod cli;
mod holidays_cmd;
mod logging;
mod plan_cmd;

use std::process;

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::Parser;

use leaveplanner::configuration::Configuration;
use leaveplanner::manager::manager::IManager;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Configuration::builtin().context("failed to load built-in calendars")?;
    if let Some(path) = cli.config.as_ref() {
        config
            .from_reader(path)
            .with_context(|| format!("failed to read configuration: {}", path.display()))?;
    }

    match cli.command {
        Command::Plan(args) => plan_cmd::run(&config, args),
        Command::Holidays(args) => holidays_cmd::run(&config, args),
        Command::Calendars => {
            for name in config.holiday_calendar_manager().names() {
                println!("{name}");
            }
            Ok(())
        }
    }
}

pub(crate) fn current_year() -> i32 {
    Local::now().year()
}
