use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Suggests leave days that join weekends and public holidays into long breaks.
#[derive(Parser)]
#[command(
    name = "leaveplanner",
    version,
    about = "Plan annual leave around weekends and public holidays"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// JSON configuration with extra calendars and planner defaults.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute a leave plan.
    Plan(PlanArgs),
    /// List the public holidays of a calendar.
    Holidays(HolidaysArgs),
    /// List the registered calendar names.
    Calendars,
}

/// Arguments for the `plan` subcommand.
#[derive(clap::Args)]
pub struct PlanArgs {
    /// Calendar year to plan; defaults to the current year.
    #[arg(short, long, conflicts_with_all = ["start", "end"])]
    pub year: Option<i32>,

    /// First day of a custom window (YYYY-MM-DD).
    #[arg(long, requires = "end")]
    pub start: Option<NaiveDate>,

    /// Last day of a custom window (YYYY-MM-DD).
    #[arg(long, requires = "start")]
    pub end: Option<NaiveDate>,

    /// Holiday calendar name, e.g. GB, US, DE.
    #[arg(long, default_value = "GB")]
    pub country: String,

    /// Number of leave days available.
    #[arg(short, long, default_value_t = 20, allow_negative_numbers = true)]
    pub budget: i64,

    /// Months (1-12) in which leave may be taken, comma separated.
    #[arg(short, long, value_delimiter = ',', value_parser = clap::value_parser!(u32).range(1..=12))]
    pub months: Vec<u32>,

    /// Never bridge gaps longer than this many working days.
    #[arg(long = "max-bridge")]
    pub max_bridge: Option<usize>,

    /// Do not spend leave that cannot bridge a gap.
    #[arg(long = "no-extend")]
    pub no_extend: bool,

    /// Print the plan as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `holidays` subcommand.
#[derive(clap::Args)]
pub struct HolidaysArgs {
    /// Calendar year; defaults to the current year.
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Holiday calendar name, e.g. GB, US, DE.
    #[arg(long, default_value = "GB")]
    pub country: String,
}
