use anyhow::{Context, Result};

use leaveplanner::configuration::Configuration;

use crate::cli::HolidaysArgs;

/// List the named public holidays of one calendar year.
pub fn run(config: &Configuration, args: HolidaysArgs) -> Result<()> {
    let year = args.year.unwrap_or_else(crate::current_year);
    let calendar = config
        .holiday_calendar(&args.country)
        .with_context(|| format!("unknown calendar '{}'", args.country))?;

    let weekends: Vec<String> = calendar.weekends().weekend_list().iter().map(|w| w.to_string()).collect();
    println!("Public holidays for {} in {year} (weekend: {})", args.country, weekends.join(", "));
    for (date, name) in calendar.get_named_holidays(year) {
        println!("  {}  {name}", date.format("%a %Y-%m-%d"));
    }
    Ok(())
}
