use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use tracing::info;

use leaveplanner::configuration::Configuration;
use leaveplanner::planner::leaveoptimizer::{LeaveOptimizer, OptimizerOptions};
use leaveplanner::planner::plan::{EfficiencyRating, Plan};
use leaveplanner::time::rangeofdates::RangeOfDates;

use crate::cli::PlanArgs;

/// Compute and print a leave plan.
pub fn run(config: &Configuration, args: PlanArgs) -> Result<()> {
    let (start, end) = resolve_window(&args)?;
    let calendar = config
        .holiday_calendar(&args.country)
        .with_context(|| format!("unknown calendar '{}'", args.country))?;

    let options = merge_options(&config.optimizer_options(), &args);
    info!(country = %args.country, %start, %end, budget = args.budget, "planning leave");
    let optimizer = LeaveOptimizer::new(options);
    let plan = optimizer.optimize_with_calendar(calendar.as_ref(), start, end, args.budget)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&args.country, &plan);
    }
    Ok(())
}

/// Command line flags override the configured planner options.
fn merge_options(configured: &OptimizerOptions, args: &PlanArgs) -> OptimizerOptions {
    let mut options = configured.clone();
    if !args.months.is_empty() {
        options = options.with_preferred_months(args.months.iter().copied());
    }
    if args.max_bridge.is_some() {
        options = options.with_max_bridge_length(args.max_bridge);
    }
    if args.no_extend {
        options = options.with_extend_streaks(false);
    }
    options
}

fn resolve_window(args: &PlanArgs) -> Result<(NaiveDate, NaiveDate)> {
    match (args.start, args.end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => {
            let year = args.year.unwrap_or_else(crate::current_year);
            let range = RangeOfDates::year(year).ok_or_else(|| anyhow!("year {year} out of range"))?;
            Ok((range.start_date(), range.end_date()))
        }
    }
}

fn rating_label(rating: EfficiencyRating) -> &'static str {
    match rating {
        EfficiencyRating::Excellent => "excellent",
        EfficiencyRating::Good => "good",
        EfficiencyRating::Fair => "fair, try timing leave around holidays",
        EfficiencyRating::NoLeave => "no leave used"
    }
}

fn print_plan(country: &str, plan: &Plan) {
    println!("Leave plan for {country}, {} .. {}", plan.start_date(), plan.end_date());
    println!();

    println!("Recommended leave dates");
    let by_month = plan.leave_by_month();
    if by_month.is_empty() {
        println!("  none");
    }
    for dates in by_month.values() {
        if let Some(first) = dates.first() {
            println!("  {}", first.format("%B %Y"));
        }
        for d in dates {
            println!("    - {}", d.format("%A, %B %d"));
        }
    }
    println!();

    println!("Breaks");
    for streak in plan.streaks().iter().filter(|s| s.leave_days() > 0) {
        println!("  {streak}");
    }
    println!();

    let breakdown = plan.breakdown();
    println!("Summary");
    println!("  Weekend days     : {}", breakdown.weekend_days);
    println!("  Public holidays  : {}", breakdown.public_holidays);
    println!("  Leave days used  : {}/{}", plan.leave_used(), plan.budget());
    println!("  Total days off   : {}", breakdown.total_days_off);
    println!("  Efficiency ratio : {:.1}:1 ({})", plan.efficiency(), rating_label(plan.efficiency_rating()));
    if let Some(longest) = plan.longest_streak() {
        println!("  Longest break    : {longest}");
    }
    if plan.unused_leave() > 0 {
        println!("  Unused leave     : {}", plan.unused_leave());
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Command};

    fn plan_args(argv: &[&str]) -> PlanArgs {
        let cli = Cli::try_parse_from(["leaveplanner", "plan"].iter().chain(argv).copied()).unwrap();
        match cli.command {
            Command::Plan(args) => args,
            _ => panic!("expected the plan subcommand")
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_from_year() {
        let args = plan_args(&["--year", "2026"]);
        assert_eq!(resolve_window(&args).unwrap(), (ymd(2026, 1, 1), ymd(2026, 12, 31)));
    }

    #[test]
    fn window_from_dates() {
        let args = plan_args(&["--start", "2026-03-30", "--end", "2026-04-12"]);
        assert_eq!(resolve_window(&args).unwrap(), (ymd(2026, 3, 30), ymd(2026, 4, 12)));
    }

    #[test]
    fn start_without_end_is_rejected() {
        assert!(Cli::try_parse_from(["leaveplanner", "plan", "--start", "2026-03-30"]).is_err());
    }

    #[test]
    fn flags_override_configured_options() {
        let configured = OptimizerOptions::new().with_max_bridge_length(Some(4)).with_preferred_months([1]);
        let args = plan_args(&["--months", "7,8", "--no-extend"]);
        let options = merge_options(&configured, &args);
        assert_eq!(options.preferred_months().iter().copied().collect::<Vec<_>>(), vec![7, 8]);
        assert_eq!(options.max_bridge_length(), Some(4));
        assert!(!options.extend_streaks());

        let args = plan_args(&["--max-bridge", "2"]);
        let options = merge_options(&configured, &args);
        assert_eq!(options.max_bridge_length(), Some(2));
        assert_eq!(options.preferred_months().iter().copied().collect::<Vec<_>>(), vec![1]);
        assert!(options.extend_streaks());
    }

    #[test]
    fn months_outside_the_year_are_rejected() {
        assert!(Cli::try_parse_from(["leaveplanner", "plan", "--months", "7,13"]).is_err());
        assert!(Cli::try_parse_from(["leaveplanner", "plan", "--months", "0"]).is_err());
    }

    #[test]
    fn negative_budget_reaches_the_optimizer() {
        let args = plan_args(&["--budget", "-2"]);
        assert_eq!(args.budget, -2);
    }
}
