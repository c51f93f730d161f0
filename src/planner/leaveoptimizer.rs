use std::cmp::Reverse;
use std::collections::{BTreeSet, HashSet};

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info, warn};

use crate::planner::calendarday::CalendarDay;
use crate::planner::plan::Plan;
use crate::planner::plannererror::PlannerError;
use crate::planner::streak::streak_spans;
use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::rangeofdates::RangeOfDates;
use crate::time::weekendmask::WeekendMask;

/// Tuning knobs of [`LeaveOptimizer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptimizerOptions {
    weekends: WeekendMask,
    preferred_months: BTreeSet<u32>,
    max_bridge_length: Option<usize>,
    extend_streaks: bool
}

impl OptimizerOptions {
    pub fn new() -> OptimizerOptions {
        OptimizerOptions {
            weekends: WeekendMask::saturday_sunday(),
            preferred_months: BTreeSet::new(),
            max_bridge_length: None,
            extend_streaks: true
        }
    }

    pub fn with_weekends(mut self, weekends: WeekendMask) -> OptimizerOptions {
        self.weekends = weekends;
        self
    }

    /// Restricts leave to the given months (1-12). Out-of-range months are
    /// dropped with a warning; an empty set allows every month.
    pub fn with_preferred_months<I>(mut self, months: I) -> OptimizerOptions
    where
        I: IntoIterator<Item = u32>
    {
        let (valid, invalid): (Vec<u32>, Vec<u32>) = months
            .into_iter()
            .partition(|m| (1..=12).contains(m));
        if !invalid.is_empty() {
            warn!(?invalid, "ignoring preferred months outside 1-12");
        }
        self.preferred_months = valid.into_iter().collect();
        self
    }

    pub fn with_max_bridge_length(mut self, max_bridge_length: Option<usize>) -> OptimizerOptions {
        self.max_bridge_length = max_bridge_length;
        self
    }

    pub fn with_extend_streaks(mut self, extend_streaks: bool) -> OptimizerOptions {
        self.extend_streaks = extend_streaks;
        self
    }

    pub fn weekends(&self) -> WeekendMask {
        self.weekends
    }

    pub fn preferred_months(&self) -> &BTreeSet<u32> {
        &self.preferred_months
    }

    pub fn max_bridge_length(&self) -> Option<usize> {
        self.max_bridge_length
    }

    pub fn extend_streaks(&self) -> bool {
        self.extend_streaks
    }

    pub fn is_preferred(&self, d: NaiveDate) -> bool {
        self.preferred_months.is_empty() || self.preferred_months.contains(&d.month())
    }
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        OptimizerOptions::new()
    }
}

/// Working days between two streaks, as inclusive indices into the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Gap {
    first: usize,
    last: usize
}

impl Gap {
    fn len(&self) -> usize {
        self.last - self.first + 1
    }
}

fn find_gaps(days: &[CalendarDay]) -> Vec<Gap> {
    streak_spans(days)
        .windows(2)
        .map(|pair| Gap { first: pair[0].1 + 1, last: pair[1].0 - 1 })
        .collect()
}

/// Gaps between weekends and holidays alone, ignoring assigned leave.
fn find_base_gaps(days: &[CalendarDay]) -> Vec<Gap> {
    let off: Vec<usize> = days
        .iter()
        .enumerate()
        .filter(|(_, d)| d.is_off())
        .map(|(i, _)| i)
        .collect();
    off.windows(2)
        .filter(|pair| pair[1] > pair[0] + 1)
        .map(|pair| Gap { first: pair[0] + 1, last: pair[1] - 1 })
        .collect()
}

/// Chooses leave days that join weekends and holidays into long streaks.
///
/// Gaps between streaks are bridged smallest first, earliest first on ties,
/// as long as the remaining budget covers the whole gap. Leave left over
/// after bridging grows the longest streak one day at a time.
#[derive(Clone, Debug, Default)]
pub struct LeaveOptimizer {
    options: OptimizerOptions
}

impl LeaveOptimizer {
    pub fn new(options: OptimizerOptions) -> LeaveOptimizer {
        LeaveOptimizer { options }
    }

    pub fn options(&self) -> &OptimizerOptions {
        &self.options
    }

    /// Plans leave over `[start, end]` using the optimizer's weekend set.
    /// Holidays outside the window are ignored.
    pub fn optimize(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        holidays: &HashSet<NaiveDate>,
        budget: i64
    ) -> Result<Plan, PlannerError> {
        let range = RangeOfDates::new(start, end)?;
        self.optimize_range(&range, holidays, budget)
    }

    pub fn optimize_range(
        &self,
        range: &RangeOfDates,
        holidays: &HashSet<NaiveDate>,
        budget: i64
    ) -> Result<Plan, PlannerError> {
        let budget = validate_budget(budget)?;

        let ignored = holidays.iter().filter(|d| !range.contain(**d)).count();
        if ignored > 0 {
            warn!(ignored, "holidays outside the planning window are ignored");
        }

        let weekends = self.options.weekends;
        let days = range
            .iter()
            .map(|d| CalendarDay::new(d, weekends.is_weekend(d), holidays.contains(&d)))
            .collect();
        Ok(self.plan_days(days, budget))
    }

    /// Plans leave over `[start, end]` taking weekends and public holidays
    /// from `calendar`. The optimizer's own weekend set is not used.
    pub fn optimize_with_calendar(
        &self,
        calendar: &dyn HolidayCalendar,
        start: NaiveDate,
        end: NaiveDate,
        budget: i64
    ) -> Result<Plan, PlannerError> {
        let range = RangeOfDates::new(start, end)?;
        let budget = validate_budget(budget)?;

        let holidays = calendar.holidays_between(&range);
        let days = range
            .iter()
            .map(|d| CalendarDay::new(d, calendar.is_weekend(d), holidays.contains(&d)))
            .collect();
        Ok(self.plan_days(days, budget))
    }

    fn plan_days(&self, mut days: Vec<CalendarDay>, budget: usize) -> Plan {
        let mut remaining = self.bridge_gaps(&mut days, budget);
        if self.options.extend_streaks {
            remaining = self.grow_streaks(&mut days, remaining);
        }

        let plan = Plan::new(days, budget);
        info!(
            start = %plan.start_date(),
            end = %plan.end_date(),
            leave_used = plan.leave_used(),
            unused = remaining,
            total_rest = plan.total_rest_days(),
            streaks = plan.streaks().len(),
            "leave plan ready"
        );
        plan
    }

    fn is_assignable(&self, day: &CalendarDay) -> bool {
        day.is_working() && self.options.is_preferred(day.date())
    }

    fn is_bridgeable(&self, days: &[CalendarDay], gap: &Gap) -> bool {
        if self.options.max_bridge_length.is_some_and(|max| gap.len() > max) {
            return false;
        }
        days[gap.first..=gap.last].iter().all(|d| self.is_assignable(d))
    }

    /// Returns the budget left after bridging.
    fn bridge_gaps(&self, days: &mut [CalendarDay], budget: usize) -> usize {
        let mut gaps: Vec<Gap> = find_gaps(days)
            .into_iter()
            .filter(|gap| self.is_bridgeable(days, gap))
            .collect();
        gaps.sort_by_key(|gap| (gap.len(), gap.first));

        let mut remaining = budget;
        for gap in gaps {
            // sorted ascending: once a gap is too long, so is every later one
            if gap.len() > remaining {
                break;
            }
            for day in days[gap.first..=gap.last].iter_mut() {
                day.assign_leave();
            }
            remaining -= gap.len();
            debug!(
                from = %days[gap.first].date(),
                to = %days[gap.last].date(),
                len = gap.len(),
                remaining,
                "bridged gap"
            );
        }
        remaining
    }

    /// Whether growth may take day `i`. The last working day of a gap
    /// longer than `max_bridge_length` is never taken, so such a gap is
    /// never bridged one day at a time.
    fn can_grow_into(&self, days: &[CalendarDay], capped: &[Gap], i: usize) -> bool {
        if !self.is_assignable(&days[i]) {
            return false;
        }
        let closes_capped = capped
            .iter()
            .find(|gap| gap.first <= i && i <= gap.last)
            .is_some_and(|gap| (gap.first..=gap.last).all(|k| k == i || days[k].is_leave()));
        !closes_capped
    }

    /// Spends leftover leave next to the longest streak that can still grow,
    /// earliest streak and earlier side first. Without such a streak the
    /// earliest assignable working day starts a new one. Returns the budget
    /// that could not be placed.
    fn grow_streaks(&self, days: &mut [CalendarDay], budget: usize) -> usize {
        let capped: Vec<Gap> = match self.options.max_bridge_length {
            Some(max) => find_base_gaps(days).into_iter().filter(|gap| gap.len() > max).collect(),
            None => Vec::new()
        };
        let mut remaining = budget;

        while remaining > 0 {
            let target = streak_spans(days)
                .into_iter()
                .filter_map(|(first, last)| {
                    let before = first
                        .checked_sub(1)
                        .filter(|&i| self.can_grow_into(days, &capped, i));
                    let after = Some(last + 1)
                        .filter(|&i| i < days.len() && self.can_grow_into(days, &capped, i));
                    before.or(after).map(|i| (last - first + 1, first, i))
                })
                .min_by_key(|&(len, first, _)| (Reverse(len), first))
                .map(|(_, _, i)| i)
                .or_else(|| (0..days.len()).find(|&i| self.can_grow_into(days, &capped, i)));

            let Some(i) = target else {
                break;
            };
            days[i].assign_leave();
            remaining -= 1;
            debug!(date = %days[i].date(), remaining, "extended streak");
        }

        remaining
    }
}

fn validate_budget(budget: i64) -> Result<usize, PlannerError> {
    usize::try_from(budget).map_err(|_| PlannerError::InvalidBudget { budget })
}
