use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::planner::calendarday::CalendarDay;
use crate::planner::streak::{Streak, find_streaks};

/// How well a plan converts leave into time off, measured by
/// [`Plan::efficiency`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EfficiencyRating {
    Excellent,
    Good,
    Fair,
    NoLeave
}

impl EfficiencyRating {
    pub fn from_ratio(ratio: f64, leave_used: usize) -> EfficiencyRating {
        if leave_used == 0 {
            EfficiencyRating::NoLeave
        } else if ratio > 3.0 {
            EfficiencyRating::Excellent
        } else if ratio > 2.0 {
            EfficiencyRating::Good
        } else {
            EfficiencyRating::Fair
        }
    }
}

/// Day counts by category for the whole window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PlanBreakdown {
    pub weekend_days: usize,
    pub public_holidays: usize,
    pub leave_days: usize,
    pub total_days_off: usize
}

/// The outcome of an optimization: which days to take as leave and the
/// streaks of rest that result.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Plan {
    start_date: NaiveDate,
    end_date: NaiveDate,
    budget: usize,
    days: Vec<CalendarDay>,
    leave_days: Vec<NaiveDate>,
    streaks: Vec<Streak>,
    unused_leave: usize
}

impl Plan {
    pub(crate) fn new(days: Vec<CalendarDay>, budget: usize) -> Plan {
        let leave_days: Vec<NaiveDate> = days.iter().filter(|d| d.is_leave()).map(|d| d.date()).collect();
        let streaks = find_streaks(&days);
        let unused_leave = budget.saturating_sub(leave_days.len());
        // the window is never empty
        let start_date = days.first().map(|d| d.date()).unwrap_or_default();
        let end_date = days.last().map(|d| d.date()).unwrap_or_default();
        Plan {
            start_date,
            end_date,
            budget,
            days,
            leave_days,
            streaks,
            unused_leave
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    /// Assigned leave days in ascending order.
    pub fn leave_days(&self) -> &[NaiveDate] {
        &self.leave_days
    }

    /// Streaks in ascending order of start date.
    pub fn streaks(&self) -> &[Streak] {
        &self.streaks
    }

    pub fn leave_used(&self) -> usize {
        self.leave_days.len()
    }

    pub fn unused_leave(&self) -> usize {
        self.unused_leave
    }

    pub fn is_leave(&self, d: NaiveDate) -> bool {
        self.leave_days.binary_search(&d).is_ok()
    }

    /// All rest days in the window: weekends, holidays and leave.
    pub fn total_rest_days(&self) -> usize {
        self.days.iter().filter(|d| d.is_rest()).count()
    }

    pub fn longest_streak(&self) -> Option<&Streak> {
        // earliest streak wins a tie
        self.streaks
            .iter()
            .rev()
            .max_by_key(|s| s.len())
    }

    /// Days off gained per leave day: total length of the streaks that
    /// contain leave, divided by the leave used. Zero when no leave is used.
    pub fn efficiency(&self) -> f64 {
        let used = self.leave_used();
        if used == 0 {
            return 0.0;
        }
        let days_off: usize = self.streaks
            .iter()
            .filter(|s| s.leave_days() > 0)
            .map(|s| s.len())
            .sum();
        days_off as f64 / used as f64
    }

    pub fn efficiency_rating(&self) -> EfficiencyRating {
        EfficiencyRating::from_ratio(self.efficiency(), self.leave_used())
    }

    pub fn breakdown(&self) -> PlanBreakdown {
        PlanBreakdown {
            weekend_days: self.days.iter().filter(|d| d.is_weekend()).count(),
            public_holidays: self.days.iter().filter(|d| d.is_holiday()).count(),
            leave_days: self.leave_used(),
            total_days_off: self.total_rest_days()
        }
    }

    /// Leave days grouped by (year, month).
    pub fn leave_by_month(&self) -> BTreeMap<(i32, u32), Vec<NaiveDate>> {
        let mut grouped: BTreeMap<(i32, u32), Vec<NaiveDate>> = BTreeMap::new();
        for &d in self.leave_days.iter() {
            grouped.entry((d.year(), d.month())).or_default().push(d);
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use chrono::Days;

    use super::*;

    // Mon 2025-06-02 .. Sun 2025-06-15
    fn two_weeks(leave: &[u64]) -> Plan {
        let start = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let days = (0..14u64)
            .map(|i| {
                let date = start + Days::new(i);
                let weekend = i % 7 >= 5;
                let mut day = CalendarDay::new(date, weekend, false);
                if leave.contains(&i) {
                    day.assign_leave();
                }
                day
            })
            .collect();
        Plan::new(days, 3)
    }

    #[test]
    fn counts_and_unused() {
        let plan = two_weeks(&[4]);
        assert_eq!(plan.leave_used(), 1);
        assert_eq!(plan.unused_leave(), 2);
        assert_eq!(plan.total_rest_days(), 5);
        assert_eq!(plan.breakdown(), PlanBreakdown {
            weekend_days: 4,
            public_holidays: 0,
            leave_days: 1,
            total_days_off: 5
        });
    }

    #[test]
    fn efficiency_of_long_weekend() {
        let plan = two_weeks(&[4]);
        assert_eq!(plan.longest_streak().map(|s| s.len()), Some(3));
        assert!((plan.efficiency() - 3.0).abs() < 1e-12);
        assert_eq!(plan.efficiency_rating(), EfficiencyRating::Good);
    }

    #[test]
    fn no_leave_has_zero_efficiency() {
        let plan = two_weeks(&[]);
        assert_eq!(plan.efficiency(), 0.0);
        assert_eq!(plan.efficiency_rating(), EfficiencyRating::NoLeave);
        // both weekends have length 2, the earlier one is reported
        assert_eq!(
            plan.longest_streak().map(|s| s.start_date()),
            NaiveDate::from_ymd_opt(2025, 6, 7)
        );
    }

    #[test]
    fn grouped_by_month() {
        let plan = two_weeks(&[0, 7]);
        let grouped = plan.leave_by_month();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[&(2025, 6)].len(), 2);
        assert!(plan.is_leave(NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()));
    }
}
