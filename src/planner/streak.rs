use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::planner::calendarday::CalendarDay;
use crate::time::utility::days_inclusive;

/// A maximal run of consecutive rest days inside the planning window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Streak {
    start_date: NaiveDate,
    end_date: NaiveDate,
    leave_days: usize
}

impl Streak {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, leave_days: usize) -> Streak {
        Streak { start_date, end_date, leave_days }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn len(&self) -> usize {
        days_inclusive(self.start_date, self.end_date)
    }

    /// Number of assigned leave days inside the streak.
    pub fn leave_days(&self) -> usize {
        self.leave_days
    }

    pub fn contains(&self, d: NaiveDate) -> bool {
        d >= self.start_date && d <= self.end_date
    }

    pub fn overlaps(&self, other: &Streak) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }
}

impl fmt::Display for Streak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {} ({} days", self.start_date, self.end_date, self.len())?;
        if self.leave_days > 0 {
            write!(f, ", {} leave", self.leave_days)?;
        }
        write!(f, ")")
    }
}

/// Collects the maximal rest runs of `days`, which must be consecutive and
/// in date order.
pub fn find_streaks(days: &[CalendarDay]) -> Vec<Streak> {
    streak_spans(days)
        .into_iter()
        .map(|(first, last)| {
            let leave_days = days[first..=last].iter().filter(|d| d.is_leave()).count();
            Streak::new(days[first].date(), days[last].date(), leave_days)
        })
        .collect()
}

/// Inclusive index spans of the rest runs of `days`.
pub(crate) fn streak_spans(days: &[CalendarDay]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut open: Option<usize> = None;

    for (i, day) in days.iter().enumerate() {
        match (day.is_rest(), open) {
            (true, None) => open = Some(i),
            (false, Some(first)) => {
                spans.push((first, i - 1));
                open = None;
            },
            _ => {}
        }
    }
    if let Some(first) = open {
        spans.push((first, days.len() - 1));
    }

    spans
}
