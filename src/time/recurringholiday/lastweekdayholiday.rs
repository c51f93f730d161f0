use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use super::recurringholiday::RecurringHoliday;
use crate::time::utility::days_of_month;

/// The last given weekday of a month, e.g. the last Monday of May.
#[derive(Clone, Debug)]
pub struct LastWeekdayHoliday {
    month: u32,
    weekday: Weekday,
}

impl LastWeekdayHoliday {
    pub fn new(month: u32, weekday: Weekday) -> Option<LastWeekdayHoliday> {
        if !(1..=12).contains(&month) {
            None
        } else {
            Some(LastWeekdayHoliday { month, weekday })
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }
}

impl RecurringHoliday for LastWeekdayHoliday {
    fn get_holiday(&self, year: i32) -> HashSet<NaiveDate> {
        let Some(end_of_month) = NaiveDate::from_ymd_opt(year, self.month, days_of_month(year, self.month)) else {
            return HashSet::new();
        };

        let days_back = (end_of_month.weekday().num_days_from_monday() + 7
                         - self.weekday.num_days_from_monday()) % 7;

        end_of_month
            .checked_sub_days(Days::new(days_back as u64))
            .into_iter()
            .collect()
    }
}
