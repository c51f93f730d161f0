use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use super::recurringholiday::RecurringHoliday;

/// The latest given weekday falling on or before a fixed date, e.g. Canada's
/// Victoria Day (the Monday on or before May 24).
#[derive(Clone, Debug)]
pub struct WeekdayOnOrBeforeHoliday {
    month: u32,
    day: u32,
    weekday: Weekday,
}

impl WeekdayOnOrBeforeHoliday {
    pub fn new(month: u32, day: u32, weekday: Weekday) -> Option<WeekdayOnOrBeforeHoliday> {
        // reject Feb 29 too, it would vanish in three years out of four
        NaiveDate::from_ymd_opt(2001, month, day)?;
        Some(WeekdayOnOrBeforeHoliday { month, day, weekday })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }
}

impl RecurringHoliday for WeekdayOnOrBeforeHoliday {
    fn get_holiday(&self, year: i32) -> HashSet<NaiveDate> {
        let Some(anchor) = NaiveDate::from_ymd_opt(year, self.month, self.day) else {
            return HashSet::new();
        };

        let days_back = (anchor.weekday().num_days_from_monday() + 7
                         - self.weekday.num_days_from_monday()) % 7;

        anchor
            .checked_sub_days(Days::new(days_back as u64))
            .into_iter()
            .collect()
    }
}
