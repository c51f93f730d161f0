use std::collections::HashSet;

use chrono::{
    NaiveDate,
    Weekday
};

use super::recurringholiday::RecurringHoliday;

/// The n-th given weekday of a month, e.g. the 4th Thursday of November.
#[derive(Clone, Debug)]
pub struct NthWeekdayHoliday {
    month: u32,
    n: u8,
    weekday: Weekday,
}

impl NthWeekdayHoliday {
    pub fn new(month: u32, n: u8, weekday: Weekday) -> Option<NthWeekdayHoliday> {
        if !(1..=12).contains(&month) || !(1..=5).contains(&n) {
            None
        } else {
            Some(NthWeekdayHoliday { month, n, weekday })
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn n(&self) -> u8 {
        self.n
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }
}

impl RecurringHoliday for NthWeekdayHoliday {
    fn get_holiday(&self, year: i32) -> HashSet<NaiveDate> {
        // a fifth occurrence does not exist in every month
        NaiveDate::from_weekday_of_month_opt(year, self.month, self.weekday, self.n)
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn us_thanksgiving() {
        let thanksgiving = NthWeekdayHoliday::new(11, 4, Weekday::Thu).unwrap();
        assert!(thanksgiving.is_holiday(&NaiveDate::from_ymd_opt(2025, 11, 27).unwrap()));
        assert!(thanksgiving.is_holiday(&NaiveDate::from_ymd_opt(2024, 11, 28).unwrap()));
    }

    #[test]
    fn missing_fifth_occurrence() {
        // February 2025 has only four Mondays
        let fifth_monday = NthWeekdayHoliday::new(2, 5, Weekday::Mon).unwrap();
        assert!(fifth_monday.get_holiday(2025).is_empty());
    }

    #[test]
    fn rejects_out_of_range_parameters() {
        assert!(NthWeekdayHoliday::new(0, 1, Weekday::Mon).is_none());
        assert!(NthWeekdayHoliday::new(1, 6, Weekday::Mon).is_none());
    }
}
