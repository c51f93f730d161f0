use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDate;

use crate::time::rangeofdates::RangeOfDates;
use crate::time::weekendmask::WeekendMask;

/// Source of weekends and public holidays for a country or organisation.
///
/// `Send + Sync` so calendars can be shared behind `Arc` in the registry.
pub trait HolidayCalendar: Send + Sync {
    fn weekends(&self) -> WeekendMask;

    fn is_public_holiday(&self, d: NaiveDate) -> bool;

    /// Public holidays observed in `year`. Plain weekend days are not included.
    fn get_holiday_set(&self, year: i32) -> HashSet<NaiveDate>;

    /// Public holidays observed in `year`, with their names.
    fn get_named_holidays(&self, year: i32) -> BTreeMap<NaiveDate, String>;

    fn is_weekend(&self, d: NaiveDate) -> bool {
        self.weekends().is_weekend(d)
    }

    fn is_business_day(&self, d: NaiveDate) -> bool {
        !self.is_weekend(d) && !self.is_public_holiday(d)
    }

    fn holidays_between(&self, range: &RangeOfDates) -> BTreeSet<NaiveDate> {
        range
            .years()
            .flat_map(|year| self.get_holiday_set(year))
            .filter(|d| range.contain(*d))
            .collect()
    }

    fn business_days_between(&self, range: &RangeOfDates) -> usize {
        range.iter().filter(|d| self.is_business_day(*d)).count()
    }
}
