use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

/// A rule that yields the dates a holiday falls on in a given year.
///
/// A rule may yield no date (e.g. Easter outside the supported years) or
/// more than one when a weekend substitution spills over from an adjacent
/// year.
pub trait RecurringHoliday: Send + Sync {

    fn get_holiday(&self, year: i32) -> HashSet<NaiveDate>;

    fn is_holiday(&self, d: &NaiveDate) -> bool {
        let holiday_set = self.get_holiday(d.year());
        holiday_set.contains(d)
    }

    /// Whether `d`, a date yielded by this rule, is a weekend substitute
    /// rather than the nominal day.
    fn is_substitute(&self, _d: &NaiveDate) -> bool {
        false
    }
}
