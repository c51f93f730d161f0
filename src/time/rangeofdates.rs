use chrono::{
    Datelike,
    Days,
    NaiveDate
};

use crate::planner::plannererror::PlannerError;
use crate::time::utility::days_inclusive;

/// Inclusive window of calendar days. `start_date <= end_date` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeOfDates {
    start_date: NaiveDate,
    end_date: NaiveDate
}

impl RangeOfDates {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<RangeOfDates, PlannerError> {
        if end_date < start_date {
            Err(PlannerError::InvalidRange { start: start_date, end: end_date })
        } else {
            Ok(RangeOfDates { start_date, end_date })
        }
    }

    /// January 1st to December 31st of `year`.
    pub fn year(year: i32) -> Option<RangeOfDates> {
        let start_date = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let end_date = NaiveDate::from_ymd_opt(year, 12, 31)?;
        Some(RangeOfDates { start_date, end_date })
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

    pub fn contain(&self, d: NaiveDate) -> bool {
        (d >= self.start_date) && (d <= self.end_date)
    }

    /// Offset of `d` from the start of the range, if `d` lies inside it.
    pub fn index_of(&self, d: NaiveDate) -> Option<usize> {
        if self.contain(d) {
            Some((d - self.start_date).num_days() as usize)
        } else {
            None
        }
    }

    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.start_date.year()..=self.end_date.year()
    }

    pub fn iter(&self) -> RangeOfDatesIterator<'_> {
        RangeOfDatesIterator {
            range_of_dates: self,
            index: 0,
        }
    }

    pub fn to_vec(&self) -> Vec<NaiveDate> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a RangeOfDates {
    type Item = NaiveDate;
    type IntoIter = RangeOfDatesIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct RangeOfDatesIterator<'a> {
    range_of_dates: &'a RangeOfDates,
    index: usize,
}

impl Iterator for RangeOfDatesIterator<'_> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.range_of_dates.len() {
            let result = self.range_of_dates.start_date.checked_add_days(Days::new(self.index as u64));
            self.index += 1;
            result
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.range_of_dates.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_reversed_range() {
        let result = RangeOfDates::new(ymd(2025, 3, 2), ymd(2025, 3, 1));
        assert!(matches!(result, Err(PlannerError::InvalidRange { .. })));
    }

    #[test]
    fn single_day_range() {
        let range = RangeOfDates::new(ymd(2025, 3, 1), ymd(2025, 3, 1)).unwrap();
        assert_eq!(range.len(), 1);
        assert_eq!(range.to_vec(), vec![ymd(2025, 3, 1)]);
    }

    #[test]
    fn iterates_across_month_end() {
        let range = RangeOfDates::new(ymd(2024, 2, 27), ymd(2024, 3, 2)).unwrap();
        let days = range.to_vec();
        assert_eq!(days.len(), 5);
        assert_eq!(days[2], ymd(2024, 2, 29));
        assert_eq!(range.index_of(ymd(2024, 3, 1)), Some(3));
        assert_eq!(range.index_of(ymd(2024, 3, 3)), None);
    }

    #[test]
    fn whole_year() {
        let range = RangeOfDates::year(2024).unwrap();
        assert_eq!(range.len(), 366);
        assert_eq!(range.years(), 2024..=2024);
    }
}
