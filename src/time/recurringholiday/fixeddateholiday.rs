use std::collections::{HashMap, HashSet};

use chrono::{
    Datelike,
    NaiveDate,
    Weekday
};

use super::recurringholiday::RecurringHoliday;
use super::weekendadjustment::{
    WeekendAdjustment,
    WeekendAdjustmentRule
};

/// Which neighbouring year's occurrence can be shifted into the current one.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum YearSpillCheck {
    // early January date may be observed in late December of the year before
    FromNextYear = 1,
    // late December date may be observed in early January of the year after
    FromPreviousYear = -1,
    None
}

#[derive(Clone, Debug)]
pub struct FixedDateHoliday {
    month: u32,
    day: u32,
    weekend_adjustment_rule: WeekendAdjustmentRule,
    spill_check: YearSpillCheck
}

impl FixedDateHoliday {
    /// Returns `None` when `month`/`day` never form a valid date.
    pub fn new(month: u32, day: u32, weekend_adjustment_map: &HashMap<Weekday, WeekendAdjustment>) -> Option<FixedDateHoliday> {
        // 2000 is a leap year, so Feb 29 is accepted
        NaiveDate::from_ymd_opt(2000, month, day)?;

        let weekend_adjustment_rule = WeekendAdjustmentRule::new(weekend_adjustment_map);
        let n_weekend = weekend_adjustment_rule.n_adjusted() as u32;
        let spill_check = if n_weekend > 0 {
            if month == 1 && day <= n_weekend {
                YearSpillCheck::FromNextYear
            } else if month == 12 && day > 31 - n_weekend {
                YearSpillCheck::FromPreviousYear
            } else {
                YearSpillCheck::None
            }
        } else {
            YearSpillCheck::None
        };

        Some(FixedDateHoliday {
            month,
            day,
            weekend_adjustment_rule,
            spill_check
        })
    }

    pub fn unadjusted(month: u32, day: u32) -> Option<FixedDateHoliday> {
        FixedDateHoliday::new(month, day, &HashMap::new())
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn weekend_adjustment_rule(&self) -> &WeekendAdjustmentRule {
        &self.weekend_adjustment_rule
    }

    fn observed_in(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .map(|d| self.weekend_adjustment_rule.adjust(d))
    }
}

impl RecurringHoliday for FixedDateHoliday {
    fn get_holiday(&self, year: i32) -> HashSet<NaiveDate> {
        let mut holiday_set = HashSet::new();

        if let Some(d1) = self.observed_in(year) {
            if d1.year() == year {
                holiday_set.insert(d1);
            }
        }

        if self.spill_check != YearSpillCheck::None {
            if let Some(d2) = self.observed_in(year + self.spill_check as i32) {
                if d2.year() == year {
                    holiday_set.insert(d2);
                }
            }
        }

        holiday_set
    }

    fn is_substitute(&self, d: &NaiveDate) -> bool {
        d.month() != self.month || d.day() != self.day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn us_federal() -> HashMap<Weekday, WeekendAdjustment> {
        HashMap::from([
            (Weekday::Sat, WeekendAdjustment::PreviousWeekday),
            (Weekday::Sun, WeekendAdjustment::NextWeekday),
        ])
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(FixedDateHoliday::unadjusted(2, 30).is_none());
        assert!(FixedDateHoliday::unadjusted(13, 1).is_none());
        assert!(FixedDateHoliday::unadjusted(2, 29).is_some());
    }

    #[test]
    fn new_year_observed_in_previous_december() {
        // 2022-01-01 is a Saturday, observed Friday 2021-12-31
        let new_year = FixedDateHoliday::new(1, 1, &us_federal()).unwrap();
        assert!(new_year.get_holiday(2021).contains(&ymd(2021, 12, 31)));
        assert!(new_year.get_holiday(2022).is_empty());
    }

    #[test]
    fn christmas_spills_into_january() {
        let sat_sun_next = HashMap::from([
            (Weekday::Sat, WeekendAdjustment::NextWeekday),
            (Weekday::Sun, WeekendAdjustment::NextWeekday),
        ]);
        // 2022-12-31 is a Saturday, pushed to Monday 2023-01-02
        let nye = FixedDateHoliday::new(12, 31, &sat_sun_next).unwrap();
        assert!(nye.get_holiday(2023).contains(&ymd(2023, 1, 2)));
        assert!(nye.get_holiday(2022).is_empty());
    }

    #[test]
    fn substitute_days_are_flagged() {
        let christmas = FixedDateHoliday::new(12, 25, &us_federal()).unwrap();
        // 2022-12-25 is a Sunday, observed Monday 26th
        assert!(christmas.is_substitute(&ymd(2022, 12, 26)));
        assert!(!christmas.is_substitute(&ymd(2025, 12, 25)));
    }

    #[test]
    fn leap_day_only_in_leap_years() {
        let leap_day = FixedDateHoliday::unadjusted(2, 29).unwrap();
        assert_eq!(leap_day.get_holiday(2024).len(), 1);
        assert!(leap_day.get_holiday(2025).is_empty());
    }
}
