use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{
    Datelike,
    NaiveDate,
    Weekday
};

use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::recurringholiday::recurringholiday::RecurringHoliday;
use crate::time::weekendmask::WeekendMask;

const ADDITIONAL_HOLIDAY_NAME: &str = "Additional holiday";
const MAX_SUBSTITUTE_SHIFT: usize = 14;

/// A recurring rule together with the name it is published under.
#[derive(Clone)]
pub struct NamedRecurringHoliday {
    name: String,
    rule: Arc<dyn RecurringHoliday>
}

impl NamedRecurringHoliday {
    pub fn new(name: String, rule: Arc<dyn RecurringHoliday>) -> NamedRecurringHoliday {
        NamedRecurringHoliday { name, rule }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> &Arc<dyn RecurringHoliday> {
        &self.rule
    }
}

pub struct SimpleCalendar {
    weekends: WeekendMask,
    recurring_holidays: Vec<NamedRecurringHoliday>,
    additional_holidays: HashSet<NaiveDate>,
    additional_business_days: HashSet<NaiveDate>
}

impl SimpleCalendar {
    /// Creates a new SimpleCalendar.
    ///
    /// # Arguments
    /// * `weekends` - Set of weekdays that are considered weekends
    /// * `recurring_holidays` - List of named recurring holiday rules
    /// * `additional_holidays` - One-time holidays
    /// * `additional_business_days` - Working days that override weekends and holidays
    pub fn new(
        weekends: HashSet<Weekday>,
        recurring_holidays: Vec<NamedRecurringHoliday>,
        additional_holidays: Vec<NaiveDate>,
        additional_business_days: Vec<NaiveDate>
    ) -> SimpleCalendar {
        SimpleCalendar {
            weekends: WeekendMask::new(&weekends),
            recurring_holidays,
            additional_holidays: additional_holidays.into_iter().collect(),
            additional_business_days: additional_business_days.into_iter().collect()
        }
    }

    pub fn recurring_holidays(&self) -> &[NamedRecurringHoliday] {
        &self.recurring_holidays
    }

    pub fn additional_business_days(&self) -> &HashSet<NaiveDate> {
        &self.additional_business_days
    }

    /// Recurring holidays observed in `year`, with their names. Nominal
    /// dates are placed first; a substitute that lands on a date already
    /// taken moves on to the next free business day.
    pub fn observed_recurring_holidays(&self, year: i32) -> Vec<(NaiveDate, &str)> {
        let mut observed = Vec::with_capacity(16);
        let mut substitutes = Vec::new();

        for r in self.recurring_holidays.iter() {
            let mut dates: Vec<NaiveDate> = r.rule.get_holiday(year).into_iter().collect();
            dates.sort();
            for d in dates {
                if r.rule.is_substitute(&d) {
                    substitutes.push((d, r.name.as_str()));
                } else {
                    observed.push((d, r.name.as_str()));
                }
            }
        }

        let mut taken: HashSet<NaiveDate> = observed.iter().map(|(d, _)| *d).collect();
        for (d, name) in substitutes {
            let free = d
                .iter_days()
                .take(MAX_SUBSTITUTE_SHIFT)
                .find(|x| !taken.contains(x) && !self.weekends.is_weekend(*x))
                .unwrap_or(d);
            taken.insert(free);
            observed.push((free, name));
        }

        observed
    }

    pub fn is_recurring_holiday(&self, d: NaiveDate) -> bool {
        // a substitute for late December can be pushed into January
        (d.year() - 1..=d.year())
            .any(|year| self.observed_recurring_holidays(year).iter().any(|(h, _)| *h == d))
    }

    #[inline]
    pub fn is_additional_holiday(&self, d: NaiveDate) -> bool {
        self.additional_holidays.contains(&d)
    }

    #[inline]
    pub fn is_additional_business_day(&self, d: NaiveDate) -> bool {
        self.additional_business_days.contains(&d)
    }
}

impl HolidayCalendar for SimpleCalendar {
    fn weekends(&self) -> WeekendMask {
        self.weekends
    }

    fn is_weekend(&self, d: NaiveDate) -> bool {
        self.weekends.is_weekend(d) && !self.is_additional_business_day(d)
    }

    fn is_public_holiday(&self, d: NaiveDate) -> bool {
        if self.is_additional_business_day(d) {
            return false;
        }
        if self.is_additional_holiday(d) {
            return true;
        }
        // recurring rules are evaluated per call, check them last
        self.is_recurring_holiday(d)
    }

    fn get_holiday_set(&self, year: i32) -> HashSet<NaiveDate> {
        let mut holiday_set = HashSet::with_capacity(16);

        holiday_set.extend(self.observed_recurring_holidays(year).into_iter().map(|(d, _)| d));

        holiday_set.extend(
            self.additional_holidays
                .iter()
                .filter(|d| d.year() == year)
                .copied()
        );

        for b_day in self.additional_business_days.iter().filter(|d| d.year() == year) {
            holiday_set.remove(b_day);
        }

        holiday_set
    }

    fn get_named_holidays(&self, year: i32) -> BTreeMap<NaiveDate, String> {
        let mut named: BTreeMap<NaiveDate, String> = BTreeMap::new();

        let mut add = |d: NaiveDate, name: &str| {
            named
                .entry(d)
                .and_modify(|existing| {
                    existing.push_str("; ");
                    existing.push_str(name);
                })
                .or_insert_with(|| name.to_owned());
        };

        for (d, name) in self.observed_recurring_holidays(year) {
            add(d, name);
        }

        for &d in self.additional_holidays.iter().filter(|d| d.year() == year) {
            add(d, ADDITIONAL_HOLIDAY_NAME);
        }

        named.retain(|d, _| !self.is_additional_business_day(*d));
        named
    }
}
