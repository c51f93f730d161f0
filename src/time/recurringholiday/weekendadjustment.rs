use std::collections::HashMap;

use chrono::{
    Datelike,
    Duration,
    NaiveDate,
    Weekday
};
use serde::{
    Serialize,
    Deserialize
};

/// Where a holiday moves when it lands on a weekend day.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum WeekendAdjustment {
    Unadjusted = 0,
    NextWeekday = 1,
    PreviousWeekday = -1
}

/// Substitute-day rule indexed by weekday (0=Monday, 6=Sunday).
///
/// Every key of the adjustment map counts as a weekend day when walking to
/// the substitute, so `{Sat: NextWeekday, Sun: NextWeekday}` moves a
/// Saturday holiday two days forward to Monday.
#[derive(Clone, Debug)]
pub struct WeekendAdjustmentRule {
    // None means the holiday is observed on its own date
    rule: [Option<i64>; 7]
}

impl WeekendAdjustmentRule {
    pub fn new(adjustment_map: &HashMap<Weekday, WeekendAdjustment>) -> WeekendAdjustmentRule {
        let mut rule: [Option<i64>; 7] = [None; 7];

        for (&weekday, &adj) in adjustment_map {
            if adj == WeekendAdjustment::Unadjusted {
                continue;
            }

            let step = if adj == WeekendAdjustment::NextWeekday {
                Weekday::succ
            } else {
                Weekday::pred
            };

            let mut to_weekday = weekday;
            let mut shift_days = 0i64;
            // bounded by 7: a map covering every weekday would otherwise spin
            while adjustment_map.contains_key(&to_weekday) && shift_days.abs() < 7 {
                to_weekday = step(&to_weekday);
                shift_days += adj as i64;
            }

            let idx = weekday.num_days_from_monday() as usize;
            rule[idx] = Some(shift_days);
        }

        WeekendAdjustmentRule { rule }
    }

    pub fn unadjusted() -> WeekendAdjustmentRule {
        WeekendAdjustmentRule { rule: [None; 7] }
    }

    /// Number of weekdays that carry a shift.
    pub fn n_adjusted(&self) -> usize {
        self.rule.iter().filter(|r| r.is_some()).count()
    }

    pub fn adjustment_map(&self) -> HashMap<Weekday, WeekendAdjustment> {
        let mut result: HashMap<Weekday, WeekendAdjustment> = HashMap::new();

        for (day_offset, shift) in self.rule.iter().enumerate() {
            if let (Some(shift), Ok(weekday)) = (shift, Weekday::try_from(day_offset as u8)) {
                let adjustment = match *shift {
                    n if n > 0 => WeekendAdjustment::NextWeekday,
                    n if n < 0 => WeekendAdjustment::PreviousWeekday,
                    _ => WeekendAdjustment::Unadjusted,
                };
                result.insert(weekday, adjustment);
            }
        }

        result
    }

    #[inline]
    pub fn adjust(&self, d: NaiveDate) -> NaiveDate {
        let idx = d.weekday().num_days_from_monday() as usize;

        match self.rule[idx] {
            Some(shift) => d + Duration::days(shift),
            None => d,
        }
    }
}
