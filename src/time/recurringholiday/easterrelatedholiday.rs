use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::recurringholiday::RecurringHoliday;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum EasterType {
    Western,
    Orthodox
}

/// A holiday at a fixed day offset from Easter Sunday
/// (Good Friday = -2, Easter Monday = +1, Ascension = +39, Whit Monday = +50).
#[derive(Clone, Debug)]
pub struct EasterRelatedHoliday {
    easter_type: EasterType,
    shift_days: i32
}

impl EasterRelatedHoliday {
    pub fn new(easter_type: EasterType, shift_days: i32) -> Option<EasterRelatedHoliday> {
        // keep the shifted day inside the same year
        if !(-80..=80).contains(&shift_days) {
            return None;
        }
        Some(EasterRelatedHoliday {
            easter_type,
            shift_days
        })
    }

    pub fn easter_type(&self) -> EasterType {
        self.easter_type
    }

    pub fn shift_days(&self) -> i32 {
        self.shift_days
    }

    /// Easter Sunday in the Gregorian calendar, for years 1583..=4099.
    pub fn easter_sunday(easter_type: EasterType, year: i32) -> Option<NaiveDate> {
        if !(1583..=4099).contains(&year) {
            return None;
        }

        let g = year % 19;

        let p = match easter_type {
            EasterType::Orthodox => {
                let i = (19 * g + 15) % 30;
                let j = (year + year / 4 + i) % 7;
                let e = if year <= 1600 {
                    10
                } else {
                    10 + year / 100 - 16 - (year / 100 - 16) / 4
                };
                i - j + e
            },
            EasterType::Western => {
                let c = year / 100;
                let c_div_4 = c / 4;
                let h = (c - c_div_4 - (8 * c + 13) / 25 + 19 * g + 15) % 30;
                let h_div_28 = h / 28;
                let i = h - h_div_28 * (1 - h_div_28 * (29 / (h + 1)) * ((21 - g) / 11));
                let j = (year + year / 4 + i + 2 - c + c_div_4) % 7;
                i - j
            }
        };

        let day = 1 + (p + 27 + (p + 6) / 40) % 31;
        let month = 3 + (p + 26) / 30;

        NaiveDate::from_ymd_opt(year, month as u32, day as u32)
    }
}

impl RecurringHoliday for EasterRelatedHoliday {
    fn get_holiday(&self, year: i32) -> HashSet<NaiveDate> {
        EasterRelatedHoliday::easter_sunday(self.easter_type, year)
            .map(|easter| easter + Duration::days(self.shift_days as i64))
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn western_easter_sundays() {
        assert_eq!(EasterRelatedHoliday::easter_sunday(EasterType::Western, 2024), Some(ymd(2024, 3, 31)));
        assert_eq!(EasterRelatedHoliday::easter_sunday(EasterType::Western, 2025), Some(ymd(2025, 4, 20)));
        assert_eq!(EasterRelatedHoliday::easter_sunday(EasterType::Western, 2026), Some(ymd(2026, 4, 5)));
    }

    #[test]
    fn orthodox_easter_sundays() {
        assert_eq!(EasterRelatedHoliday::easter_sunday(EasterType::Orthodox, 2024), Some(ymd(2024, 5, 5)));
        assert_eq!(EasterRelatedHoliday::easter_sunday(EasterType::Orthodox, 2025), Some(ymd(2025, 4, 20)));
    }

    #[test]
    fn good_friday_and_whit_monday() {
        let good_friday = EasterRelatedHoliday::new(EasterType::Western, -2).unwrap();
        assert!(good_friday.is_holiday(&ymd(2025, 4, 18)));
        let whit_monday = EasterRelatedHoliday::new(EasterType::Western, 50).unwrap();
        assert!(whit_monday.is_holiday(&ymd(2025, 6, 9)));
    }

    #[test]
    fn unsupported_year_yields_nothing() {
        let easter_monday = EasterRelatedHoliday::new(EasterType::Western, 1).unwrap();
        assert!(easter_monday.get_holiday(1500).is_empty());
    }
}
