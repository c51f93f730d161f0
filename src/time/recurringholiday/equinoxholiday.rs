use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::recurringholiday::RecurringHoliday;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum EquinoxType {
    Vernal,
    Autumnal
}

/// Day of the March or September equinox in Japan Standard Time,
/// from the usual linear approximation. Valid for 1900..=2099.
#[derive(Clone, Debug)]
pub struct EquinoxHoliday {
    equinox_type: EquinoxType
}

impl EquinoxHoliday {
    pub fn new(equinox_type: EquinoxType) -> EquinoxHoliday {
        EquinoxHoliday { equinox_type }
    }

    pub fn equinox_type(&self) -> EquinoxType {
        self.equinox_type
    }

    pub fn equinox_day(equinox_type: EquinoxType, year: i32) -> Option<NaiveDate> {
        let (base, leap_anchor) = match year {
            1900..=1979 => (match equinox_type {
                EquinoxType::Vernal => 20.8357,
                EquinoxType::Autumnal => 23.2588
            }, 1983),
            1980..=2099 => (match equinox_type {
                EquinoxType::Vernal => 20.8431,
                EquinoxType::Autumnal => 23.2488
            }, 1980),
            _ => return None
        };

        let drift = (base + 0.242194 * (year - 1980) as f64).floor() as i32;
        let day = drift - (year - leap_anchor).div_euclid(4);
        let month = match equinox_type {
            EquinoxType::Vernal => 3,
            EquinoxType::Autumnal => 9
        };

        NaiveDate::from_ymd_opt(year, month, day as u32)
    }
}

impl RecurringHoliday for EquinoxHoliday {
    fn get_holiday(&self, year: i32) -> HashSet<NaiveDate> {
        EquinoxHoliday::equinox_day(self.equinox_type, year)
            .into_iter()
            .collect()
    }
}
