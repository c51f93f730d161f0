use chrono::{
    Datelike,
    NaiveDate,
    Weekday
};

/// Weekend days packed into a bitmask.
/// Each bit represents a day: Mon(0), Tue(1), ..., Sun(6)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeekendMask(u8);

impl WeekendMask {
    pub fn new<'a, I>(weekends: I) -> Self
    where
        I: IntoIterator<Item = &'a Weekday>
    {
        let mut mask = 0u8;
        for &weekday in weekends {
            mask |= 1u8 << weekday.num_days_from_monday();
        }
        WeekendMask(mask)
    }

    /// Saturday and Sunday.
    pub const fn saturday_sunday() -> Self {
        WeekendMask(0b110_0000)
    }

    pub const fn none() -> Self {
        WeekendMask(0)
    }

    #[inline]
    pub fn is_weekend_day(&self, weekday: Weekday) -> bool {
        let bit = 1u8 << weekday.num_days_from_monday();
        (self.0 & bit) != 0
    }

    #[inline]
    pub fn is_weekend(&self, d: NaiveDate) -> bool {
        self.is_weekend_day(d.weekday())
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Weekend weekdays in Monday-first order.
    pub fn weekend_list(&self) -> Vec<Weekday> {
        let mut weekdays = Vec::with_capacity(7);
        for day in 0..7u8 {
            if (self.0 & (1u8 << day)) != 0 {
                if let Ok(weekday) = Weekday::try_from(day) {
                    weekdays.push(weekday);
                }
            }
        }
        weekdays
    }
}

impl Default for WeekendMask {
    fn default() -> Self {
        WeekendMask::saturday_sunday()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_saturday_sunday() {
        let mask = WeekendMask::default();
        assert_eq!(mask.weekend_list(), vec![Weekday::Sat, Weekday::Sun]);
        assert_eq!(mask, WeekendMask::new(&[Weekday::Sun, Weekday::Sat]));
    }

    #[test]
    fn friday_saturday_weekend() {
        let mask = WeekendMask::new(&[Weekday::Fri, Weekday::Sat]);
        // 2025-06-13 is a Friday
        assert!(mask.is_weekend(NaiveDate::from_ymd_opt(2025, 6, 13).unwrap()));
        assert!(!mask.is_weekend(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()));
    }

    #[test]
    fn empty_mask() {
        assert!(WeekendMask::none().is_empty());
        assert!(WeekendMask::none().weekend_list().is_empty());
    }
}
