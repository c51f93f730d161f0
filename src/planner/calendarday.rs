use chrono::NaiveDate;
use serde::Serialize;

/// One day of the planning window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    date: NaiveDate,
    is_weekend: bool,
    is_holiday: bool,
    is_leave: bool
}

impl CalendarDay {
    pub fn new(date: NaiveDate, is_weekend: bool, is_holiday: bool) -> CalendarDay {
        CalendarDay {
            date,
            is_weekend,
            is_holiday,
            is_leave: false
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_weekend(&self) -> bool {
        self.is_weekend
    }

    pub fn is_holiday(&self) -> bool {
        self.is_holiday
    }

    pub fn is_leave(&self) -> bool {
        self.is_leave
    }

    /// Weekend or holiday, before any leave is assigned.
    pub fn is_off(&self) -> bool {
        self.is_weekend || self.is_holiday
    }

    pub fn is_rest(&self) -> bool {
        self.is_off() || self.is_leave
    }

    pub fn is_working(&self) -> bool {
        !self.is_rest()
    }

    /// Marks a working day as leave. Rest days are left untouched and
    /// `false` is returned.
    pub(crate) fn assign_leave(&mut self) -> bool {
        if self.is_working() {
            self.is_leave = true;
            true
        } else {
            false
        }
    }
}
