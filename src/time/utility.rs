use chrono::NaiveDate;

#[inline]
pub const fn is_leap(year: i32) -> bool {
    ((year % 4 == 0) && (year % 100 != 0)) || (year % 400 == 0)
}

pub const fn days_of_month(year: i32, month: u32) -> u32 {
    const NO_LEAP_EOM: [u32; 13] = [
        0, 31, 28, 31, 30,
        31, 30, 31, 31, 30,
        31, 30, 31
    ];

    const LEAP_EOM: [u32; 13] = [
        0, 31, 29, 31, 30,
        31, 30, 31, 31, 30,
        31, 30, 31
    ];

    if is_leap(year) {
        LEAP_EOM[month as usize]
    } else {
        NO_LEAP_EOM[month as usize]
    }
}

/// Number of calendar days in `[start, end]`, both ends included.
/// Returns 0 when `end` precedes `start`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> usize {
    let n = (end - start).num_days() + 1;
    n.max(0) as usize
}
