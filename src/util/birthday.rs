//! Birthday arithmetic for the reminder list.
//!
//! Birthdays on 29 February are celebrated on 1 March in non-leap years.

#[cfg(test)]
#[path = "birthday_test.rs"]
mod birthday_test;

use chrono::{Datelike, NaiveDate};

/// The birthday for `birthdate` in `year`.
fn birthday_in(birthdate: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birthdate.month(), birthdate.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// Next birthday on or after `today`.
pub fn next_birthday(birthdate: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = birthday_in(birthdate, today.year())?;
    if this_year >= today { Some(this_year) } else { birthday_in(birthdate, today.year() + 1) }
}

/// Days from `today` until the next birthday; 0 means today.
pub fn days_until(birthdate: NaiveDate, today: NaiveDate) -> Option<i64> {
    next_birthday(birthdate, today).map(|next| (next - today).num_days())
}

/// Completed years on `today`. `None` for dates in the future.
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> Option<u32> {
    if birthdate > today {
        return None;
    }
    let had_birthday = birthday_in(birthdate, today.year()).is_some_and(|b| b <= today);
    let years = today.year() - birthdate.year() - i32::from(!had_birthday);
    u32::try_from(years).ok()
}

/// Whether the next birthday falls within `window_days` of `today` (inclusive).
pub fn is_upcoming(birthdate: NaiveDate, today: NaiveDate, window_days: i64) -> bool {
    days_until(birthdate, today).is_some_and(|days| days <= window_days)
}

/// Today in the browser's local time zone.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
