//! Day-granular calendar arithmetic shared by the picker engine.
//!
//! Week starts are expressed as an offset 0..=6 where 0 is Sunday, matching
//! the `weekStartsOn` option.

mod constraint;
mod grid;

pub use constraint::Constraints;
pub use grid::{GridDay, GRID_CELLS, month_grid, visible_week_count, weekday_header};

use chrono::{Datelike, Days, Months, NaiveDate, TimeDelta};

pub const DAYS_PER_WEEK: i64 = 7;

/// Signed number of calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Adds `n` days, saturating at the representable range.
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date.checked_add_signed(TimeDelta::days(n))
        .unwrap_or(if n < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

pub fn sub_days(date: NaiveDate, n: i64) -> NaiveDate {
    add_days(date, -n)
}

/// Adds `n` calendar months; the day clamps to the end of a shorter month.
pub fn add_months(date: NaiveDate, n: i32) -> NaiveDate {
    let months = Months::new(n.unsigned_abs());
    let shifted = if n < 0 {
        date.checked_sub_months(months)
    } else {
        date.checked_add_months(months)
    };
    shifted.unwrap_or(if n < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Subtracts calendar years by year field, so Feb 29 maps to Feb 28.
pub fn sub_years(date: NaiveDate, years: u32) -> NaiveDate {
    add_months(date, -((years as i32) * 12))
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    sub_days(start_of_month(add_months(start_of_month(date), 1)), 1)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    end_of_month(date).day()
}

pub fn start_of_year(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.ordinal0()))
}

/// 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub fn start_of_week(date: NaiveDate, week_start: u8) -> NaiveDate {
    let back = (i64::from(weekday_index(date)) - i64::from(week_start % 7)).rem_euclid(DAYS_PER_WEEK);
    sub_days(date, back)
}

pub fn end_of_week(date: NaiveDate, week_start: u8) -> NaiveDate {
    add_days(start_of_week(date, week_start), DAYS_PER_WEEK - 1)
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
