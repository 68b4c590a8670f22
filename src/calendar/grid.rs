use super::{DAYS_PER_WEEK, add_days, days_in_month, same_month, start_of_month, start_of_week, weekday_index};
use crate::locale::LocaleProvider;
use chrono::{NaiveDate, Weekday};

/// Six full weeks.
pub const GRID_CELLS: usize = 42;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDay {
    pub date: NaiveDate,
    /// Padding days from the neighbouring months are not interactive.
    pub in_month: bool,
}

/// Builds the 42-day grid for the month containing `month`, starting on the
/// `week_start` weekday on or before the 1st.
pub fn month_grid(month: NaiveDate, week_start: u8) -> Vec<GridDay> {
    let first = start_of_month(month);
    let origin = start_of_week(first, week_start);
    (0..GRID_CELLS as i64)
        .map(|i| {
            let date = add_days(origin, i);
            GridDay {
                date,
                in_month: same_month(date, first),
            }
        })
        .collect()
}

/// Rows that hold at least one day of the month (4 to 6).
pub fn visible_week_count(month: NaiveDate, week_start: u8) -> usize {
    let first = start_of_month(month);
    let lead = (i64::from(weekday_index(first)) - i64::from(week_start % 7)).rem_euclid(DAYS_PER_WEEK);
    (lead as usize + days_in_month(first) as usize).div_ceil(DAYS_PER_WEEK as usize)
}

/// Column headings in grid order.
pub fn weekday_header(week_start: u8, locale: &dyn LocaleProvider) -> Vec<String> {
    let mut day = Weekday::Sun;
    for _ in 0..(week_start % 7) {
        day = day.succ();
    }
    (0..DAYS_PER_WEEK)
        .map(|_| {
            let name = locale.weekday_short(day);
            day = day.succ();
            name
        })
        .collect()
}
