//! Derivation of a comparison interval from a primary interval.

use crate::calendar::{DAYS_PER_WEEK, sub_days, sub_years};
use crate::types::{CompareMode, DateRange};

/// The interval of the same length ending the day before `range` starts.
pub fn previous_period(range: &DateRange) -> DateRange {
    let shift = range.duration_days();
    shifted(range, shift)
}

/// Like [`previous_period`] but shifted by whole weeks, so each compare day
/// falls on the same weekday as its primary day.
pub fn previous_period_match_day(range: &DateRange) -> DateRange {
    shifted(range, match_day_shift(range.duration_days()))
}

/// Both endpoints moved back one calendar year.
pub fn same_period_last_year(range: &DateRange) -> DateRange {
    DateRange::new(sub_years(range.start, 1), sub_years(range.end, 1))
}

/// Smallest multiple of seven that is at least `duration`.
pub fn match_day_shift(duration: i64) -> i64 {
    let remainder = duration.rem_euclid(DAYS_PER_WEEK);
    if remainder == 0 {
        duration
    } else {
        duration + (DAYS_PER_WEEK - remainder)
    }
}

/// `None` for [`CompareMode::Custom`], which has no automatic derivation.
pub fn derive(mode: CompareMode, range: &DateRange) -> Option<DateRange> {
    match mode {
        CompareMode::PreviousPeriod => Some(previous_period(range)),
        CompareMode::PreviousPeriodMatchDay => Some(previous_period_match_day(range)),
        CompareMode::SamePeriodLastYear => Some(same_period_last_year(range)),
        CompareMode::Custom => None,
    }
}

fn shifted(range: &DateRange, days: i64) -> DateRange {
    DateRange::new(sub_days(range.start, days), sub_days(range.end, days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{add_days, days_between, weekday_index};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn march() -> DateRange {
        DateRange::new(d(2024, 3, 10), d(2024, 3, 20))
    }

    #[test]
    fn previous_period_scenario() {
        let c = previous_period(&march());
        assert_eq!(c, DateRange::new(d(2024, 2, 28), d(2024, 3, 9)));
    }

    #[test]
    fn previous_period_single_day() {
        let c = previous_period(&DateRange::single(d(2024, 3, 1)));
        assert_eq!(c, DateRange::single(d(2024, 2, 29)));
    }

    #[test]
    fn previous_period_is_contiguous() {
        for len in 0..40 {
            let r = DateRange::new(d(2024, 1, 31), add_days(d(2024, 1, 31), len));
            let c = previous_period(&r);
            assert_eq!(days_between(c.end, r.start), 1);
            assert_eq!(c.duration_days(), r.duration_days());
        }
    }

    #[test]
    fn match_day_scenario() {
        let c = previous_period_match_day(&march());
        assert_eq!(c, DateRange::new(d(2024, 2, 25), d(2024, 3, 6)));
    }

    #[test]
    fn match_day_shift_is_smallest_week_multiple() {
        assert_eq!(match_day_shift(1), 7);
        assert_eq!(match_day_shift(7), 7);
        assert_eq!(match_day_shift(8), 14);
        assert_eq!(match_day_shift(11), 14);
        assert_eq!(match_day_shift(28), 28);
        for duration in 1..100 {
            let shift = match_day_shift(duration);
            assert_eq!(shift % 7, 0);
            assert!(shift >= duration);
            assert!(shift - duration < 7);
        }
    }

    #[test]
    fn match_day_keeps_weekdays() {
        let r = DateRange::new(d(2024, 5, 1), d(2024, 5, 17));
        let c = previous_period_match_day(&r);
        assert_eq!(weekday_index(c.start), weekday_index(r.start));
        assert_eq!(weekday_index(c.end), weekday_index(r.end));
    }

    #[test]
    fn same_period_last_year_scenario() {
        let c = same_period_last_year(&march());
        assert_eq!(c, DateRange::new(d(2023, 3, 10), d(2023, 3, 20)));
    }

    #[test]
    fn same_period_last_year_leap_day() {
        let c = same_period_last_year(&DateRange::new(d(2024, 2, 29), d(2024, 3, 31)));
        assert_eq!(c, DateRange::new(d(2023, 2, 28), d(2023, 3, 31)));
    }

    #[test]
    fn custom_has_no_derivation() {
        assert_eq!(derive(CompareMode::Custom, &march()), None);
        assert_eq!(
            derive(CompareMode::PreviousPeriod, &march()),
            Some(previous_period(&march()))
        );
    }
}
