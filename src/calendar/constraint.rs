use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Selectability rules supplied by the host. Read-only to the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Constraints {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub disable_future: bool,
    pub disable_past: bool,
    pub disabled_dates: Vec<NaiveDate>,
}

impl Constraints {
    /// Any matching rule disables the day. `disable_future`/`disable_past`
    /// act as a max/min bound of `today`.
    pub fn is_disabled(&self, date: NaiveDate, today: NaiveDate) -> bool {
        if self.min_date.is_some_and(|min| date < min) {
            return true;
        }
        if self.max_date.is_some_and(|max| date > max) {
            return true;
        }
        if self.disable_future && date > today {
            return true;
        }
        if self.disable_past && date < today {
            return true;
        }
        self.disabled_dates.contains(&date)
    }

    pub fn is_selectable(&self, date: NaiveDate, today: NaiveDate) -> bool {
        !self.is_disabled(date, today)
    }

    /// True when the bounds leave no day selectable at all. Not rejected,
    /// only reported.
    pub fn has_inverted_bounds(&self) -> bool {
        matches!((self.min_date, self.max_date), (Some(min), Some(max)) if min > max)
    }
}
