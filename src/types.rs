use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An inclusive interval of calendar days. Deserialized ranges are put in
/// order the same way [`DateRange::new`] does.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawDateRange")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl From<RawDateRange> for DateRange {
    fn from(raw: RawDateRange) -> Self {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Builds a range from two days in either order.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        let (start, end) = if b < a { (b, a) } else { (a, b) };
        Self { start, end }
    }

    /// The same days with `start <= end`.
    pub fn normalized(&self) -> Self {
        Self::new(self.start, self.end)
    }

    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    /// Drops the time-of-day of both instants before building the range.
    pub fn from_datetimes(a: NaiveDateTime, b: NaiveDateTime) -> Self {
        Self::new(a.date(), b.date())
    }

    /// Inclusive day count, `end - start + 1`.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// How the comparison interval is obtained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompareMode {
    #[default]
    PreviousPeriod,
    PreviousPeriodMatchDay,
    SamePeriodLastYear,
    Custom,
}

impl CompareMode {
    pub const ALL: [CompareMode; 4] = [
        CompareMode::PreviousPeriodMatchDay,
        CompareMode::PreviousPeriod,
        CompareMode::SamePeriodLastYear,
        CompareMode::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CompareMode::PreviousPeriod => "previousPeriod",
            CompareMode::PreviousPeriodMatchDay => "previousPeriodMatchDay",
            CompareMode::SamePeriodLastYear => "samePeriodLastYear",
            CompareMode::Custom => "custom",
        }
    }

    /// Whether the compare range is derived from the primary range.
    pub fn is_derived(self) -> bool {
        self != CompareMode::Custom
    }
}

impl fmt::Display for CompareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompareMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "previousPeriod" => Ok(CompareMode::PreviousPeriod),
            "previousPeriodMatchDay" => Ok(CompareMode::PreviousPeriodMatchDay),
            "samePeriodLastYear" => Ok(CompareMode::SamePeriodLastYear),
            "custom" => Ok(CompareMode::Custom),
            other => Err(format!("unknown compare mode '{other}'")),
        }
    }
}

/// Which logical cursor receives clicks and hovers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionTarget {
    #[default]
    Primary,
    Compare,
}

/// Payload of a change notification. Endpoints may be missing while a
/// selection is only partially committed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeChange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub compare_start: Option<NaiveDate>,
    pub compare_end: Option<NaiveDate>,
}

impl RangeChange {
    pub fn primary(&self) -> Option<DateRange> {
        Some(DateRange::new(self.start?, self.end?))
    }

    pub fn compare(&self) -> Option<DateRange> {
        Some(DateRange::new(self.compare_start?, self.compare_end?))
    }
}

/// Notifications delivered to the host application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerEvent {
    Change(RangeChange),
    Apply {
        range: DateRange,
        compare: Option<DateRange>,
    },
    Cancel,
}

fn fmt_day(day: Option<NaiveDate>) -> String {
    day.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

impl fmt::Display for PickerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickerEvent::Change(c) => {
                write!(f, "change {} {}", fmt_day(c.start), fmt_day(c.end))?;
                if c.compare_start.is_some() || c.compare_end.is_some() {
                    write!(
                        f,
                        " vs {} {}",
                        fmt_day(c.compare_start),
                        fmt_day(c.compare_end)
                    )?;
                }
                Ok(())
            }
            PickerEvent::Apply { range, compare } => {
                write!(f, "apply {} {}", range.start, range.end)?;
                if let Some(c) = compare {
                    write!(f, " vs {} {}", c.start, c.end)?;
                }
                Ok(())
            }
            PickerEvent::Cancel => f.write_str("cancel"),
        }
    }
}
