//! Two-month calendar view and per-day highlight classification.

use crate::calendar::{Constraints, GridDay, add_months, month_grid, same_month, start_of_month};
use crate::labels::{LabelKey, Labels};
use crate::locale::LocaleProvider;
use crate::selection::SelectionState;
use crate::types::{DateRange, SelectionTarget};
use chrono::NaiveDate;

/// The pair of months shown side by side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarView {
    left: NaiveDate,
}

impl CalendarView {
    pub fn new(month: NaiveDate) -> Self {
        Self {
            left: start_of_month(month),
        }
    }

    /// Positions the view so `day` falls in the right-hand month.
    pub fn ending_at(day: NaiveDate) -> Self {
        Self::new(add_months(start_of_month(day), -1))
    }

    pub fn prev(self) -> Self {
        Self::new(add_months(self.left, -1))
    }

    pub fn next(self) -> Self {
        Self::new(add_months(self.left, 1))
    }

    pub fn months(&self) -> [NaiveDate; 2] {
        [self.left, add_months(self.left, 1)]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub disabled: bool,
    pub is_start: bool,
    pub is_end: bool,
    pub in_range: bool,
    pub is_compare_start: bool,
    pub is_compare_end: bool,
    pub in_compare_range: bool,
    pub in_preview: bool,
    pub is_preview_endpoint: bool,
    /// Cursor that owns the preview marks.
    pub preview_target: Option<SelectionTarget>,
}

impl DayCell {
    pub fn interactive(&self) -> bool {
        self.in_month && !self.disabled
    }

    pub fn is_endpoint(&self) -> bool {
        self.is_start || self.is_end
    }
}

fn within(day: NaiveDate, a: NaiveDate, b: NaiveDate) -> bool {
    DateRange::new(a, b).contains(day)
}

/// Highlight marks for one grid day. Disabled days carry no other marks.
pub fn classify_day(
    day: GridDay,
    state: &SelectionState,
    constraints: &Constraints,
    today: NaiveDate,
) -> DayCell {
    let mut cell = DayCell {
        date: day.date,
        in_month: day.in_month,
        ..DayCell::default()
    };
    if constraints.is_disabled(day.date, today) {
        cell.disabled = true;
        return cell;
    }
    if !day.in_month {
        return cell;
    }

    let date = day.date;
    cell.is_start = state.primary_start == Some(date);
    cell.is_end = state.primary_end == Some(date);
    if let (Some(s), Some(e)) = (state.primary_start, state.primary_end) {
        cell.in_range = within(date, s, e);
    }

    if state.compare_enabled {
        cell.is_compare_start = state.compare_start == Some(date);
        cell.is_compare_end = state.compare_end == Some(date);
        if let (Some(s), Some(e)) = (state.compare_start, state.compare_end) {
            cell.in_compare_range = within(date, s, e);
        }
    }

    if let (Some(anchor), Some(hover)) = (state.anchor(), state.hover()) {
        cell.in_preview = within(date, anchor, hover);
        cell.is_preview_endpoint = date == anchor || date == hover;
        if cell.in_preview {
            cell.preview_target = Some(state.target);
        }
    }
    cell
}

pub fn classify_month(
    month: NaiveDate,
    week_start: u8,
    state: &SelectionState,
    constraints: &Constraints,
    today: NaiveDate,
) -> Vec<DayCell> {
    month_grid(month, week_start)
        .into_iter()
        .map(|day| classify_day(day, state, constraints, today))
        .collect()
}

fn format_range(range: &DateRange, locale: &dyn LocaleProvider) -> String {
    format!(
        "{} - {}",
        locale.format_date(range.start),
        locale.format_date(range.end)
    )
}

/// Text for the closed trigger: the committed range and an optional badge.
pub fn trigger_label(
    range: &DateRange,
    compare: Option<&DateRange>,
    labels: &Labels,
    locale: &dyn LocaleProvider,
) -> String {
    let mut label = format_range(range, locale);
    if let Some(c) = compare {
        label.push_str(&format!(
            " {} {}",
            labels.get(LabelKey::Vs),
            locale.format_date(c.start)
        ));
    }
    label
}

/// Header lines shown above the calendars while a session is open.
pub fn session_header(
    state: &SelectionState,
    labels: &Labels,
    locale: &dyn LocaleProvider,
) -> Vec<String> {
    let mut lines = vec![match state.primary() {
        Some(range) => format_range(&range, locale),
        None => labels.get(LabelKey::SelectDateRange).to_string(),
    }];
    if state.compare_enabled
        && let Some(compare) = state.compare()
    {
        lines.push(format!(
            "{} {}",
            labels.get(LabelKey::Vs),
            format_range(&compare, locale)
        ));
    }
    lines
}

/// Does the view already show `day`?
pub fn is_visible(view: &CalendarView, day: NaiveDate) -> bool {
    view.months().iter().any(|m| same_month(*m, day))
}
