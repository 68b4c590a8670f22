//! The picker facade a host application talks to.
//!
//! A [`RangeController`] owns the committed range(s) and, while the picker is
//! open, one [`SelectionState`] session. Interactions return the
//! [`PickerEvent`]s the host should observe, in order.

use crate::calendar::weekday_header;
use crate::clock::Clock;
use crate::config::PickerOptions;
use crate::error::ConfigError;
use crate::locale::LocaleProvider;
use crate::preset::{self, PresetNode};
use crate::selection::{SelectionEnv, SelectionEvent, SelectionState};
use crate::types::{CompareMode, DateRange, PickerEvent};
use crate::view::{self, CalendarView, DayCell};
use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Committed {
    range: DateRange,
    compare: Option<DateRange>,
    compare_enabled: bool,
    compare_mode: CompareMode,
}

#[derive(Clone, Debug)]
struct Session {
    state: SelectionState,
    view: CalendarView,
}

pub struct RangeController {
    options: PickerOptions,
    presets: Vec<PresetNode>,
    clock: Box<dyn Clock>,
    locale: Box<dyn LocaleProvider>,
    committed: Committed,
    controlled: bool,
    session: Option<Session>,
    /// Groups the user has toggled during this session.
    expanded_groups: FxHashMap<String, bool>,
}

impl RangeController {
    pub fn new(options: PickerOptions, clock: Box<dyn Clock>) -> Result<Self, ConfigError> {
        options.validate()?;
        let presets = options.preset_tree()?;
        let locale = options.locale_provider()?;
        let today = clock.today();
        let controlled = options.value.is_some();
        let range = options
            .value
            .clone()
            .or_else(|| options.default_value.clone())
            .map(|r| r.normalized())
            .unwrap_or_else(|| DateRange::single(today));
        let committed = Committed {
            range,
            compare: None,
            compare_enabled: options.enable_compare,
            compare_mode: options.compare_mode,
        };
        Ok(Self {
            options,
            presets,
            clock,
            locale,
            committed,
            controlled,
            session: None,
            expanded_groups: FxHashMap::default(),
        })
    }

    /// Builds a controller whose "today" follows the configured time zone.
    pub fn from_options(options: PickerOptions) -> Result<Self, ConfigError> {
        let clock = options.clock()?;
        Self::new(options, Box::new(clock))
    }

    pub fn with_locale(mut self, locale: Box<dyn LocaleProvider>) -> Self {
        self.locale = locale;
        self
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn presets(&self) -> &[PresetNode] {
        &self.presets
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn week_starts_on(&self) -> u8 {
        self.options
            .week_starts_on
            .unwrap_or_else(|| self.locale.week_starts_on())
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Compare mode of the open session, else the committed one.
    pub fn compare_mode(&self) -> CompareMode {
        self.state()
            .map_or(self.committed.compare_mode, |s| s.compare_mode)
    }

    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    pub fn committed_range(&self) -> &DateRange {
        &self.committed.range
    }

    pub fn committed_compare(&self) -> Option<&DateRange> {
        self.committed.compare.as_ref()
    }

    /// The in-progress selection while open.
    pub fn state(&self) -> Option<&SelectionState> {
        self.session.as_ref().map(|s| &s.state)
    }

    pub fn view(&self) -> Option<CalendarView> {
        self.session.as_ref().map(|s| s.view)
    }

    /// Opens the picker seeded from the committed range(s). No-op when open.
    pub fn open(&mut self) {
        if self.session.is_some() {
            return;
        }
        let state = SelectionState::seeded(
            Some(&self.committed.range),
            self.committed.compare.as_ref(),
            self.committed.compare_enabled,
            self.committed.compare_mode,
        );
        debug!("opened picker at {}", self.committed.range);
        self.expanded_groups.clear();
        self.session = Some(Session {
            state,
            view: CalendarView::ending_at(self.committed.range.end),
        });
    }

    /// Reconciles an externally supplied value. `Some` puts the controller in
    /// controlled mode and overwrites the committed primary range, re-seeding
    /// an open session; `None` returns to uncontrolled mode.
    pub fn set_value(&mut self, value: Option<DateRange>) {
        let value = value.map(|r| r.normalized());
        self.options.value = value.clone();
        let Some(range) = value else {
            self.controlled = false;
            return;
        };
        self.controlled = true;
        if range == self.committed.range {
            return;
        }
        debug!("external value {range}");
        self.committed.range = range.clone();
        if let Some(session) = self.session.as_mut() {
            let state = &session.state;
            session.state = SelectionState::seeded(
                Some(&range),
                state.compare().as_ref(),
                state.compare_enabled,
                state.compare_mode,
            );
            if !view::is_visible(&session.view, range.end) {
                session.view = CalendarView::ending_at(range.end);
            }
        }
    }

    pub fn click(&mut self, date: NaiveDate) -> Vec<PickerEvent> {
        self.dispatch(SelectionEvent::Click(date))
    }

    pub fn hover(&mut self, date: NaiveDate) -> Vec<PickerEvent> {
        self.dispatch(SelectionEvent::Hover(date))
    }

    /// Selects a preset and scrolls the view to the resulting range.
    pub fn select_preset(&mut self, id: &str) -> Vec<PickerEvent> {
        let events = self.dispatch(SelectionEvent::SelectPreset(id.to_string()));
        if let Some(session) = self.session.as_mut()
            && session.state.active_preset.as_deref() == Some(id)
            && let Some(range) = session.state.primary()
        {
            session.view = CalendarView::ending_at(range.end);
        }
        events
    }

    pub fn toggle_compare(&mut self, enabled: bool) -> Vec<PickerEvent> {
        self.dispatch(SelectionEvent::ToggleCompare(enabled))
    }

    pub fn set_compare_mode(&mut self, mode: CompareMode) -> Vec<PickerEvent> {
        self.dispatch(SelectionEvent::SetCompareMode(mode))
    }

    pub fn reset(&mut self) -> Vec<PickerEvent> {
        self.dispatch(SelectionEvent::Reset)
    }

    pub fn prev_month(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.view = session.view.prev();
        }
    }

    pub fn next_month(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.view = session.view.next();
        }
    }

    /// Confirms the session. Inert unless both primary endpoints are set.
    pub fn apply(&mut self) -> Vec<PickerEvent> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        let Some(range) = session.state.primary() else {
            debug!("apply ignored, primary range incomplete");
            return Vec::new();
        };
        let state = &session.state;
        let compare = if state.compare_enabled {
            state.compare()
        } else {
            None
        };
        let change = state.change();
        self.committed = Committed {
            range: range.clone(),
            compare: compare.clone(),
            compare_enabled: compare.is_some(),
            compare_mode: state.compare_mode,
        };
        self.session = None;
        info!("applied {range}");
        vec![
            PickerEvent::Change(change),
            PickerEvent::Apply { range, compare },
        ]
    }

    /// Discards the session, keeping the last committed state.
    pub fn cancel(&mut self) -> Vec<PickerEvent> {
        if self.session.take().is_none() {
            return Vec::new();
        }
        info!("selection cancelled");
        vec![PickerEvent::Cancel]
    }

    /// Interaction outside the picker surface; same as [`Self::cancel`].
    pub fn dismiss(&mut self) -> Vec<PickerEvent> {
        self.cancel()
    }

    /// Flips a sidebar group open or closed and reports the new state.
    pub fn toggle_group(&mut self, id: &str) -> bool {
        if !preset::is_group(&self.presets, id) {
            return false;
        }
        let expanded = !self.is_group_expanded(id);
        self.expanded_groups.insert(id.to_string(), expanded);
        expanded
    }

    /// Until toggled in the current session, a group is expanded exactly when
    /// one of its children is the active preset.
    pub fn is_group_expanded(&self, id: &str) -> bool {
        if let Some(&expanded) = self.expanded_groups.get(id) {
            return expanded;
        }
        self.state()
            .and_then(|s| s.active_preset.as_deref())
            .and_then(|active| preset::parent_group(&self.presets, active))
            == Some(id)
    }

    /// Classified grids for both visible months.
    pub fn month_cells(&self) -> Vec<(NaiveDate, Vec<DayCell>)> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        let today = self.clock.today();
        let week_start = self.week_starts_on();
        session
            .view
            .months()
            .into_iter()
            .map(|month| {
                let cells = view::classify_month(
                    month,
                    week_start,
                    &session.state,
                    &self.options.constraints,
                    today,
                );
                (month, cells)
            })
            .collect()
    }

    pub fn weekday_header(&self) -> Vec<String> {
        weekday_header(self.week_starts_on(), self.locale.as_ref())
    }

    pub fn month_title(&self, month: NaiveDate) -> String {
        self.locale.format_month_title(month)
    }

    pub fn trigger_label(&self) -> String {
        view::trigger_label(
            &self.committed.range,
            self.committed.compare.as_ref(),
            &self.options.labels,
            self.locale.as_ref(),
        )
    }

    pub fn header(&self) -> Vec<String> {
        match self.state() {
            Some(state) => view::session_header(state, &self.options.labels, self.locale.as_ref()),
            None => vec![self.trigger_label()],
        }
    }

    fn dispatch(&mut self, event: SelectionEvent) -> Vec<PickerEvent> {
        let today = self.clock.today();
        let Some(session) = self.session.as_mut() else {
            debug!("{event:?} ignored, picker closed");
            return Vec::new();
        };
        let env = SelectionEnv {
            constraints: &self.options.constraints,
            presets: &self.presets,
            today,
        };
        let before = session.state.change();
        session.state = session.state.reduce(&event, &env);
        let after = session.state.change();
        if before == after {
            Vec::new()
        } else {
            vec![PickerEvent::Change(after)]
        }
    }
}
