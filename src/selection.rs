//! Click/hover selection over a primary and an optional compare cursor.
//!
//! Every transition is a pure function from the previous [`SelectionState`]
//! and one [`SelectionEvent`] to the next state. Events on disabled days are
//! ignored and return the state unchanged.

use crate::calendar::Constraints;
use crate::compare;
use crate::preset::{self, CUSTOM_PRESET, PresetNode};
use crate::types::{CompareMode, DateRange, RangeChange, SelectionTarget};
use chrono::NaiveDate;
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    /// One endpoint fixed, waiting for the second click.
    Anchored {
        anchor: NaiveDate,
        hover: Option<NaiveDate>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
    Click(NaiveDate),
    Hover(NaiveDate),
    SelectPreset(String),
    ToggleCompare(bool),
    SetCompareMode(CompareMode),
    Reset,
}

/// Read-only inputs a transition may consult.
#[derive(Clone, Copy, Debug)]
pub struct SelectionEnv<'a> {
    pub constraints: &'a Constraints,
    pub presets: &'a [PresetNode],
    pub today: NaiveDate,
}

impl SelectionEnv<'_> {
    fn is_disabled(&self, date: NaiveDate) -> bool {
        self.constraints.is_disabled(date, self.today)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub primary_start: Option<NaiveDate>,
    pub primary_end: Option<NaiveDate>,
    pub compare_start: Option<NaiveDate>,
    pub compare_end: Option<NaiveDate>,
    pub phase: Phase,
    pub target: SelectionTarget,
    pub active_preset: Option<String>,
    pub compare_enabled: bool,
    pub compare_mode: CompareMode,
}

impl SelectionState {
    /// Initial state for an opened picker.
    pub fn seeded(
        range: Option<&DateRange>,
        compare: Option<&DateRange>,
        compare_enabled: bool,
        compare_mode: CompareMode,
    ) -> Self {
        let range = range.map(DateRange::normalized);
        let compare = compare.map(DateRange::normalized);
        let state = Self {
            primary_start: range.as_ref().map(|r| r.start),
            primary_end: range.as_ref().map(|r| r.end),
            compare_start: compare.as_ref().map(|r| r.start),
            compare_end: compare.as_ref().map(|r| r.end),
            compare_enabled,
            compare_mode,
            ..Self::default()
        };
        state.retarget().with_derived_compare()
    }

    pub fn primary(&self) -> Option<DateRange> {
        Some(DateRange::new(self.primary_start?, self.primary_end?))
    }

    pub fn compare(&self) -> Option<DateRange> {
        Some(DateRange::new(self.compare_start?, self.compare_end?))
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.phase, Phase::Anchored { .. })
    }

    pub fn anchor(&self) -> Option<NaiveDate> {
        match self.phase {
            Phase::Anchored { anchor, .. } => Some(anchor),
            Phase::Idle => None,
        }
    }

    pub fn hover(&self) -> Option<NaiveDate> {
        match self.phase {
            Phase::Anchored { hover, .. } => hover,
            Phase::Idle => None,
        }
    }

    /// Endpoints as reported to the host. Compare endpoints are included only
    /// while compare is enabled.
    pub fn change(&self) -> RangeChange {
        let (compare_start, compare_end) = if self.compare_enabled {
            (self.compare_start, self.compare_end)
        } else {
            (None, None)
        };
        RangeChange {
            start: self.primary_start,
            end: self.primary_end,
            compare_start,
            compare_end,
        }
    }

    pub fn reduce(&self, event: &SelectionEvent, env: &SelectionEnv<'_>) -> SelectionState {
        match event {
            SelectionEvent::Click(date) => self.click(*date, env),
            SelectionEvent::Hover(date) => self.hover_over(*date, env),
            SelectionEvent::SelectPreset(id) => self.select_preset(id, env),
            SelectionEvent::ToggleCompare(enabled) => self.toggle_compare(*enabled),
            SelectionEvent::SetCompareMode(mode) => self.set_compare_mode(*mode),
            SelectionEvent::Reset => self.reset(),
        }
    }

    fn click(&self, date: NaiveDate, env: &SelectionEnv<'_>) -> SelectionState {
        if env.is_disabled(date) {
            debug!("ignoring click on disabled day {date}");
            return self.clone();
        }
        let mut next = self.clone();
        match self.phase {
            Phase::Idle => {
                next.set_endpoints(Some(date), None);
                next.active_preset = Some(CUSTOM_PRESET.to_string());
                next.phase = Phase::Anchored {
                    anchor: date,
                    hover: None,
                };
                debug!("anchored {:?} selection at {date}", self.target);
                next
            }
            Phase::Anchored { anchor, .. } => {
                let range = DateRange::new(anchor, date);
                next.set_endpoints(Some(range.start), Some(range.end));
                next.phase = Phase::Idle;
                debug!("committed {:?} range {range}", self.target);
                next.with_derived_compare()
            }
        }
    }

    fn hover_over(&self, date: NaiveDate, env: &SelectionEnv<'_>) -> SelectionState {
        match self.phase {
            Phase::Anchored { anchor, .. } if !env.is_disabled(date) => SelectionState {
                phase: Phase::Anchored {
                    anchor,
                    hover: Some(date),
                },
                ..self.clone()
            },
            _ => self.clone(),
        }
    }

    fn select_preset(&self, id: &str, env: &SelectionEnv<'_>) -> SelectionState {
        if preset::is_group(env.presets, id) {
            return self.clone();
        }
        let range = preset::resolve(env.presets, id, env.today);
        if env.is_disabled(range.start) || env.is_disabled(range.end) {
            debug!("preset '{id}' resolves to disabled days {range}, ignoring");
            return self.clone();
        }
        let next = SelectionState {
            primary_start: Some(range.start),
            primary_end: Some(range.end),
            phase: Phase::Idle,
            target: SelectionTarget::Primary,
            active_preset: Some(id.to_string()),
            ..self.clone()
        };
        debug!("preset '{id}' selected {range}");
        next.with_derived_compare()
    }

    fn toggle_compare(&self, enabled: bool) -> SelectionState {
        SelectionState {
            compare_enabled: enabled,
            ..self.clone()
        }
        .retarget()
        .with_derived_compare()
    }

    fn set_compare_mode(&self, mode: CompareMode) -> SelectionState {
        SelectionState {
            compare_mode: mode,
            ..self.clone()
        }
        .retarget()
        .with_derived_compare()
    }

    fn reset(&self) -> SelectionState {
        SelectionState {
            compare_mode: self.compare_mode,
            ..SelectionState::default()
        }
    }

    fn set_endpoints(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        match self.target {
            SelectionTarget::Primary => {
                self.primary_start = start;
                self.primary_end = end;
            }
            SelectionTarget::Compare => {
                self.compare_start = start;
                self.compare_end = end;
            }
        }
    }

    /// Custom compare mode routes clicks to the compare cursor. Moving the
    /// cursor abandons an unfinished selection.
    fn retarget(mut self) -> Self {
        let target = if self.compare_enabled && self.compare_mode == CompareMode::Custom {
            SelectionTarget::Compare
        } else {
            SelectionTarget::Primary
        };
        if target != self.target {
            self.target = target;
            self.phase = Phase::Idle;
        }
        self
    }

    fn with_derived_compare(mut self) -> Self {
        if !self.compare_enabled || self.is_selecting() {
            return self;
        }
        if let Some(derived) = self
            .primary()
            .and_then(|primary| compare::derive(self.compare_mode, &primary))
        {
            self.compare_start = Some(derived.start);
            self.compare_end = Some(derived.end);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::default_presets;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    struct Fixture {
        constraints: Constraints,
        presets: Vec<PresetNode>,
        today: NaiveDate,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                constraints: Constraints::default(),
                presets: default_presets(),
                today: d(2024, 6, 15),
            }
        }

        fn env(&self) -> SelectionEnv<'_> {
            SelectionEnv {
                constraints: &self.constraints,
                presets: &self.presets,
                today: self.today,
            }
        }

        fn run(&self, state: SelectionState, events: &[SelectionEvent]) -> SelectionState {
            events
                .iter()
                .fold(state, |s, e| s.reduce(e, &self.env()))
        }
    }

    #[test]
    fn backwards_click_swaps_endpoints() {
        let fx = Fixture::new();
        let s = SelectionState::default();
        let s = s.reduce(&SelectionEvent::Click(d(2024, 5, 5)), &fx.env());
        assert_eq!(
            s.phase,
            Phase::Anchored {
                anchor: d(2024, 5, 5),
                hover: None
            }
        );
        assert_eq!(s.primary_start, Some(d(2024, 5, 5)));
        assert_eq!(s.primary_end, None);
        assert_eq!(s.active_preset.as_deref(), Some(CUSTOM_PRESET));

        let s = s.reduce(&SelectionEvent::Click(d(2024, 5, 1)), &fx.env());
        assert_eq!(s.phase, Phase::Idle);
        assert_eq!(s.primary(), Some(DateRange::new(d(2024, 5, 1), d(2024, 5, 5))));
    }

    #[test]
    fn seeding_orders_inverted_ranges() {
        let inverted = DateRange {
            start: d(2024, 3, 20),
            end: d(2024, 3, 10),
        };
        let s = SelectionState::seeded(Some(&inverted), None, true, CompareMode::PreviousPeriod);
        assert_eq!(s.primary_start, Some(d(2024, 3, 10)));
        assert_eq!(s.primary_end, Some(d(2024, 3, 20)));
        assert_eq!(s.compare(), Some(DateRange::new(d(2024, 2, 28), d(2024, 3, 9))));
    }

    #[test]
    fn forward_click_and_same_day() {
        let fx = Fixture::new();
        let s = fx.run(
            SelectionState::default(),
            &[
                SelectionEvent::Click(d(2024, 5, 1)),
                SelectionEvent::Click(d(2024, 5, 9)),
            ],
        );
        assert_eq!(s.primary(), Some(DateRange::new(d(2024, 5, 1), d(2024, 5, 9))));

        let s = fx.run(
            s,
            &[
                SelectionEvent::Click(d(2024, 5, 3)),
                SelectionEvent::Click(d(2024, 5, 3)),
            ],
        );
        assert_eq!(s.primary(), Some(DateRange::single(d(2024, 5, 3))));
    }

    #[test]
    fn disabled_click_is_noop() {
        let mut fx = Fixture::new();
        fx.constraints.disabled_dates = vec![d(2024, 5, 2)];
        let idle = SelectionState::default();
        assert_eq!(idle.reduce(&SelectionEvent::Click(d(2024, 5, 2)), &fx.env()), idle);

        let anchored = idle.reduce(&SelectionEvent::Click(d(2024, 5, 1)), &fx.env());
        let after = anchored.reduce(&SelectionEvent::Click(d(2024, 5, 2)), &fx.env());
        assert_eq!(after, anchored);
        assert_eq!(after.reduce(&SelectionEvent::Click(d(2024, 5, 2)), &fx.env()), anchored);
    }

    #[test]
    fn hover_only_previews_while_anchored() {
        let mut fx = Fixture::new();
        fx.constraints.disable_future = true;
        let idle = SelectionState::default();
        assert_eq!(idle.reduce(&SelectionEvent::Hover(d(2024, 6, 1)), &fx.env()), idle);

        let s = fx.run(
            idle,
            &[
                SelectionEvent::Click(d(2024, 6, 1)),
                SelectionEvent::Hover(d(2024, 6, 10)),
            ],
        );
        assert_eq!(s.hover(), Some(d(2024, 6, 10)));
        assert_eq!(s.primary_end, None);

        // future days are disabled and do not move the preview
        let s = s.reduce(&SelectionEvent::Hover(d(2024, 6, 20)), &fx.env());
        assert_eq!(s.hover(), Some(d(2024, 6, 10)));

        let s = s.reduce(&SelectionEvent::Click(d(2024, 6, 12)), &fx.env());
        assert_eq!(s.hover(), None);
        assert_eq!(s.primary(), Some(DateRange::new(d(2024, 6, 1), d(2024, 6, 12))));
    }

    #[test]
    fn preset_commits_and_exits_selection() {
        let fx = Fixture::new();
        let s = fx.run(
            SelectionState::default(),
            &[
                SelectionEvent::Click(d(2024, 1, 1)),
                SelectionEvent::SelectPreset("last7days".into()),
            ],
        );
        assert!(!s.is_selecting());
        assert_eq!(s.primary(), Some(DateRange::new(d(2024, 6, 9), d(2024, 6, 15))));
        assert_eq!(s.active_preset.as_deref(), Some("last7days"));
    }

    #[test]
    fn group_header_is_not_selectable() {
        let fx = Fixture::new();
        let s = SelectionState::default();
        assert_eq!(
            s.reduce(&SelectionEvent::SelectPreset("__group_thisWeek".into()), &fx.env()),
            s
        );
    }

    #[test]
    fn preset_with_disabled_endpoint_is_ignored() {
        let mut fx = Fixture::new();
        fx.constraints.disable_future = true;
        let s = SelectionState::default();
        // this month ends after today
        assert_eq!(
            s.reduce(&SelectionEvent::SelectPreset("thisMonth".into()), &fx.env()),
            s
        );
    }

    #[test]
    fn enabling_compare_derives_from_primary() {
        let fx = Fixture::new();
        let range = DateRange::new(d(2024, 3, 10), d(2024, 3, 20));
        let s = SelectionState::seeded(Some(&range), None, false, CompareMode::PreviousPeriod);
        assert_eq!(s.compare(), None);

        let s = s.reduce(&SelectionEvent::ToggleCompare(true), &fx.env());
        assert_eq!(s.compare(), Some(DateRange::new(d(2024, 2, 28), d(2024, 3, 9))));

        let s = s.reduce(
            &SelectionEvent::SetCompareMode(CompareMode::PreviousPeriodMatchDay),
            &fx.env(),
        );
        assert_eq!(s.compare(), Some(DateRange::new(d(2024, 2, 25), d(2024, 3, 6))));

        let s = s.reduce(
            &SelectionEvent::SetCompareMode(CompareMode::SamePeriodLastYear),
            &fx.env(),
        );
        assert_eq!(s.compare(), Some(DateRange::new(d(2023, 3, 10), d(2023, 3, 20))));
    }

    #[test]
    fn compare_is_not_derived_mid_selection() {
        let fx = Fixture::new();
        let range = DateRange::new(d(2024, 3, 10), d(2024, 3, 20));
        let s = SelectionState::seeded(Some(&range), None, true, CompareMode::PreviousPeriod);
        let before = s.compare();
        let s = s.reduce(&SelectionEvent::Click(d(2024, 4, 1)), &fx.env());
        assert_eq!(s.compare(), before);
        let s = s.reduce(&SelectionEvent::Click(d(2024, 4, 10)), &fx.env());
        assert_eq!(s.compare(), Some(DateRange::new(d(2024, 3, 22), d(2024, 3, 31))));
    }

    #[test]
    fn custom_mode_keeps_derived_range_and_targets_compare() {
        let fx = Fixture::new();
        let range = DateRange::new(d(2024, 3, 10), d(2024, 3, 20));
        let s = SelectionState::seeded(Some(&range), None, true, CompareMode::PreviousPeriod);
        let derived = s.compare();

        let s = s.reduce(&SelectionEvent::SetCompareMode(CompareMode::Custom), &fx.env());
        assert_eq!(s.target, SelectionTarget::Compare);
        assert_eq!(s.compare(), derived);

        let s = fx.run(
            s,
            &[
                SelectionEvent::Click(d(2023, 1, 20)),
                SelectionEvent::Click(d(2023, 1, 5)),
            ],
        );
        assert_eq!(s.compare(), Some(DateRange::new(d(2023, 1, 5), d(2023, 1, 20))));
        assert_eq!(s.primary(), Some(range));

        // a preset puts the cursor back on the primary range
        let s = s.reduce(&SelectionEvent::SelectPreset("yesterday".into()), &fx.env());
        assert_eq!(s.target, SelectionTarget::Primary);
        assert_eq!(s.compare(), Some(DateRange::new(d(2023, 1, 5), d(2023, 1, 20))));
    }

    #[test]
    fn retargeting_abandons_anchor() {
        let fx = Fixture::new();
        let s = fx.run(
            SelectionState::default(),
            &[
                SelectionEvent::Click(d(2024, 6, 1)),
                SelectionEvent::SetCompareMode(CompareMode::Custom),
                SelectionEvent::ToggleCompare(true),
            ],
        );
        assert!(!s.is_selecting());
        assert_eq!(s.target, SelectionTarget::Compare);
    }

    #[test]
    fn reset_clears_everything_but_mode() {
        let fx = Fixture::new();
        let range = DateRange::new(d(2024, 3, 10), d(2024, 3, 20));
        let s = SelectionState::seeded(Some(&range), None, true, CompareMode::SamePeriodLastYear);
        let s = s.reduce(&SelectionEvent::Reset, &fx.env());
        assert_eq!(s.primary_start, None);
        assert_eq!(s.compare_start, None);
        assert!(!s.compare_enabled);
        assert_eq!(s.active_preset, None);
        assert_eq!(s.compare_mode, CompareMode::SamePeriodLastYear);
    }

    #[test]
    fn change_hides_disabled_compare() {
        let range = DateRange::new(d(2024, 3, 10), d(2024, 3, 20));
        let compare = DateRange::new(d(2024, 1, 1), d(2024, 1, 2));
        let s = SelectionState::seeded(Some(&range), Some(&compare), false, CompareMode::Custom);
        let change = s.change();
        assert_eq!(change.primary(), Some(range));
        assert_eq!(change.compare(), None);
    }
}
