//! Named shortcut ranges and their resolution.
//!
//! A preset tree is one level deep: top-level entries are either selectable
//! leaves or group headers whose children are leaves. Group headers only
//! expand in the sidebar and never resolve to a range.

use crate::calendar::{
    add_months, end_of_month, end_of_week, start_of_month, start_of_week, start_of_year, sub_days,
};
use crate::types::DateRange;
use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Produces a range given today's date.
pub type RangeFn = Arc<dyn Fn(NaiveDate) -> DateRange + Send + Sync>;

/// Marks the preset selection as manual (calendar clicks).
pub const CUSTOM_PRESET: &str = "custom";

#[derive(Clone)]
pub struct Preset {
    pub label: String,
    pub value: String,
    range: Option<RangeFn>,
}

impl Preset {
    /// A preset resolved through the built-in table by its `value`.
    pub fn named(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            range: None,
        }
    }

    pub fn with_range<F>(label: impl Into<String>, value: impl Into<String>, range: F) -> Self
    where
        F: Fn(NaiveDate) -> DateRange + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            value: value.into(),
            range: Some(Arc::new(range)),
        }
    }

    pub fn has_range(&self) -> bool {
        self.range.is_some()
    }
}

impl fmt::Debug for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preset")
            .field("label", &self.label)
            .field("value", &self.value)
            .field("range", &self.range.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[derive(Clone, Debug)]
pub enum PresetNode {
    Leaf(Preset),
    Group {
        label: String,
        value: String,
        children: Vec<Preset>,
    },
}

impl PresetNode {
    pub fn group(label: impl Into<String>, value: impl Into<String>, children: Vec<Preset>) -> Self {
        PresetNode::Group {
            label: label.into(),
            value: value.into(),
            children,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            PresetNode::Leaf(p) => &p.value,
            PresetNode::Group { value, .. } => value,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PresetNode::Leaf(p) => &p.label,
            PresetNode::Group { label, .. } => label,
        }
    }
}

/// Depth-first lookup of a selectable preset.
pub fn find_preset<'a>(nodes: &'a [PresetNode], id: &str) -> Option<&'a Preset> {
    for node in nodes {
        match node {
            PresetNode::Leaf(p) if p.value == id => return Some(p),
            PresetNode::Leaf(_) => {}
            PresetNode::Group { children, .. } => {
                if let Some(p) = children.iter().find(|c| c.value == id) {
                    return Some(p);
                }
            }
        }
    }
    None
}

pub fn is_group(nodes: &[PresetNode], id: &str) -> bool {
    nodes
        .iter()
        .any(|n| matches!(n, PresetNode::Group { value, .. } if value == id))
}

/// The group header whose children include `id`.
pub fn parent_group<'a>(nodes: &'a [PresetNode], id: &str) -> Option<&'a str> {
    nodes.iter().find_map(|n| match n {
        PresetNode::Group {
            value, children, ..
        } if children.iter().any(|c| c.value == id) => Some(value.as_str()),
        _ => None,
    })
}

/// Fixed table of well-known ranges.
pub fn builtin_range(id: &str, today: NaiveDate) -> Option<DateRange> {
    let range = match id {
        "today" => DateRange::single(today),
        "yesterday" => DateRange::single(sub_days(today, 1)),
        "last7days" => DateRange::new(sub_days(today, 6), today),
        "thisWeekSunToday" => DateRange::new(start_of_week(today, 0), today),
        "thisWeekMonToday" => DateRange::new(start_of_week(today, 1), today),
        "lastWeekSunSat" => {
            let start = sub_days(start_of_week(today, 0), 7);
            DateRange::new(start, end_of_week(start, 0))
        }
        "lastWeekMonSun" => {
            let start = sub_days(start_of_week(today, 1), 7);
            DateRange::new(start, end_of_week(start, 1))
        }
        "last28Days" => DateRange::new(sub_days(today, 27), today),
        "last30days" => DateRange::new(sub_days(today, 29), today),
        "thisMonth" => DateRange::new(start_of_month(today), end_of_month(today)),
        "lastMonth" => {
            let last = add_months(today, -1);
            DateRange::new(start_of_month(last), end_of_month(last))
        }
        "ytd" => DateRange::new(start_of_year(today), today),
        _ => return None,
    };
    Some(range)
}

/// Resolves `id` against the tree, then the built-in table, then `today`.
pub fn resolve(nodes: &[PresetNode], id: &str, today: NaiveDate) -> DateRange {
    if let Some(range) = find_preset(nodes, id).and_then(|p| p.range.as_ref()) {
        debug!("preset '{id}' resolved by its range function");
        return range(today);
    }
    if let Some(range) = builtin_range(id, today) {
        return range;
    }
    if id != CUSTOM_PRESET {
        warn!("unknown preset '{id}', falling back to today");
    }
    DateRange::single(today)
}

pub fn default_presets() -> Vec<PresetNode> {
    vec![
        PresetNode::Leaf(Preset::named("Today", "today")),
        PresetNode::Leaf(Preset::named("Yesterday", "yesterday")),
        PresetNode::group(
            "This week",
            "__group_thisWeek",
            vec![
                Preset::named("Sun \u{2013} Today", "thisWeekSunToday"),
                Preset::named("Mon \u{2013} Today", "thisWeekMonToday"),
            ],
        ),
        PresetNode::Leaf(Preset::named("Last 7 days", "last7days")),
        PresetNode::group(
            "Last week",
            "__group_lastWeek",
            vec![
                Preset::named("Sun \u{2013} Sat", "lastWeekSunSat"),
                Preset::named("Mon \u{2013} Sun", "lastWeekMonSun"),
            ],
        ),
        PresetNode::Leaf(Preset::named("Last 28 days", "last28Days")),
        PresetNode::Leaf(Preset::named("Last 30 days", "last30days")),
        PresetNode::Leaf(Preset::named("This month", "thisMonth")),
        PresetNode::Leaf(Preset::named("Last month", "lastMonth")),
        PresetNode::Leaf(Preset::named("Year to Date", "ytd")),
        PresetNode::Leaf(Preset::named("Custom", CUSTOM_PRESET)),
    ]
}
