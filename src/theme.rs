use crate::types::SelectionTarget;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PRIMARY_COLOR: &str = "#3b82f6";
pub const DEFAULT_COMPARE_COLOR: &str = "#f97316";

/// Alpha used for in-range day backgrounds.
pub const RANGE_TINT_ALPHA: f32 = 0.12;

/// Parts of the picker a host may attach extra class names to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleSlot {
    Root,
    Container,
    Sidebar,
    Calendar,
    Day,
    DaySelected,
    DayInRange,
    DayCompare,
    Footer,
    ButtonApply,
    ButtonCancel,
    PresetActive,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    pub primary_color: String,
    pub compare_color: String,
    pub class_names: FxHashMap<StyleSlot, String>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            compare_color: DEFAULT_COMPARE_COLOR.to_string(),
            class_names: FxHashMap::default(),
        }
    }
}

impl Theme {
    /// Extra classes for `slot`; empty when not overridden.
    pub fn class(&self, slot: StyleSlot) -> &str {
        self.class_names.get(&slot).map(String::as_str).unwrap_or("")
    }

    pub fn has_override(&self, slot: StyleSlot) -> bool {
        self.class_names.contains_key(&slot)
    }

    pub fn color(&self, target: SelectionTarget) -> &str {
        match target {
            SelectionTarget::Primary => &self.primary_color,
            SelectionTarget::Compare => &self.compare_color,
        }
    }

    pub fn range_tint(&self, target: SelectionTarget) -> String {
        tint(self.color(target), RANGE_TINT_ALPHA)
    }
}

/// `#rrggbb` to `rgba(r,g,b,alpha)`. Other color syntaxes pass through.
pub fn tint(color: &str, alpha: f32) -> String {
    let hex = color.trim_start_matches('#');
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return color.to_string();
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
    format!("rgba({},{},{},{})", channel(0), channel(2), channel(4), alpha)
}
