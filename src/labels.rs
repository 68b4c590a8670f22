use crate::types::CompareMode;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// User-facing strings a host may override.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelKey {
    Apply,
    Cancel,
    Clear,
    Compare,
    To,
    Custom,
    SelectDateRange,
    Vs,
    PrecedingPeriod,
    SamePeriodLastYear,
}

impl LabelKey {
    pub fn default_text(self) -> &'static str {
        match self {
            LabelKey::Apply => "Apply",
            LabelKey::Cancel => "Cancel",
            LabelKey::Clear => "Reset",
            LabelKey::Compare => "Compare",
            LabelKey::To => "to",
            LabelKey::Custom => "Custom",
            LabelKey::SelectDateRange => "Select date range",
            LabelKey::Vs => "vs",
            LabelKey::PrecedingPeriod => "Previous period",
            LabelKey::SamePeriodLastYear => "Previous year",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels {
    overrides: FxHashMap<LabelKey, String>,
}

impl Labels {
    pub fn get(&self, key: LabelKey) -> &str {
        self.overrides
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.default_text())
    }

    pub fn set(&mut self, key: LabelKey, text: impl Into<String>) {
        self.overrides.insert(key, text.into());
    }

    /// Option text for the compare-mode selector.
    pub fn compare_mode(&self, mode: CompareMode) -> &str {
        match mode {
            CompareMode::PreviousPeriodMatchDay => "Previous period (match day of week)",
            CompareMode::PreviousPeriod => self.get(LabelKey::PrecedingPeriod),
            CompareMode::SamePeriodLastYear => self.get(LabelKey::SamePeriodLastYear),
            CompareMode::Custom => self.get(LabelKey::Custom),
        }
    }

    /// Entries of the compare-mode selector, in display order.
    pub fn compare_mode_options(&self) -> Vec<(CompareMode, &str)> {
        CompareMode::ALL
            .iter()
            .map(|&mode| (mode, self.compare_mode(mode)))
            .collect()
    }
}
