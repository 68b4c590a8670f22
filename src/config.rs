//! Picker options, loadable from TOML.

use crate::calendar::{Constraints, sub_days};
use crate::clock::SystemClock;
use crate::error::ConfigError;
use crate::labels::Labels;
use crate::locale::{EnglishLocale, IcuLocale, LocaleProvider};
use crate::preset::{self, Preset, PresetNode};
use crate::theme::Theme;
use crate::types::{CompareMode, DateRange};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PickerOptions {
    /// Controlled primary range. When set it always wins over internal state.
    pub value: Option<DateRange>,
    /// Initial range when uncontrolled.
    pub default_value: Option<DateRange>,
    /// Replaces the built-in preset list.
    pub presets: Option<Vec<PresetSpec>>,
    pub enable_compare: bool,
    pub compare_mode: CompareMode,
    #[serde(flatten)]
    pub constraints: Constraints,
    /// Overrides the locale's week start.
    pub week_starts_on: Option<u8>,
    pub locale: Option<String>,
    /// IANA zone used to decide "today".
    pub timezone: Option<String>,
    pub labels: Labels,
    pub theme: Theme,
}

impl PickerOptions {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        info!("Loading picker options from: {}", path.as_ref().display());
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let options: PickerOptions = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ws) = self.week_starts_on
            && ws > 6
        {
            return Err(ConfigError::Invalid(format!(
                "weekStartsOn must be between 0 and 6, got {ws}"
            )));
        }
        if let Some(tz) = &self.timezone {
            SystemClock::from_name(tz)?;
        }
        if let Some(tag) = &self.locale {
            IcuLocale::parse(tag)?;
        }
        if let Some(specs) = &self.presets {
            for spec in specs {
                spec.to_node()?;
            }
        }
        if self.constraints.has_inverted_bounds() {
            warn!("minDate is after maxDate, every day will be disabled");
        }
        Ok(())
    }

    /// Runtime preset tree: the configured list or the built-in defaults.
    pub fn preset_tree(&self) -> Result<Vec<PresetNode>, ConfigError> {
        match &self.presets {
            Some(specs) => specs.iter().map(PresetSpec::to_node).collect(),
            None => Ok(preset::default_presets()),
        }
    }

    pub fn locale_provider(&self) -> Result<Box<dyn LocaleProvider>, ConfigError> {
        Ok(match &self.locale {
            Some(tag) => Box::new(IcuLocale::parse(tag)?),
            None => Box::new(EnglishLocale),
        })
    }

    pub fn clock(&self) -> Result<SystemClock, ConfigError> {
        match &self.timezone {
            Some(tz) => SystemClock::from_name(tz),
            None => Ok(SystemClock::local()),
        }
    }
}

/// Declarative preset as written in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetSpec {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    /// `n` days ending today.
    #[serde(default)]
    pub trailing_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PresetSpec>,
}

impl PresetSpec {
    pub fn to_node(&self) -> Result<PresetNode, ConfigError> {
        if self.children.is_empty() {
            return Ok(PresetNode::Leaf(self.to_leaf()?));
        }
        let children = self
            .children
            .iter()
            .map(|child| {
                if !child.children.is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "preset '{}' nests groups more than one level deep",
                        child.value
                    )));
                }
                child.to_leaf()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PresetNode::group(&self.label, &self.value, children))
    }

    fn to_leaf(&self) -> Result<Preset, ConfigError> {
        match (self.start, self.end, self.trailing_days) {
            (None, None, None) => Ok(Preset::named(&self.label, &self.value)),
            (Some(start), Some(end), None) => {
                let range = DateRange::new(start, end);
                Ok(Preset::with_range(&self.label, &self.value, move |_| {
                    range.clone()
                }))
            }
            (None, None, Some(days)) if days > 0 => {
                let back = i64::from(days) - 1;
                Ok(Preset::with_range(&self.label, &self.value, move |today| {
                    DateRange::new(sub_days(today, back), today)
                }))
            }
            _ => Err(ConfigError::Invalid(format!(
                "preset '{}' needs both start and end, or a positive trailingDays",
                self.value
            ))),
        }
    }
}
