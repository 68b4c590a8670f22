//! Date-range selection and comparison engine for a two-month picker.

pub mod calendar;
pub mod clock;
pub mod compare;
pub mod config;
pub mod controller;
pub mod error;
pub mod labels;
pub mod locale;
pub mod preset;
pub mod script;
pub mod selection;
pub mod theme;
pub mod types;
pub mod view;

pub use config::PickerOptions;
pub use controller::RangeController;
pub use error::{ConfigError, DateCompareError, Result, ScriptError};
pub use types::{CompareMode, DateRange, PickerEvent, RangeChange, SelectionTarget};
