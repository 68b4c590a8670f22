//! Line-oriented command scripts that drive a [`RangeController`].
//!
//! [`RangeController`]: crate::controller::RangeController

mod exec;
mod parser;

pub use exec::{Runner, render_month};
pub use parser::ScriptParser;

use crate::types::{CompareMode, DateRange};
use chrono::NaiveDate;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Open,
    Click(NaiveDate),
    Hover(NaiveDate),
    Preset(String),
    Group(String),
    Compare(bool),
    Mode(CompareMode),
    /// Lists the compare-mode selector entries.
    Modes,
    Reset,
    Apply,
    Cancel,
    Dismiss,
    Prev,
    Next,
    /// `None` releases a controlled value.
    Value(Option<DateRange>),
    Show,
    Grid,
}
