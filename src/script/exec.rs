use super::{Command, ScriptParser};
use crate::calendar::visible_week_count;
use crate::controller::RangeController;
use crate::error::{DateCompareError, ScriptError};
use crate::types::PickerEvent;
use crate::view::DayCell;
use chrono::{Datelike, NaiveDate};
use std::path::Path;
use tracing::debug;

/// Executes commands against a controller and collects printable output.
pub struct Runner {
    controller: RangeController,
    parser: ScriptParser,
}

impl Runner {
    pub fn new(controller: RangeController) -> Result<Self, ScriptError> {
        Ok(Self {
            controller,
            parser: ScriptParser::new()?,
        })
    }

    pub fn controller(&self) -> &RangeController {
        &self.controller
    }

    /// Runs a full script. Parsing finishes before anything executes, so a
    /// malformed script has no effect.
    pub fn run(&mut self, source: &str) -> Result<Vec<String>, ScriptError> {
        let commands = self.parser.parse(source)?;
        let mut out = Vec::new();
        for (line, cmd) in &commands {
            debug!("line {line}: {cmd:?}");
            out.extend(self.execute(cmd));
        }
        Ok(out)
    }

    pub fn run_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<String>, DateCompareError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Ok(self.run(&source)?)
    }

    /// Runs a single interactive line.
    pub fn run_line(&mut self, text: &str) -> Result<Vec<String>, ScriptError> {
        Ok(match self.parser.parse_line(1, text)? {
            Some(cmd) => self.execute(&cmd),
            None => Vec::new(),
        })
    }

    pub fn execute(&mut self, cmd: &Command) -> Vec<String> {
        let c = &mut self.controller;
        let events = match cmd {
            Command::Open => {
                c.open();
                Vec::new()
            }
            Command::Click(date) => c.click(*date),
            Command::Hover(date) => c.hover(*date),
            Command::Preset(id) => c.select_preset(id),
            Command::Group(id) => {
                let state = if c.toggle_group(id) { "expanded" } else { "collapsed" };
                return vec![format!("group {id} {state}")];
            }
            Command::Compare(on) => c.toggle_compare(*on),
            Command::Mode(mode) => c.set_compare_mode(*mode),
            Command::Reset => c.reset(),
            Command::Apply => c.apply(),
            Command::Cancel => c.cancel(),
            Command::Dismiss => c.dismiss(),
            Command::Prev => {
                c.prev_month();
                Vec::new()
            }
            Command::Next => {
                c.next_month();
                Vec::new()
            }
            Command::Value(value) => {
                c.set_value(value.clone());
                Vec::new()
            }
            Command::Show => return self.show(),
            Command::Grid => return self.grid(),
            Command::Modes => return self.modes(),
        };
        events.iter().map(PickerEvent::to_string).collect()
    }

    fn show(&self) -> Vec<String> {
        let c = &self.controller;
        let mut out = c.header();
        let Some(state) = c.state() else {
            out.push("closed".to_string());
            return out;
        };
        let phase = match state.anchor() {
            Some(anchor) => format!("selecting from {anchor}"),
            None => "idle".to_string(),
        };
        out.push(format!("open, {phase}, target {:?}", state.target).to_lowercase());
        if let Some(id) = &state.active_preset {
            out.push(format!("preset {id}"));
        }
        if state.compare_enabled {
            out.push(format!("compare {}", state.compare_mode));
        }
        out
    }

    fn modes(&self) -> Vec<String> {
        let c = &self.controller;
        let current = c.compare_mode();
        c.options()
            .labels
            .compare_mode_options()
            .into_iter()
            .map(|(mode, label)| {
                let mark = if mode == current { '*' } else { ' ' };
                format!("{mark} {mode}: {label}")
            })
            .collect()
    }

    fn grid(&self) -> Vec<String> {
        let c = &self.controller;
        let months = c.month_cells();
        if months.is_empty() {
            return vec!["closed".to_string()];
        }
        let header = c.weekday_header().join("  ");
        let week_start = c.week_starts_on();
        let mut out = Vec::new();
        for (month, cells) in months {
            out.push(c.month_title(month));
            out.push(header.clone());
            out.extend(render_month(month, week_start, &cells));
        }
        out
    }
}

fn marker(cell: &DayCell) -> char {
    if cell.disabled {
        'x'
    } else if cell.is_start || cell.is_end {
        '#'
    } else if cell.in_range {
        '='
    } else if cell.is_compare_start || cell.is_compare_end || cell.in_compare_range {
        '+'
    } else if cell.in_preview {
        '~'
    } else {
        ' '
    }
}

/// Text rows for one month: two-digit day plus a one-character mark. Padding
/// days are blank and trailing all-padding rows are dropped.
pub fn render_month(month: NaiveDate, week_start: u8, cells: &[DayCell]) -> Vec<String> {
    cells
        .chunks(7)
        .take(visible_week_count(month, week_start))
        .map(|week| {
            week.iter()
                .map(|cell| {
                    if cell.in_month {
                        format!("{:>2}{}", cell.date.day(), marker(cell))
                    } else {
                        "   ".to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
                .trim_end()
                .to_string()
        })
        .collect()
}
