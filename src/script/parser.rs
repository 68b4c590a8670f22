use super::Command;
use crate::error::ScriptError;
use crate::types::{CompareMode, DateRange};
use chrono::NaiveDate;
use regex::Regex;

const LINE_PATTERN: &str = r"^(?P<cmd>[A-Za-z]+)(?:\s+(?P<args>.*?))?\s*$";
const DATE_PATTERN: &str = r"^(?P<y>\d{4})[-/](?P<m>\d{1,2})[-/](?P<d>\d{1,2})$";

pub struct ScriptParser {
    line: Regex,
    date: Regex,
}

impl ScriptParser {
    pub fn new() -> Result<Self, ScriptError> {
        let compile = |pattern: &str| Regex::new(pattern).map_err(|e| ScriptError::new(0, e.to_string()));
        Ok(Self {
            line: compile(LINE_PATTERN)?,
            date: compile(DATE_PATTERN)?,
        })
    }

    /// Parses a whole script. Blank lines and `#` comments are skipped; each
    /// command is paired with its 1-based line number.
    pub fn parse(&self, source: &str) -> Result<Vec<(usize, Command)>, ScriptError> {
        let mut commands = Vec::new();
        for (idx, text) in source.lines().enumerate() {
            if let Some(cmd) = self.parse_line(idx + 1, text)? {
                commands.push((idx + 1, cmd));
            }
        }
        Ok(commands)
    }

    pub fn parse_line(&self, line: usize, text: &str) -> Result<Option<Command>, ScriptError> {
        let text = match text.find('#') {
            Some(pos) => &text[..pos],
            None => text,
        }
        .trim();
        if text.is_empty() {
            return Ok(None);
        }
        let Some(caps) = self.line.captures(text) else {
            return Err(ScriptError::new(line, format!("cannot parse '{text}'")));
        };
        let name = caps["cmd"].to_ascii_lowercase();
        let args: Vec<&str> = caps
            .name("args")
            .map(|m| m.as_str().split_whitespace().collect())
            .unwrap_or_default();

        let arity = |n: usize| {
            if args.len() == n {
                Ok(())
            } else {
                Err(ScriptError::new(
                    line,
                    format!("'{name}' takes {n} argument(s), got {}", args.len()),
                ))
            }
        };

        let cmd = match name.as_str() {
            "open" => arity(0).map(|_| Command::Open)?,
            "reset" => arity(0).map(|_| Command::Reset)?,
            "apply" => arity(0).map(|_| Command::Apply)?,
            "cancel" => arity(0).map(|_| Command::Cancel)?,
            "dismiss" => arity(0).map(|_| Command::Dismiss)?,
            "prev" => arity(0).map(|_| Command::Prev)?,
            "next" => arity(0).map(|_| Command::Next)?,
            "show" => arity(0).map(|_| Command::Show)?,
            "grid" => arity(0).map(|_| Command::Grid)?,
            "modes" => arity(0).map(|_| Command::Modes)?,
            "click" => {
                arity(1)?;
                Command::Click(self.parse_date(line, args[0])?)
            }
            "hover" => {
                arity(1)?;
                Command::Hover(self.parse_date(line, args[0])?)
            }
            "preset" => {
                arity(1)?;
                Command::Preset(args[0].to_string())
            }
            "group" => {
                arity(1)?;
                Command::Group(args[0].to_string())
            }
            "compare" => {
                arity(1)?;
                match args[0] {
                    "on" => Command::Compare(true),
                    "off" => Command::Compare(false),
                    other => {
                        return Err(ScriptError::new(
                            line,
                            format!("expected 'on' or 'off', got '{other}'"),
                        ));
                    }
                }
            }
            "mode" => {
                arity(1)?;
                let mode = args[0]
                    .parse::<CompareMode>()
                    .map_err(|msg| ScriptError::new(line, msg))?;
                Command::Mode(mode)
            }
            "value" => match args.as_slice() {
                ["none"] => Command::Value(None),
                [a, b] => Command::Value(Some(DateRange::new(
                    self.parse_date(line, a)?,
                    self.parse_date(line, b)?,
                ))),
                _ => {
                    return Err(ScriptError::new(
                        line,
                        "'value' takes two dates or 'none'",
                    ));
                }
            },
            other => {
                return Err(ScriptError::new(line, format!("unknown command '{other}'")));
            }
        };
        Ok(Some(cmd))
    }

    /// Accepts `YYYY-MM-DD` and `YYYY/MM/DD`.
    pub fn parse_date(&self, line: usize, text: &str) -> Result<NaiveDate, ScriptError> {
        let invalid = || ScriptError::new(line, format!("invalid date '{text}'"));
        let caps = self.date.captures(text).ok_or_else(invalid)?;
        let y = caps["y"].parse::<i32>().map_err(|_| invalid())?;
        let m = caps["m"].parse::<u32>().map_err(|_| invalid())?;
        let d = caps["d"].parse::<u32>().map_err(|_| invalid())?;
        NaiveDate::from_ymd_opt(y, m, d).ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn parse(src: &str) -> Vec<Command> {
        ScriptParser::new()
            .unwrap()
            .parse(src)
            .unwrap()
            .into_iter()
            .map(|(_, cmd)| cmd)
            .collect()
    }

    fn parse_err(src: &str) -> ScriptError {
        ScriptParser::new().unwrap().parse(src).unwrap_err()
    }

    #[test]
    fn parse_empty() {
        assert!(parse("").is_empty());
        assert!(parse("\n   \n# only a comment\n").is_empty());
    }

    #[test]
    fn parse_simple_commands() {
        let cmds = parse("open\nclick 2024-03-10  # first\nhover 2024/3/12\napply");
        assert_eq!(
            cmds,
            vec![
                Command::Open,
                Command::Click(d(2024, 3, 10)),
                Command::Hover(d(2024, 3, 12)),
                Command::Apply,
            ]
        );
    }

    #[test]
    fn parse_compare_and_mode() {
        let cmds = parse("compare on\nmode samePeriodLastYear\nCOMPARE off\nmodes");
        assert_eq!(
            cmds,
            vec![
                Command::Compare(true),
                Command::Mode(CompareMode::SamePeriodLastYear),
                Command::Compare(false),
                Command::Modes,
            ]
        );
    }

    #[test]
    fn parse_value() {
        assert_eq!(
            parse("value 2024-03-20 2024-03-10\nvalue none"),
            vec![
                Command::Value(Some(DateRange::new(d(2024, 3, 10), d(2024, 3, 20)))),
                Command::Value(None),
            ]
        );
    }

    #[test]
    fn parse_errors_carry_line_numbers() {
        let err = parse_err("open\n\nfrobnicate");
        assert_eq!(err.line, 3);
        assert!(err.message.contains("frobnicate"));

        assert_eq!(parse_err("click 2024-02-30").line, 1);
        assert_eq!(parse_err("open now").line, 1);
        assert_eq!(parse_err("compare maybe").line, 1);
        assert_eq!(parse_err("mode weekly").line, 1);
        assert_eq!(parse_err("value 2024-01-01").line, 1);
    }
}
