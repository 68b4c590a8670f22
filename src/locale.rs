//! Locale capability used for headings and labels.

use crate::error::ConfigError;
use chrono::{Datelike, NaiveDate, Weekday};
use icu::locale::Locale as IcuTag;
use icu::locale::extensions::unicode::Key;

/// Naming and week conventions a locale must provide.
pub trait LocaleProvider {
    /// Two-letter weekday heading ("Mo").
    fn weekday_short(&self, weekday: Weekday) -> String;

    fn month_long(&self, month: u32) -> String;

    fn month_short(&self, month: u32) -> String;

    /// First grid column, 0 = Sunday.
    fn week_starts_on(&self) -> u8;

    /// "Mar 10, 2024"
    fn format_date(&self, date: NaiveDate) -> String {
        format!(
            "{} {}, {}",
            self.month_short(date.month()),
            date.day(),
            date.year()
        )
    }

    /// "March 2024"
    fn format_month_title(&self, month: NaiveDate) -> String {
        format!("{} {}", self.month_long(month.month()), month.year())
    }
}

fn month_name_long(m: u32) -> &'static str {
    match m {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "January",
    }
}

fn month_name_short(m: u32) -> &'static str {
    match m {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "Jan",
    }
}

fn weekday_name_short(d: Weekday) -> &'static str {
    match d {
        Weekday::Sun => "Su",
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
    }
}

/// Built-in English names with a Sunday week start.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishLocale;

impl LocaleProvider for EnglishLocale {
    fn weekday_short(&self, weekday: Weekday) -> String {
        weekday_name_short(weekday).to_string()
    }

    fn month_long(&self, month: u32) -> String {
        month_name_long(month).to_string()
    }

    fn month_short(&self, month: u32) -> String {
        month_name_short(month).to_string()
    }

    fn week_starts_on(&self) -> u8 {
        0
    }
}

/// A BCP-47 locale whose week start comes from CLDR week data (or an explicit
/// `-u-fw-` keyword). Names use the English tables.
#[derive(Clone, Debug)]
pub struct IcuLocale {
    tag: String,
    week_start: u8,
}

impl IcuLocale {
    pub fn parse(tag: &str) -> Result<Self, ConfigError> {
        let locale: IcuTag = tag
            .parse()
            .map_err(|_| ConfigError::InvalidLocale(tag.to_string()))?;
        let week_start = fw_keyword_week_start(&locale)
            .or_else(|| cldr_week_start(&locale))
            .unwrap_or(0);
        Ok(Self {
            tag: locale.to_string(),
            week_start,
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl LocaleProvider for IcuLocale {
    fn weekday_short(&self, weekday: Weekday) -> String {
        EnglishLocale.weekday_short(weekday)
    }

    fn month_long(&self, month: u32) -> String {
        EnglishLocale.month_long(month)
    }

    fn month_short(&self, month: u32) -> String {
        EnglishLocale.month_short(month)
    }

    fn week_starts_on(&self) -> u8 {
        self.week_start
    }
}

fn fw_keyword_week_start(locale: &IcuTag) -> Option<u8> {
    let key: Key = "fw".parse().ok()?;
    let value = locale.extensions.unicode.keywords.get(&key)?.to_string();
    match value.as_str() {
        "sun" => Some(0),
        "mon" => Some(1),
        "tue" => Some(2),
        "wed" => Some(3),
        "thu" => Some(4),
        "fri" => Some(5),
        "sat" => Some(6),
        _ => None,
    }
}

fn cldr_week_start(locale: &IcuTag) -> Option<u8> {
    let info = icu::calendar::week::WeekInformation::try_new(locale.into()).ok()?;
    Some(weekday_offset(info.first_weekday))
}

fn weekday_offset(wd: icu::calendar::types::Weekday) -> u8 {
    match wd {
        icu::calendar::types::Weekday::Sunday => 0,
        icu::calendar::types::Weekday::Monday => 1,
        icu::calendar::types::Weekday::Tuesday => 2,
        icu::calendar::types::Weekday::Wednesday => 3,
        icu::calendar::types::Weekday::Thursday => 4,
        icu::calendar::types::Weekday::Friday => 5,
        icu::calendar::types::Weekday::Saturday => 6,
    }
}
