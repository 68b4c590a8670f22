//! Source of "today" for constraint checks and preset resolution.

use crate::error::ConfigError;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::warn;

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock date in an IANA time zone.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| ConfigError::UnknownTimeZone(name.to_string()))
    }

    /// Uses the host time zone, or UTC if it cannot be determined.
    pub fn local() -> Self {
        let name = match iana_time_zone::get_timezone() {
            Ok(name) => name,
            Err(e) => {
                warn!("Could not detect host time zone ({e}), using UTC");
                return Self::new(Tz::UTC);
            }
        };
        Self::from_name(&name).unwrap_or_else(|e| {
            warn!("{e}, using UTC");
            Self::new(Tz::UTC)
        })
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::local()
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}

/// A clock pinned to one day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
