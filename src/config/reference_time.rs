use chrono::{Datelike, Duration, NaiveDateTime};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::product_type::ProductType;

const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// Product names carry four-digit years.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

/// The seed instant of a run, written as `<zone>=<YYYY-MM-DDTHH:MM:SS>`
/// (e.g. `UTC=2020-01-01T00:00:00`).
///
/// The zone label is kept for display only. All offsets are naive duration
/// arithmetic on the parsed instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTime {
    zone: String,
    instant: NaiveDateTime,
}

#[derive(Debug, Error)]
pub enum ReferenceTimeError {
    #[error("reference time '{0}' is missing the '<zone>=' prefix")]
    MissingZone(String),
    #[error("invalid time zone label '{0}'")]
    InvalidZone(String),
    #[error("invalid reference instant '{text}': {source}")]
    Instant {
        text: String,
        source: chrono::ParseError,
    },
    #[error("reference instant '{0}' derives product times outside years 0000-9999")]
    OutOfRange(String),
}

impl ReferenceTime {
    /// Checks the zone label and that every time derived from `instant` by
    /// any product schedule keeps a four-digit year.
    pub fn new(
        zone: impl Into<String>,
        instant: NaiveDateTime,
    ) -> Result<Self, ReferenceTimeError> {
        let zone = zone.into();
        if zone.is_empty() || !zone.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ReferenceTimeError::InvalidZone(zone));
        }

        let (earliest, latest) = ProductType::ALL
            .iter()
            .map(|product_type| product_type.schedule().extent())
            .fold((0, 0), |(lo, hi), (start, end)| (lo.min(start), hi.max(end)));

        let in_range = |offset: i64| {
            instant
                .checked_add_signed(Duration::seconds(offset))
                .is_some_and(|time| YEAR_RANGE.contains(&time.year()))
        };
        if !in_range(earliest) || !in_range(latest) {
            return Err(ReferenceTimeError::OutOfRange(
                instant.format(INSTANT_FORMAT).to_string(),
            ));
        }

        Ok(Self { zone, instant })
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    pub fn instant(&self) -> NaiveDateTime {
        self.instant
    }
}

impl FromStr for ReferenceTime {
    type Err = ReferenceTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (zone, instant) = s
            .split_once('=')
            .ok_or_else(|| ReferenceTimeError::MissingZone(s.to_string()))?;

        let instant = NaiveDateTime::parse_from_str(instant, INSTANT_FORMAT).map_err(|source| {
            ReferenceTimeError::Instant {
                text: instant.to_string(),
                source,
            }
        })?;

        Self::new(zone, instant)
    }
}

impl fmt::Display for ReferenceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.zone, self.instant.format(INSTANT_FORMAT))
    }
}
