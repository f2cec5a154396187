use chrono::{Duration, NaiveDateTime};
use std::fmt;
use std::str::FromStr;

/// Placement of a granule within a multi-granule product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GranulePosition {
    First,
    Last,
    Both,
    None,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid granule position '{0}'")]
pub struct GranulePositionParseError(pub String);

impl GranulePosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            GranulePosition::First => "FIRST",
            GranulePosition::Last => "LAST",
            GranulePosition::Both => "BOTH",
            GranulePosition::None => "NONE",
        }
    }

    pub(crate) fn from_edges(first: bool, last: bool) -> Self {
        match (first, last) {
            (true, true) => GranulePosition::Both,
            (true, false) => GranulePosition::First,
            (false, true) => GranulePosition::Last,
            (false, false) => GranulePosition::None,
        }
    }
}

impl FromStr for GranulePosition {
    type Err = GranulePositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FIRST" => Ok(GranulePosition::First),
            "LAST" => Ok(GranulePosition::Last),
            "BOTH" => Ok(GranulePosition::Both),
            "NONE" => Ok(GranulePosition::None),
            other => Err(GranulePositionParseError(other.to_string())),
        }
    }
}

impl fmt::Display for GranulePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One timed slice of a product's coverage window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Granule {
    pub start: NaiveDateTime,
    pub stop: NaiveDateTime,
    pub receive_start: NaiveDateTime,
    pub receive_stop: NaiveDateTime,
    pub dump_start: NaiveDateTime,
    pub number: u32,
    pub position: GranulePosition,
}

impl Granule {
    pub fn duration(&self) -> Duration {
        self.stop - self.start
    }
}
