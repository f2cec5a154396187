//! Product names and the fixed-width time encodings used in names and
//! metadata. Downstream tooling parses both positionally, so the formats
//! here must not change.

use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::product_type::ProductType;

/// `YYYYMMDDTHHMMSS`, used inside product names.
pub const NAME_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";
/// `YYYY-MM-DDTHH:MM:SS.ffffffZ`, used in metadata documents.
pub const METADATA_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

const NAME_SUFFIX: &str = "___________________WER_D_NR____";

pub fn format_name_time(time: &NaiveDateTime) -> String {
    time.format(NAME_TIME_FORMAT).to_string()
}

pub fn format_metadata_time(time: &NaiveDateTime) -> String {
    time.format(METADATA_TIME_FORMAT).to_string()
}

pub fn parse_metadata_time(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text, METADATA_TIME_FORMAT)
}

#[derive(Debug, Error)]
pub enum ProductNameError {
    #[error("product name '{0}' does not end with the ISIP suffix")]
    Suffix(String),
    #[error("product name '{0}' does not have satellite, type and three time fields")]
    Fields(String),
    #[error(transparent)]
    ProductType(#[from] crate::product_type::UnknownProductType),
    #[error("invalid time field '{text}': {source}")]
    Time {
        text: String,
        source: chrono::ParseError,
    },
}

/// Canonical name of one product instance:
/// `{satellite}_{type}_{start}_{stop}_{generated}___________________WER_D_NR____`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName {
    pub satellite_id: String,
    pub product_type: ProductType,
    pub start: NaiveDateTime,
    pub stop: NaiveDateTime,
    pub generated: NaiveDateTime,
}

impl ProductName {
    pub fn new(
        satellite_id: impl Into<String>,
        product_type: ProductType,
        start: NaiveDateTime,
        stop: NaiveDateTime,
        generated: NaiveDateTime,
    ) -> Self {
        Self {
            satellite_id: satellite_id.into(),
            product_type,
            start,
            stop,
            generated,
        }
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}_{}{}",
            self.satellite_id,
            self.product_type.code(),
            format_name_time(&self.start),
            format_name_time(&self.stop),
            format_name_time(&self.generated),
            NAME_SUFFIX
        )
    }
}

fn parse_name_time(text: &str) -> Result<NaiveDateTime, ProductNameError> {
    NaiveDateTime::parse_from_str(text, NAME_TIME_FORMAT).map_err(|source| {
        ProductNameError::Time {
            text: text.to_string(),
            source,
        }
    })
}

impl FromStr for ProductName {
    type Err = ProductNameError;

    // Parsed from the right: the time fields never contain '_' and the
    // product type code has a fixed width, so the satellite id may.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_suffix(NAME_SUFFIX)
            .ok_or_else(|| ProductNameError::Suffix(s.to_string()))?;

        let mut fields = body.rsplitn(4, '_');
        let (Some(generated), Some(stop), Some(start), Some(head)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(ProductNameError::Fields(s.to_string()));
        };

        let code_start = head
            .len()
            .checked_sub(11)
            .filter(|&index| index > 1 && head.is_char_boundary(index))
            .ok_or_else(|| ProductNameError::Fields(s.to_string()))?;
        let (satellite_id, code) = head.split_at(code_start);
        let satellite_id = satellite_id
            .strip_suffix('_')
            .ok_or_else(|| ProductNameError::Fields(s.to_string()))?;

        Ok(ProductName {
            satellite_id: satellite_id.to_string(),
            product_type: code.parse()?,
            start: parse_name_time(start)?,
            stop: parse_name_time(stop)?,
            generated: parse_name_time(generated)?,
        })
    }
}
