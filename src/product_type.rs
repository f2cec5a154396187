use std::fmt::Display;
use std::str::FromStr;

use crate::schedule::{Dump, Schedule};

// Shared offsets, in seconds from the reference instant.
const ORBIT: i64 = 6155;
const DUMP_LEAD: i64 = 4477;
const DUMP_SPLIT: i64 = 1583;
const OLCI_OFFSET: i64 = 654;
const OLCI_WINDOW: i64 = 2636;

const SPLIT_DUMP: Dump = Dump::Split {
    lead: DUMP_LEAD,
    at: DUMP_SPLIT,
};

/// The eleven level-0 product types, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProductType {
    DoDop,
    DoNav,
    GnGns,
    MwMwr,
    OlCr,
    OlEfr,
    SlSlt,
    SrSra,
    TmHkm,
    TmHkm2,
    TmNat,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown product type '{0}'")]
pub struct UnknownProductType(pub String);

impl ProductType {
    pub const ALL: [ProductType; 11] = [
        ProductType::DoDop,
        ProductType::DoNav,
        ProductType::GnGns,
        ProductType::MwMwr,
        ProductType::OlCr,
        ProductType::OlEfr,
        ProductType::SlSlt,
        ProductType::SrSra,
        ProductType::TmHkm,
        ProductType::TmHkm2,
        ProductType::TmNat,
    ];

    /// Fixed-width (11 character) product type code.
    pub fn code(&self) -> &'static str {
        match self {
            ProductType::DoDop => "DO_0_DOP__G",
            ProductType::DoNav => "DO_0_NAV__G",
            ProductType::GnGns => "GN_0_GNS__G",
            ProductType::MwMwr => "MW_0_MWR__G",
            ProductType::OlCr => "OL_0_CR___G",
            ProductType::OlEfr => "OL_0_EFR__G",
            ProductType::SlSlt => "SL_0_SLT__G",
            ProductType::SrSra => "SR_0_SRA__G",
            ProductType::TmHkm => "TM_0_HKM__G",
            ProductType::TmHkm2 => "TM_0_HKM2_G",
            ProductType::TmNat => "TM_0_NAT__G",
        }
    }

    pub fn schedule(&self) -> Schedule {
        match self {
            // NAV and NAT keep their own shorter windows.
            ProductType::DoNav => two_part(6150),
            ProductType::TmNat => two_part(6142),
            ProductType::DoDop
            | ProductType::GnGns
            | ProductType::MwMwr
            | ProductType::TmHkm
            | ProductType::TmHkm2 => two_part(ORBIT),
            ProductType::OlCr => Schedule {
                offset: OLCI_OFFSET,
                window: OLCI_WINDOW,
                tile: None,
                dump: Dump::AtWindowStart,
                receive_offset: ORBIT,
            },
            ProductType::OlEfr => Schedule {
                offset: OLCI_OFFSET,
                window: OLCI_WINDOW,
                tile: Some(120),
                dump: Dump::AtWindowStart,
                receive_offset: ORBIT,
            },
            ProductType::SlSlt => tiled_orbit(300),
            ProductType::SrSra => tiled_orbit(600),
        }
    }
}

fn two_part(window: i64) -> Schedule {
    Schedule {
        offset: 0,
        window,
        tile: None,
        dump: SPLIT_DUMP,
        receive_offset: window,
    }
}

fn tiled_orbit(tile: i64) -> Schedule {
    Schedule {
        offset: 0,
        window: ORBIT,
        tile: Some(tile),
        dump: SPLIT_DUMP,
        receive_offset: ORBIT,
    }
}

impl FromStr for ProductType {
    type Err = UnknownProductType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductType::ALL
            .iter()
            .copied()
            .find(|product_type| product_type.code() == s)
            .ok_or_else(|| UnknownProductType(s.to_string()))
    }
}

impl Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
