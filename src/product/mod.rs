pub mod iif;
pub mod layout;

pub use iif::{IifWriter, write_iif_file};
pub use layout::{iif_path, materialize};

use chrono::NaiveDateTime;

use crate::naming::ProductName;
use crate::product_type::ProductType;
use crate::schedule::Granule;

pub const GROUND_STATION: &str = "CGS";
pub const PROVIDER: &str = "L0PP";

/// Everything needed to materialize and describe one granule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDescriptor {
    pub product_type: ProductType,
    pub name: String,
    pub granule: Granule,
    pub ground_station: &'static str,
    pub provider: &'static str,
}

impl ProductDescriptor {
    pub fn new(
        satellite_id: &str,
        product_type: ProductType,
        granule: Granule,
        generated: NaiveDateTime,
    ) -> Self {
        let name = ProductName::new(
            satellite_id,
            product_type,
            granule.start,
            granule.stop,
            generated,
        )
        .to_string();

        Self {
            product_type,
            name,
            granule,
            ground_station: GROUND_STATION,
            provider: PROVIDER,
        }
    }
}
