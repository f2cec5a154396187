use chrono::{NaiveDateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{ConfigError, ReferenceTime};
use crate::error::SimulatorError;
use crate::product::{ProductDescriptor, iif_path, materialize, write_iif_file};
use crate::product_type::ProductType;

pub mod inventory;
pub use inventory::inventory;

/// Generates the dummy products of all eleven product types for one
/// reference time, satellite and output directory.
#[derive(Debug, Clone)]
pub struct FixtureGenerator {
    reference: ReferenceTime,
    satellite_id: String,
    output_dir: PathBuf,
}

impl FixtureGenerator {
    pub fn new(
        reference: ReferenceTime,
        satellite_id: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, SimulatorError> {
        let satellite_id = satellite_id.into();
        if satellite_id.is_empty() {
            return Err(ConfigError::SatelliteId.into());
        }

        Ok(Self {
            reference,
            satellite_id,
            output_dir: output_dir.into(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Descriptors of one product type, in granule order.
    pub fn descriptors(
        &self,
        product_type: ProductType,
        generated: NaiveDateTime,
    ) -> Vec<ProductDescriptor> {
        product_type
            .schedule()
            .granules(self.reference.instant())
            .into_iter()
            .map(|granule| {
                ProductDescriptor::new(&self.satellite_id, product_type, granule, generated)
            })
            .collect()
    }

    /// Descriptors of every product a run would write, without touching the
    /// filesystem.
    pub fn plan(&self, generated: NaiveDateTime) -> Vec<ProductDescriptor> {
        ProductType::ALL
            .iter()
            .flat_map(|&product_type| self.descriptors(product_type, generated))
            .collect()
    }

    /// Runs with the current UTC time as generation time.
    pub fn run(&self) -> Result<Vec<PathBuf>, SimulatorError> {
        self.run_at(Utc::now().naive_utc())
    }

    /// Materializes every product type in the fixed order and returns the
    /// `.ISIP` directories written. Stops at the first error.
    pub fn run_at(&self, generated: NaiveDateTime) -> Result<Vec<PathBuf>, SimulatorError> {
        info!(
            reference = %self.reference,
            satellite = %self.satellite_id,
            output = %self.output_dir.display(),
            "Generating dummy products"
        );

        let mut written = Vec::new();
        for product_type in ProductType::ALL {
            let products = self.generate(product_type, generated)?;
            info!(product_type = %product_type, granules = products.len(), "Generated product type");
            written.extend(products);
        }

        info!(products = written.len(), "Generation finished");
        Ok(written)
    }

    /// Materializes the granules of one product type in ascending order.
    pub fn generate(
        &self,
        product_type: ProductType,
        generated: NaiveDateTime,
    ) -> Result<Vec<PathBuf>, SimulatorError> {
        let mut written = Vec::new();

        for product in self.descriptors(product_type, generated) {
            let isip_dir = materialize(&self.output_dir, &product.name)?;
            write_iif_file(&iif_path(&isip_dir, &product.name), &product)?;

            debug!(
                name = %product.name,
                number = product.granule.number,
                position = %product.granule.position,
                "Wrote granule"
            );
            written.push(isip_dir);
        }

        Ok(written)
    }
}

/// Parses the reference text and runs all generators, sampling the
/// generation time at call time.
pub fn generate_dummy_products(
    reference: &str,
    satellite_id: &str,
    output_dir: &Path,
) -> Result<(), SimulatorError> {
    let reference: ReferenceTime = reference.parse()?;
    FixtureGenerator::new(reference, satellite_id, output_dir)?.run()?;
    Ok(())
}
