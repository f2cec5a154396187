//! Dummy acquisition products for simulation test fixtures.
//!
//! From one reference time and a satellite id, [`generator::FixtureGenerator`]
//! derives the granules of eleven level-0 product types and writes each one
//! as an `.ISIP` directory with placeholder payloads and an IIF metadata
//! document.

pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod naming;
pub mod product;
pub mod product_type;
pub mod schedule;

pub use error::SimulatorError;
pub use generator::{FixtureGenerator, generate_dummy_products};
