use std::path::PathBuf;
use thiserror::Error;

use crate::config::{ConfigError, ReferenceTimeError};
use crate::naming::ProductNameError;

/// Any failure of a generation run. None of these are recovered from: the
/// run stops at the first error and leaves what it already wrote in place.
#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error(transparent)]
    ReferenceTime(#[from] ReferenceTimeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    ProductName(#[from] ProductNameError),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to walk output directory: {0}")]
    Walk(#[from] walkdir::Error),
}
