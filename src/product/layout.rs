use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SimulatorError;

pub const ISIP_EXTENSION: &str = ".ISIP";
pub const PAYLOAD_FILES: [&str; 2] = ["ISPData.dat", "ISPData.xsd"];
pub const PAYLOAD_CONTENT: &str = "This product was generated by the S3ACQSimulator";

/// Creates `root/<name>.ISIP/<name>/` with the two placeholder payload files
/// and returns the `.ISIP` directory.
///
/// Directories are created one level at a time, so an existing product or a
/// missing root fails instead of being reused. Nothing is cleaned up on
/// failure.
pub fn materialize(root: &Path, name: &str) -> Result<PathBuf, SimulatorError> {
    let parent = root.join(format!("{name}{ISIP_EXTENSION}"));
    let child = parent.join(name);

    create_dir(&parent)?;
    create_dir(&child)?;

    for file_name in PAYLOAD_FILES {
        let path = child.join(file_name);
        fs::write(&path, PAYLOAD_CONTENT).map_err(|source| SimulatorError::Io { path, source })?;
    }

    Ok(parent)
}

/// Location of the metadata document inside a materialized product.
pub fn iif_path(isip_dir: &Path, name: &str) -> PathBuf {
    isip_dir.join(name).join(format!("{name}_iif.xml"))
}

fn create_dir(path: &Path) -> Result<(), SimulatorError> {
    fs::create_dir(path).map_err(|source| SimulatorError::Io {
        path: path.to_path_buf(),
        source,
    })
}
