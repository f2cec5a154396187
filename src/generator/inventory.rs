use std::path::Path;
use walkdir::WalkDir;

use crate::error::SimulatorError;
use crate::naming::ProductName;
use crate::product::layout::ISIP_EXTENSION;

/// Products already materialized in `output_dir`, sorted by product type
/// then start time. A failed run leaves a prefix of its products behind;
/// this is how a caller finds out which.
pub fn inventory(output_dir: &Path) -> Result<Vec<ProductName>, SimulatorError> {
    let mut products = Vec::new();

    for entry in WalkDir::new(output_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if let Some(name) = file_name.strip_suffix(ISIP_EXTENSION) {
            products.push(name.parse::<ProductName>()?);
        }
    }

    products.sort_by(|a, b| {
        (a.product_type, a.start, a.stop).cmp(&(b.product_type, b.start, b.stop))
    });

    Ok(products)
}
