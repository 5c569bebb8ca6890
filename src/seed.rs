//! Bulk loading of product records from a JSON array.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::domain::ProductCreate;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error parsing product data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parses a JSON array of product objects. Unknown fields, `id` included, are
/// ignored.
pub fn parse_products(text: &str) -> Result<Vec<ProductCreate>, SeedError> {
    Ok(serde_json::from_str(text)?)
}

#[instrument]
pub fn load_products(path: &Path) -> Result<Vec<ProductCreate>, SeedError> {
    let text = fs::read_to_string(path).map_err(|source| {
        error!(error = %source, "Error reading product data");
        SeedError::Io { path: path.to_path_buf(), source }
    })?;
    let products = parse_products(&text)?;
    info!(count = products.len(), "Loaded product data");
    Ok(products)
}
