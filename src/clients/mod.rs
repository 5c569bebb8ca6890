//! Client handles used by callers of the catalog.

mod catalog_client;

pub use catalog_client::*;
