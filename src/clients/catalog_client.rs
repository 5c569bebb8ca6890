use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::app_system::CatalogConfig;
use crate::domain::{Product, ProductCreate};
use crate::error::CatalogError;
use crate::pagination::paginate;
use crate::product_actor::validate_new_product;
use crate::{search, seed};

/// Client for the product catalog.
///
/// Validates input, then talks to the store actor. Pagination and ranking run
/// here, on the caller's task, over a snapshot the caller owns.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<Product>,
    config: CatalogConfig,
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<Product>, config: CatalogConfig) -> Self {
        Self {
            inner,
            config: config.with_valid_page_sizes(),
        }
    }

    /// Validates and stores a product, returning it with its assigned id.
    #[instrument(skip(self, product))]
    pub async fn add_product(
        &self,
        product: impl Into<Option<ProductCreate>>,
    ) -> Result<Product, CatalogError> {
        let payload = validate_new_product(product.into())?;
        debug!(name = ?payload.name, "Sending request");
        let product = self.inner.create(payload).await?;
        info!(product_id = %product.id, "Product added");
        Ok(product)
    }

    /// Returns one page of the catalog. Out-of-range arguments are corrected
    /// rather than rejected.
    #[instrument(skip(self))]
    pub async fn list_products(&self, page: i64, size: i64) -> Result<Vec<Product>, CatalogError> {
        let (page, size) = self.clamp_page_request(page, size);
        debug!(page, size, "Sending request");
        let all = self.inner.list().await?;
        Ok(paginate(all, page, size))
    }

    #[instrument(skip(self, id))]
    pub async fn get_product<'a>(
        &self,
        id: impl Into<Option<&'a str>>,
    ) -> Result<Product, CatalogError> {
        let id = match id.into() {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => {
                warn!("Product id is absent or blank");
                return Err(CatalogError::invalid("Product ID cannot be null or empty"));
            }
        };
        debug!(product_id = %id, "Sending request");
        self.inner
            .get(id.clone())
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Best matches for `query` by name, most relevant first.
    #[instrument(skip(self, query))]
    pub async fn search_products<'a>(
        &self,
        query: impl Into<Option<&'a str>>,
    ) -> Result<Vec<Product>, CatalogError> {
        let query = match query.into() {
            Some(q) if !q.trim().is_empty() => q.to_string(),
            _ => {
                warn!("Search query is absent or blank");
                return Err(CatalogError::invalid("Search query cannot be null or empty"));
            }
        };
        debug!(%query, "Sending request");
        let all = self.inner.list().await?;
        search::rank(Some(&query), all)
    }

    /// Replaces the entire catalog with `records`, each under a fresh id.
    /// Records are stored as given, without validation. An empty source
    /// clears the catalog.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn reload_from_source(&self, records: Vec<ProductCreate>) -> Result<usize, CatalogError> {
        if records.is_empty() {
            debug!("Sending clear request");
            self.inner.clear().await?;
            info!("Catalog cleared");
            return Ok(0);
        }
        debug!("Sending request");
        let loaded = self.inner.replace_all(records).await?;
        info!(loaded, "Catalog reloaded");
        Ok(loaded)
    }

    /// Reads a JSON product file and reloads the catalog from it. The catalog
    /// is left untouched if the file cannot be read or parsed.
    #[instrument(skip(self))]
    pub async fn prepopulate(&self, path: &Path) -> Result<usize, CatalogError> {
        let records = seed::load_products(path)?;
        self.reload_from_source(records).await
    }

    fn clamp_page_request(&self, page: i64, size: i64) -> (usize, usize) {
        let page = if page < 0 {
            warn!(page, "Page parameter was negative, using 0");
            0
        } else {
            usize::try_from(page).unwrap_or(usize::MAX)
        };

        let max = i64::try_from(self.config.max_page_size).unwrap_or(i64::MAX);
        let size = if size <= 0 || size > max {
            warn!(size, default = self.config.default_page_size, "Size parameter out of bounds");
            self.config.default_page_size
        } else {
            size as usize
        };
        (page, size)
    }
}
