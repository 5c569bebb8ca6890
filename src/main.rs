mod actor_framework;
mod app_system;
mod clients;
mod domain;
mod error;
mod ids;
mod pagination;
mod product_actor;
mod search;
mod seed;

#[cfg(test)]
mod mock_framework;

use std::path::{Path, PathBuf};
use tracing::{error, info, warn, Instrument};

use crate::app_system::{setup_tracing, CatalogConfig, CatalogSystem};
use crate::domain::ProductCreate;

const SAMPLE_DATA: &str = "data/products.json";

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = CatalogConfig::from_env();
    let seed_path = config
        .seed_path
        .clone()
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join(SAMPLE_DATA));

    info!("Starting product catalog");
    let system = CatalogSystem::new(config);
    let catalog = system.catalog_client.clone();

    let span = tracing::info_span!("prepopulate", path = %seed_path.display());
    async {
        match catalog.prepopulate(&seed_path).await {
            Ok(count) => info!(count, "Catalog prepopulated"),
            Err(e) => warn!(error = %e, "Starting with an empty catalog"),
        }
    }
    .instrument(span)
    .await;

    let span = tracing::info_span!("product_creation");
    let product = async {
        let product = ProductCreate::new(
            "Travel Laptop Sleeve",
            "Accessories",
            29.0,
            "https://images.example.com/laptop-sleeve.png",
        )
        .with_description("Fits 13 and 14 inch laptops");
        catalog.add_product(product).await.map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;
    info!(product_id = %product.id, "Product created successfully");

    let fetched = catalog.get_product(product.id.as_str()).await.map_err(|e| e.to_string())?;
    info!(name = %fetched.name, price = fetched.price, "Product fetched");

    let first_page = catalog.list_products(0, 5).await.map_err(|e| e.to_string())?;
    info!(count = first_page.len(), "Listed first page");

    let span = tracing::info_span!("search");
    async {
        for query in ["laptop", "keybaord", "   "] {
            match catalog.search_products(query).await {
                Ok(hits) => {
                    let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
                    info!(query, ?names, "Search results");
                }
                Err(e) => error!(query, status = e.http_status(), error = %e, "Search rejected"),
            }
        }
    }
    .instrument(span)
    .await;

    let missing: PathBuf = seed_path.with_file_name("missing.json");
    if let Err(e) = catalog.prepopulate(&missing).await {
        warn!(status = e.http_status(), body = %e.public_message(), "Reload failed, catalog unchanged");
    }

    // Shutdown system gracefully
    drop(catalog);
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
