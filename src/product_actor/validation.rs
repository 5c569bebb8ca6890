use tracing::warn;

use crate::domain::ProductCreate;
use crate::error::CatalogError;

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Checks a product before it is stored. Stops at the first violation.
pub fn validate_new_product(product: Option<ProductCreate>) -> Result<ProductCreate, CatalogError> {
    let Some(product) = product else {
        warn!("Received absent product");
        return Err(CatalogError::invalid("Product cannot be null"));
    };

    if is_blank(product.name.as_deref()) {
        warn!("Product name is absent or blank");
        return Err(CatalogError::invalid("Product name cannot be null or empty"));
    }

    if is_blank(product.category.as_deref()) {
        warn!("Product category is absent or blank");
        return Err(CatalogError::invalid("Product category cannot be null or empty"));
    }

    if product.price.is_nan() || product.price.is_infinite() {
        warn!(price = %product.price, "Product price is not a finite number");
        return Err(CatalogError::invalid("Product price must be a finite number"));
    }

    if product.price < 0.0 {
        warn!(price = %product.price, "Product price is negative");
        return Err(CatalogError::invalid("Product price cannot be negative"));
    }

    if is_blank(product.image_url.as_deref()) {
        warn!("Product image url is absent or blank");
        return Err(CatalogError::invalid("Product image url cannot be null or empty"));
    }

    Ok(product)
}
