use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate};

impl Entity for Product {
    type Id = String;
    type CreatePayload = ProductCreate;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Product from creation parameters.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the store
    /// * `payload` - Product fields; absent strings become empty
    ///
    /// # Notes
    /// No validation happens here. Bulk loads go straight through, and the
    /// single add path is validated by [`validate_new_product`](super::validate_new_product)
    /// before it reaches the store.
    fn from_create(id: String, payload: ProductCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            name: payload.name.unwrap_or_default(),
            category: payload.category.unwrap_or_default(),
            description: payload.description,
            price: payload.price,
            image_url: payload.image_url.unwrap_or_default(),
        })
    }
}
