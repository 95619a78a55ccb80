//! Product catalog calls.

use fakestore_core::{NewProduct, Product, ProductId};
use reqwest::Method;
use tracing::instrument;

use super::{CatalogClient, CatalogError};

const RESOURCE: &str = "product";

impl CatalogClient {
    /// Fetch the full product collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.get_list(RESOURCE, "/products").await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded.
    #[instrument(skip(self, draft))]
    pub async fn create_product(&self, draft: &NewProduct) -> Result<Product, CatalogError> {
        self.send_json(RESOURCE, Method::POST, "/products", draft)
            .await
    }

    /// Replace a product record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded.
    #[instrument(skip(self, product), fields(id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        product: &Product,
    ) -> Result<Product, CatalogError> {
        self.send_json(RESOURCE, Method::PUT, &format!("/products/{id}"), product)
            .await
    }

    /// Delete a product by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        self.delete(RESOURCE, &format!("/products/{id}")).await
    }
}
