//! Cart catalog calls.

use fakestore_core::{Cart, CartId, CartLine, NewCart, UserId};
use reqwest::Method;
use tracing::instrument;

use super::{CatalogClient, CatalogError};

const RESOURCE: &str = "cart";

impl CatalogClient {
    /// Fetch the full cart collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded.
    #[instrument(skip(self))]
    pub async fn list_carts(&self) -> Result<Vec<Cart>, CatalogError> {
        self.get_list(RESOURCE, "/carts").await
    }

    /// Create a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded.
    #[instrument(skip(self, draft))]
    pub async fn create_cart(&self, draft: &NewCart) -> Result<Cart, CatalogError> {
        self.send_json(RESOURCE, Method::POST, "/carts", draft).await
    }

    /// Replace a cart record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded.
    #[instrument(skip(self, cart), fields(id = %id))]
    pub async fn update_cart(&self, id: CartId, cart: &Cart) -> Result<Cart, CatalogError> {
        self.send_json(RESOURCE, Method::PUT, &format!("/carts/{id}"), cart)
            .await
    }

    /// Delete a cart by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_cart(&self, id: CartId) -> Result<(), CatalogError> {
        self.delete(RESOURCE, &format!("/carts/{id}")).await
    }

    /// Create a single-line cart for a product, the detail view's
    /// "Add to Cart" action.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_to_cart(
        &self,
        user_id: UserId,
        product_id: fakestore_core::ProductId,
        quantity: u32,
    ) -> Result<Cart, CatalogError> {
        let draft = NewCart {
            user_id,
            products: vec![CartLine {
                product_id,
                quantity,
            }],
        };
        self.create_cart(&draft).await
    }
}
