//! Cart records.
//!
//! A cart is an ordered sequence of line items referencing products by
//! identifier. Line items have no identity of their own, and a referenced
//! product may no longer exist in the catalog (a dangling reference); the
//! aggregation layer tolerates that by skipping the line.

use serde::{Deserialize, Serialize};

use crate::types::{CartId, ProductId, UserId};

/// A (productId, quantity) pair nested within a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A cart record as returned by the upstream catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    pub products: Vec<CartLine>,
}

/// A cart draft for create calls (no identifier yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCart {
    pub user_id: UserId,
    pub products: Vec<CartLine>,
}

impl NewCart {
    /// Attach an identifier, turning the draft into a full record for a
    /// replace call.
    #[must_use]
    pub fn with_id(self, id: CartId) -> Cart {
        Cart {
            id,
            user_id: self.user_id,
            products: self.products,
        }
    }
}

impl From<Cart> for NewCart {
    fn from(cart: Cart) -> Self {
        Self {
            user_id: cart.user_id,
            products: cart.products,
        }
    }
}
