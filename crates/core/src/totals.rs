//! Cart total aggregation.
//!
//! Totals are computed by cross-referencing cart line items against a
//! product collection fetched in the same view. A line item whose product
//! identifier has no match in the collection contributes nothing - carts
//! routinely outlive catalog entries upstream, and a dangling reference is
//! not an error here.

use rust_decimal::Decimal;

use crate::models::{Cart, Product};
use crate::types::money::round_money;

/// Total price of a single cart against the given product collection.
///
/// Sums `price * quantity` over the cart's line items, skipping any line
/// whose product is absent from `products`. The result is rounded to two
/// decimal places.
#[must_use]
pub fn cart_total(cart: &Cart, products: &[Product]) -> Decimal {
    let total = cart
        .products
        .iter()
        .filter_map(|line| {
            products
                .iter()
                .find(|product| product.id == line.product_id)
                .map(|product| product.price * Decimal::from(line.quantity))
        })
        .sum();

    round_money(total)
}

/// Total price across all carts, sharing one product collection.
///
/// Each cart is evaluated independently against the same collection, so the
/// result equals the sum of [`cart_total`] per cart regardless of how the
/// collection was fetched.
#[must_use]
pub fn carts_total(carts: &[Cart], products: &[Product]) -> Decimal {
    round_money(carts.iter().map(|cart| cart_total(cart, products)).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CartLine, Category};
    use crate::types::money::format_amount;
    use crate::types::{CartId, ProductId, UserId};

    fn product(id: i32, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: price.parse().unwrap(),
            description: String::new(),
            image: String::new(),
            category: Category::Electronics,
        }
    }

    fn cart(id: i32, lines: &[(i32, u32)]) -> Cart {
        Cart {
            id: CartId::new(id),
            user_id: UserId::new(1),
            products: lines
                .iter()
                .map(|&(product_id, quantity)| CartLine {
                    product_id: ProductId::new(product_id),
                    quantity,
                })
                .collect(),
        }
    }

    #[test]
    fn test_cart_total_sums_price_times_quantity() {
        let products = vec![product(1, "10.00"), product(2, "2.50")];
        let cart = cart(1, &[(1, 2), (2, 4)]);

        assert_eq!(format_amount(cart_total(&cart, &products)), "30.00");
    }

    #[test]
    fn test_dangling_reference_contributes_zero() {
        // The worked example: one resolvable line, one dangling.
        let products = vec![product(1, "10.00")];
        let cart = cart(1, &[(1, 2), (99, 5)]);

        assert_eq!(format_amount(cart_total(&cart, &products)), "20.00");
    }

    #[test]
    fn test_empty_cart_and_empty_collection() {
        let products = vec![product(1, "10.00")];
        assert_eq!(cart_total(&cart(1, &[]), &products), Decimal::ZERO);
        assert_eq!(cart_total(&cart(1, &[(1, 3)]), &[]), Decimal::ZERO);
    }

    #[test]
    fn test_carts_total_equals_sum_of_cart_totals() {
        let products = vec![product(1, "19.99"), product(2, "5.25")];
        let carts = vec![cart(1, &[(1, 1), (2, 2)]), cart(2, &[(2, 3), (7, 1)])];

        let expected = cart_total(&carts[0], &products) + cart_total(&carts[1], &products);
        assert_eq!(carts_total(&carts, &products), expected);
        assert_eq!(format_amount(carts_total(&carts, &products)), "46.24");
    }

    #[test]
    fn test_totals_round_to_two_places() {
        let products = vec![product(1, "0.333")];
        let cart = cart(1, &[(1, 3)]);

        assert_eq!(format_amount(cart_total(&cart, &products)), "1.00");
    }
}
