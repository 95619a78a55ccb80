//! Home page with product search.
//!
//! Open to anonymous visitors. The search fetches the product collection
//! and jumps to the first record matching the term and optional category;
//! no match renders an inline message instead.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use fakestore_core::{Category, Product};

use crate::filters;
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub logged_in: bool,
    pub error: Option<String>,
    pub q: String,
    pub category: String,
    pub categories: Vec<Category>,
}

impl HomeTemplate {
    fn new(logged_in: bool, error: Option<String>, q: String, category: String) -> Self {
        Self {
            logged_in,
            error,
            q,
            category,
            categories: Category::ALL.to_vec(),
        }
    }
}

/// Display the home page, running a product search when one was submitted.
pub async fn home(State(state): State<AppState>, Query(query): Query<SearchQuery>) -> Response {
    let logged_in = state.session().is_authenticated();

    // No submitted search: plain landing page.
    let Some(term) = query.q else {
        return HomeTemplate::new(logged_in, None, String::new(), String::new()).into_response();
    };
    let category = query.category.unwrap_or_default();

    match state.catalog().list_products().await {
        Ok(products) => match first_match(&products, &term, &category) {
            Some(product) => Redirect::to(&format!("/product/{}", product.id)).into_response(),
            None => HomeTemplate::new(
                logged_in,
                Some("No products found matching your search.".to_string()),
                term,
                category,
            )
            .into_response(),
        },
        Err(err) => {
            tracing::warn!(error = %err, "product search failed");
            HomeTemplate::new(
                logged_in,
                Some("Failed to search products. Please try again.".to_string()),
                term,
                category,
            )
            .into_response()
        }
    }
}

/// First product matching the term (title substring, case-insensitive) and
/// category, if one was selected.
fn first_match<'a>(products: &'a [Product], term: &str, category: &str) -> Option<&'a Product> {
    let term = term.to_lowercase();
    products.iter().find(|product| {
        (category.is_empty() || product.category.as_str() == category)
            && product.title.to_lowercase().contains(&term)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fakestore_core::ProductId;

    fn product(id: i32, title: &str, category: Category) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: "1.00".parse().unwrap(),
            description: String::new(),
            image: String::new(),
            category,
        }
    }

    #[test]
    fn test_first_match_is_case_insensitive() {
        let products = vec![
            product(1, "Gold Ring", Category::Jewelery),
            product(2, "Silver Ring", Category::Jewelery),
        ];

        let found = first_match(&products, "silver", "").unwrap();
        assert_eq!(found.id, ProductId::new(2));
    }

    #[test]
    fn test_first_match_respects_category() {
        let products = vec![
            product(1, "Ring", Category::Jewelery),
            product(2, "Ring Light", Category::Electronics),
        ];

        let found = first_match(&products, "ring", "electronics").unwrap();
        assert_eq!(found.id, ProductId::new(2));
        assert!(first_match(&products, "ring", "men's clothing").is_none());
    }

    #[test]
    fn test_empty_term_matches_first_product() {
        let products = vec![product(1, "Anything", Category::Electronics)];
        assert!(first_match(&products, "", "").is_some());
    }
}
