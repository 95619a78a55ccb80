//! Product route handlers: gated listing, create/edit forms, and the
//! anonymous detail page with its add-to-cart action.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use fakestore_core::{Category, NewProduct, Product, ProductId, UserId};

use crate::error::AppError;
use crate::filters;
use crate::forms::{FormMode, FormState, load_or_default};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub logged_in: bool,
    pub error: Option<String>,
    pub products: Vec<Product>,
}

/// Product create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub logged_in: bool,
    pub verb: &'static str,
    pub action: String,
    pub error: Option<String>,
    pub record: NewProduct,
    pub categories: Vec<Category>,
}

impl ProductFormTemplate {
    fn new(logged_in: bool, state: FormState<ProductId, NewProduct>) -> Self {
        let (mode, record, error) = state.into_parts();
        Self {
            logged_in,
            verb: mode.verb(),
            action: mode.action("/products"),
            error,
            record,
            categories: Category::ALL.to_vec(),
        }
    }
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub logged_in: bool,
    pub error: Option<String>,
    pub product: Option<Product>,
}

/// Raw product form submission. Numeric and enum fields arrive as text
/// and are validated into the draft record.
#[derive(Debug, Deserialize)]
pub struct ProductFormData {
    pub title: String,
    pub price: String,
    pub description: String,
    pub image: String,
    pub category: String,
}

impl ProductFormData {
    fn into_draft(self) -> Result<NewProduct, AppError> {
        let price = self
            .price
            .trim()
            .parse()
            .map_err(|_| AppError::BadRequest("price must be a number".to_string()))?;
        let category = self
            .category
            .parse()
            .map_err(|_| AppError::BadRequest("unknown category".to_string()))?;
        Ok(NewProduct {
            title: self.title,
            price,
            description: self.description,
            image: self.image,
            category,
        })
    }
}

/// Display the product listing. Requires an authenticated session.
pub async fn index(_auth: RequireAuth, State(state): State<AppState>) -> Response {
    list_page(&state, None).await
}

/// Render the listing, fetching the collection fresh; an extra message
/// (say, from a failed delete) rides along above the table.
async fn list_page(state: &AppState, message: Option<String>) -> Response {
    let logged_in = state.session().is_authenticated();
    match state.catalog().list_products().await {
        Ok(products) => ProductsIndexTemplate {
            logged_in,
            error: message,
            products,
        }
        .into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "product listing failed");
            ProductsIndexTemplate {
                logged_in,
                error: Some("Failed to load products. Please try again.".to_string()),
                products: Vec::new(),
            }
            .into_response()
        }
    }
}

/// Display a blank create form.
pub async fn new_form(State(state): State<AppState>) -> impl IntoResponse {
    ProductFormTemplate::new(
        state.session().is_authenticated(),
        FormState::editing(FormMode::Create, NewProduct::default()),
    )
}

/// Display the edit form for a product, locating it within the fetched
/// collection. A missing record leaves the form blank.
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> impl IntoResponse {
    let logged_in = state.session().is_authenticated();
    let state_tag = match state.catalog().list_products().await {
        Ok(products) => FormState::editing(
            FormMode::Edit(id),
            load_or_default(products, id, |product: &Product| product.id),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "product load failed");
            FormState::rejected(
                FormMode::Edit(id),
                NewProduct::default(),
                "Failed to load product. Please try again.".to_string(),
            )
        }
    };
    ProductFormTemplate::new(logged_in, state_tag)
}

/// Handle a create submission.
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<ProductFormData>,
) -> Result<Response, AppError> {
    let draft = form.into_draft()?;
    match state.catalog().create_product(&draft).await {
        Ok(created) => {
            tracing::info!(id = %created.id, "product created");
            Ok(Redirect::to("/products").into_response())
        }
        Err(err) => {
            tracing::warn!(error = %err, "product create failed");
            Ok(ProductFormTemplate::new(
                state.session().is_authenticated(),
                FormState::rejected(
                    FormMode::Create,
                    draft,
                    "Failed to save product. Please try again.".to_string(),
                ),
            )
            .into_response())
        }
    }
}

/// Handle an update submission: the draft plus the path identifier form
/// the full replacement record.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Form(form): Form<ProductFormData>,
) -> Result<Response, AppError> {
    let draft = form.into_draft()?;
    let product = draft.clone().with_id(id);
    match state.catalog().update_product(id, &product).await {
        Ok(_) => {
            tracing::info!(id = %id, "product updated");
            Ok(Redirect::to("/products").into_response())
        }
        Err(err) => {
            tracing::warn!(error = %err, "product update failed");
            Ok(ProductFormTemplate::new(
                state.session().is_authenticated(),
                FormState::rejected(
                    FormMode::Edit(id),
                    draft,
                    "Failed to save product. Please try again.".to_string(),
                ),
            )
            .into_response())
        }
    }
}

/// Handle a delete action from the listing.
pub async fn delete(State(state): State<AppState>, Path(id): Path<ProductId>) -> Response {
    match state.catalog().delete_product(id).await {
        Ok(()) => {
            tracing::info!(id = %id, "product deleted");
            Redirect::to("/products").into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "product delete failed");
            list_page(
                &state,
                Some("Failed to delete product. Please try again.".to_string()),
            )
            .await
        }
    }
}

/// Display the anonymous product detail page.
pub async fn show(State(state): State<AppState>, Path(id): Path<ProductId>) -> Response {
    detail_page(&state, id, None).await
}

/// Handle the detail page's add-to-cart action: a fresh single-line cart
/// for the operator's account.
pub async fn add_to_cart(State(state): State<AppState>, Path(id): Path<ProductId>) -> Response {
    match state.catalog().add_to_cart(UserId::new(1), id, 1).await {
        Ok(cart) => {
            tracing::info!(cart_id = %cart.id, product_id = %id, "product added to cart");
            Redirect::to("/carts").into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "add to cart failed");
            detail_page(
                &state,
                id,
                Some("Failed to add product to cart. Please try again.".to_string()),
            )
            .await
        }
    }
}

async fn detail_page(state: &AppState, id: ProductId, message: Option<String>) -> Response {
    let logged_in = state.session().is_authenticated();
    match state.catalog().list_products().await {
        Ok(products) => {
            let product = products.into_iter().find(|product| product.id == id);
            let error = match (&product, message) {
                (_, Some(message)) => Some(message),
                (None, None) => Some("Product not found.".to_string()),
                (Some(_), None) => None,
            };
            ProductShowTemplate {
                logged_in,
                error,
                product,
            }
            .into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "product detail load failed");
            ProductShowTemplate {
                logged_in,
                error: Some("Failed to load product details. Please try again.".to_string()),
                product: None,
            }
            .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_data_parses_into_draft() {
        let form = ProductFormData {
            title: "Gold Ring".to_string(),
            price: " 129.99 ".to_string(),
            description: "18k".to_string(),
            image: "https://example.test/ring.jpg".to_string(),
            category: "jewelery".to_string(),
        };

        let draft = form.into_draft().unwrap();
        assert_eq!(draft.category, Category::Jewelery);
        assert_eq!(draft.price.to_string(), "129.99");
    }

    #[test]
    fn test_form_data_rejects_bad_price() {
        let form = ProductFormData {
            title: String::new(),
            price: "not a number".to_string(),
            description: String::new(),
            image: String::new(),
            category: "electronics".to_string(),
        };
        assert!(form.into_draft().is_err());
    }

    #[test]
    fn test_form_data_rejects_unknown_category() {
        let form = ProductFormData {
            title: String::new(),
            price: "1".to_string(),
            description: String::new(),
            image: String::new(),
            category: "gadgets".to_string(),
        };
        assert!(form.into_draft().is_err());
    }
}
