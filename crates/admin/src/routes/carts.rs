//! Cart route handlers.
//!
//! The listing resolves every cart line against one shared product fetch
//! and shows per-cart and grand totals. The form carries a variable
//! number of line rows, so submissions arrive as raw urlencoded pairs
//! rather than a fixed struct; an "add line" action re-renders the form
//! with one more blank row instead of saving.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, RawForm, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;

use fakestore_core::{Cart, CartId, CartLine, NewCart, Product, UserId, totals};

use crate::error::AppError;
use crate::filters;
use crate::forms::{FormMode, FormState, load_or_default};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// One cart line resolved against the product catalog. Lines whose
/// product no longer exists are dropped from display, matching how the
/// totals treat them.
pub struct CartLineView {
    pub product: Product,
    pub quantity: u32,
    pub subtotal: Decimal,
}

/// One cart prepared for rendering.
pub struct CartView {
    pub id: CartId,
    pub user_id: UserId,
    pub lines: Vec<CartLineView>,
    pub total: Decimal,
}

/// Cart listing template.
#[derive(Template, WebTemplate)]
#[template(path = "carts/index.html")]
pub struct CartsIndexTemplate {
    pub logged_in: bool,
    pub error: Option<String>,
    pub carts: Vec<CartView>,
    pub grand_total: Decimal,
}

/// Cart create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "carts/form.html")]
pub struct CartFormTemplate {
    pub logged_in: bool,
    pub verb: &'static str,
    pub action: String,
    pub error: Option<String>,
    pub record: CartFormDraft,
}

impl CartFormTemplate {
    fn new(logged_in: bool, state: FormState<CartId, CartFormDraft>) -> Self {
        let (mode, record, error) = state.into_parts();
        Self {
            logged_in,
            verb: mode.verb(),
            action: mode.action("/carts"),
            error,
            record,
        }
    }
}

/// One editable line row. Values stay raw text so a rejected submission
/// re-renders exactly what was typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineDraft {
    pub product_id: String,
    pub quantity: String,
}

impl CartLineDraft {
    fn blank() -> Self {
        Self {
            product_id: String::new(),
            quantity: String::new(),
        }
    }
}

/// The cart form's editable record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartFormDraft {
    pub user_id: String,
    pub lines: Vec<CartLineDraft>,
}

impl Default for CartFormDraft {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            lines: vec![CartLineDraft::blank()],
        }
    }
}

impl From<Cart> for CartFormDraft {
    fn from(cart: Cart) -> Self {
        let lines = if cart.products.is_empty() {
            vec![CartLineDraft::blank()]
        } else {
            cart.products
                .into_iter()
                .map(|line| CartLineDraft {
                    product_id: line.product_id.to_string(),
                    quantity: line.quantity.to_string(),
                })
                .collect()
        };
        Self {
            user_id: cart.user_id.to_string(),
            lines,
        }
    }
}

impl CartFormDraft {
    /// Validate the entered values into a cart draft. Fully blank rows
    /// are dropped; partially filled or non-numeric ones are rejected.
    fn into_cart(self) -> Result<NewCart, AppError> {
        let user_id = self
            .user_id
            .trim()
            .parse()
            .map(UserId::new)
            .map_err(|_| AppError::BadRequest("user id must be a number".to_string()))?;

        let mut products = Vec::new();
        for line in self.lines {
            let product_id = line.product_id.trim();
            let quantity = line.quantity.trim();
            if product_id.is_empty() && quantity.is_empty() {
                continue;
            }
            let product_id = product_id
                .parse()
                .map(fakestore_core::ProductId::new)
                .map_err(|_| AppError::BadRequest("product id must be a number".to_string()))?;
            let quantity = quantity
                .parse()
                .map_err(|_| AppError::BadRequest("quantity must be a number".to_string()))?;
            products.push(CartLine {
                product_id,
                quantity,
            });
        }

        Ok(NewCart { user_id, products })
    }
}

/// What a form submission asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CartFormAction {
    Save,
    AddLine,
}

/// Decode the raw urlencoded body into the draft plus the requested
/// action. Line fields repeat once per row and are paired up by position.
fn parse_cart_form(body: &[u8]) -> (CartFormDraft, CartFormAction) {
    let mut user_id = String::new();
    let mut product_ids = Vec::new();
    let mut quantities = Vec::new();
    let mut action = CartFormAction::Save;

    for (key, value) in url::form_urlencoded::parse(body) {
        match key.as_ref() {
            "user_id" => user_id = value.into_owned(),
            "product_id" => product_ids.push(value.into_owned()),
            "quantity" => quantities.push(value.into_owned()),
            "action" if value == "add-line" => action = CartFormAction::AddLine,
            _ => {}
        }
    }

    let mut lines: Vec<CartLineDraft> = product_ids
        .into_iter()
        .zip(quantities)
        .map(|(product_id, quantity)| CartLineDraft {
            product_id,
            quantity,
        })
        .collect();
    if lines.is_empty() {
        lines.push(CartLineDraft::blank());
    }

    (CartFormDraft { user_id, lines }, action)
}

/// Resolve carts against the product collection for display.
fn cart_views(carts: Vec<Cart>, products: &[Product]) -> Vec<CartView> {
    carts
        .into_iter()
        .map(|cart| {
            let total = totals::cart_total(&cart, products);
            let lines = cart
                .products
                .into_iter()
                .filter_map(|line| {
                    let product = products
                        .iter()
                        .find(|product| product.id == line.product_id)?;
                    Some(CartLineView {
                        subtotal: product.price * Decimal::from(line.quantity),
                        product: product.clone(),
                        quantity: line.quantity,
                    })
                })
                .collect();
            CartView {
                id: cart.id,
                user_id: cart.user_id,
                lines,
                total,
            }
        })
        .collect()
}

/// Display the cart listing with totals. Requires an authenticated
/// session.
pub async fn index(_auth: RequireAuth, State(state): State<AppState>) -> Response {
    list_page(&state, None).await
}

async fn list_page(state: &AppState, message: Option<String>) -> Response {
    let logged_in = state.session().is_authenticated();
    let fetched = tokio::try_join!(state.catalog().list_carts(), state.catalog().list_products());
    match fetched {
        Ok((carts, products)) => {
            let grand_total = totals::carts_total(&carts, &products);
            CartsIndexTemplate {
                logged_in,
                error: message,
                carts: cart_views(carts, &products),
                grand_total,
            }
            .into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "cart listing failed");
            CartsIndexTemplate {
                logged_in,
                error: Some("Failed to load carts. Please try again.".to_string()),
                carts: Vec::new(),
                grand_total: Decimal::ZERO,
            }
            .into_response()
        }
    }
}

/// Display a blank create form.
pub async fn new_form(State(state): State<AppState>) -> impl IntoResponse {
    CartFormTemplate::new(
        state.session().is_authenticated(),
        FormState::editing(FormMode::Create, CartFormDraft::default()),
    )
}

/// Display the edit form for a cart.
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<CartId>) -> impl IntoResponse {
    let logged_in = state.session().is_authenticated();
    let state_tag = match state.catalog().list_carts().await {
        Ok(carts) => FormState::editing(
            FormMode::Edit(id),
            load_or_default(carts, id, |cart: &Cart| cart.id),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "cart load failed");
            FormState::rejected(
                FormMode::Edit(id),
                CartFormDraft::default(),
                "Failed to load cart. Please try again.".to_string(),
            )
        }
    };
    CartFormTemplate::new(logged_in, state_tag)
}

/// Handle a create submission, or append a blank line row when asked.
pub async fn create(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> Result<Response, AppError> {
    let (draft, action) = parse_cart_form(&body);
    submit(&state, FormMode::Create, draft, action).await
}

/// Handle an update submission, or append a blank line row when asked.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CartId>,
    RawForm(body): RawForm,
) -> Result<Response, AppError> {
    let (draft, action) = parse_cart_form(&body);
    submit(&state, FormMode::Edit(id), draft, action).await
}

async fn submit(
    state: &AppState,
    mode: FormMode<CartId>,
    mut draft: CartFormDraft,
    action: CartFormAction,
) -> Result<Response, AppError> {
    let logged_in = state.session().is_authenticated();

    if action == CartFormAction::AddLine {
        draft.lines.push(CartLineDraft::blank());
        return Ok(CartFormTemplate::new(logged_in, FormState::editing(mode, draft)).into_response());
    }

    let cart = draft.clone().into_cart()?;
    let result = match mode {
        FormMode::Create => state.catalog().create_cart(&cart).await.map(|_| ()),
        FormMode::Edit(id) => state
            .catalog()
            .update_cart(id, &cart.with_id(id))
            .await
            .map(|_| ()),
    };
    match result {
        Ok(()) => {
            tracing::info!(edit = mode.is_edit(), "cart saved");
            Ok(Redirect::to("/carts").into_response())
        }
        Err(err) => {
            tracing::warn!(error = %err, "cart save failed");
            Ok(CartFormTemplate::new(
                logged_in,
                FormState::rejected(
                    mode,
                    draft,
                    "Failed to save cart. Please try again.".to_string(),
                ),
            )
            .into_response())
        }
    }
}

/// Handle a delete action from the listing.
pub async fn delete(State(state): State<AppState>, Path(id): Path<CartId>) -> Response {
    match state.catalog().delete_cart(id).await {
        Ok(()) => {
            tracing::info!(id = %id, "cart deleted");
            Redirect::to("/carts").into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "cart delete failed");
            list_page(
                &state,
                Some("Failed to delete cart. Please try again.".to_string()),
            )
            .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fakestore_core::{Category, ProductId};

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

    #[test]
    fn test_parse_cart_form_pairs_line_fields() {
        let body = b"user_id=3&product_id=1&quantity=2&product_id=5&quantity=1";
        let (draft, action) = parse_cart_form(body);

        assert_eq!(action, CartFormAction::Save);
        assert_eq!(draft.user_id, "3");
        assert_eq!(
            draft.lines,
            vec![
                CartLineDraft {
                    product_id: "1".to_string(),
                    quantity: "2".to_string(),
                },
                CartLineDraft {
                    product_id: "5".to_string(),
                    quantity: "1".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_cart_form_add_line_action() {
        let body = b"user_id=&product_id=&quantity=&action=add-line";
        let (draft, action) = parse_cart_form(body);
        assert_eq!(action, CartFormAction::AddLine);
        assert_eq!(draft.lines.len(), 1);
    }

    #[test]
    fn test_parse_cart_form_empty_body_gets_blank_line() {
        let (draft, _) = parse_cart_form(b"");
        assert_eq!(draft, CartFormDraft::default());
    }

    #[test]
    fn test_draft_validates_into_cart() {
        let draft = CartFormDraft {
            user_id: "4".to_string(),
            lines: vec![
                CartLineDraft {
                    product_id: "2".to_string(),
                    quantity: "3".to_string(),
                },
                CartLineDraft::blank(),
            ],
        };

        let cart = draft.into_cart().unwrap();
        assert_eq!(cart.user_id, UserId::new(4));
        assert_eq!(cart.products.len(), 1);
        assert_eq!(cart.products[0].quantity, 3);
    }

    #[test]
    fn test_draft_rejects_partial_line() {
        let draft = CartFormDraft {
            user_id: "4".to_string(),
            lines: vec![CartLineDraft {
                product_id: "2".to_string(),
                quantity: String::new(),
            }],
        };
        assert!(draft.into_cart().is_err());
    }

    #[test]
    fn test_cart_views_drop_dangling_lines() {
        let products = vec![product(1, "10.00")];
        let carts = vec![Cart {
            id: CartId::new(1),
            user_id: UserId::new(1),
            products: vec![
                CartLine {
                    product_id: ProductId::new(1),
                    quantity: 2,
                },
                CartLine {
                    product_id: ProductId::new(99),
                    quantity: 5,
                },
            ],
        }];

        let views = cart_views(carts, &products);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].lines.len(), 1);
        assert_eq!(views[0].total.to_string(), "20.00");
    }
}
