//! Shared form-binder machinery.
//!
//! Every entity form follows the same lifecycle: load-or-default a record
//! by identifier, edit it, submit create-or-update. The state a form can
//! be in is one explicit tag - a form is either editable or editable with
//! a rejection message attached; combinations like "loading and
//! submitting at once" are not representable.
//!
//! The upstream API has no get-by-id endpoint, so loading means locating
//! the record within the full listing. A lookup miss is not an error:
//! the form simply stays at its default blank record, the same best-effort
//! policy the cart totals apply to dangling product references.

use std::fmt::Display;

/// Whether a form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode<Id> {
    Create,
    Edit(Id),
}

impl<Id> FormMode<Id> {
    /// True when the form edits an existing record.
    #[must_use]
    pub const fn is_edit(&self) -> bool {
        matches!(self, Self::Edit(_))
    }

    /// The heading verb, matching the page titles.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Edit(_) => "Edit",
        }
    }
}

impl<Id: Display> FormMode<Id> {
    /// The path segment the form posts back to, under the given list path.
    #[must_use]
    pub fn action(&self, base: &str) -> String {
        match self {
            Self::Create => format!("{base}/new"),
            Self::Edit(id) => format!("{base}/{id}"),
        }
    }
}

/// Explicit tagged state of one form instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState<Id, D> {
    /// Record loaded (or defaulted) and editable.
    Editing { mode: FormMode<Id>, record: D },
    /// A load or submit was rejected; the entered values stay editable.
    Rejected {
        mode: FormMode<Id>,
        record: D,
        message: String,
    },
}

impl<Id, D> FormState<Id, D> {
    #[must_use]
    pub const fn editing(mode: FormMode<Id>, record: D) -> Self {
        Self::Editing { mode, record }
    }

    #[must_use]
    pub const fn rejected(mode: FormMode<Id>, record: D, message: String) -> Self {
        Self::Rejected {
            mode,
            record,
            message,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> &FormMode<Id> {
        match self {
            Self::Editing { mode, .. } | Self::Rejected { mode, .. } => mode,
        }
    }

    #[must_use]
    pub const fn record(&self) -> &D {
        match self {
            Self::Editing { record, .. } | Self::Rejected { record, .. } => record,
        }
    }

    /// The rejection message, when there is one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Editing { .. } => None,
            Self::Rejected { message, .. } => Some(message),
        }
    }

    /// Decompose into mode, record, and rejection message for rendering.
    #[must_use]
    pub fn into_parts(self) -> (FormMode<Id>, D, Option<String>) {
        match self {
            Self::Editing { mode, record } => (mode, record, None),
            Self::Rejected {
                mode,
                record,
                message,
            } => (mode, record, Some(message)),
        }
    }
}

/// Locate a record in a fetched listing and convert it into its form
/// draft; a miss yields the default blank draft.
#[must_use]
pub fn load_or_default<T, D, Id, F>(items: Vec<T>, id: Id, key: F) -> D
where
    D: Default + From<T>,
    Id: PartialEq,
    F: Fn(&T) -> Id,
{
    items
        .into_iter()
        .find(|item| key(item) == id)
        .map(D::from)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fakestore_core::{NewProduct, Product, ProductId};

    fn product(id: i32, title: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: "9.99".parse().unwrap(),
            description: String::new(),
            image: String::new(),
            category: fakestore_core::Category::Electronics,
        }
    }

    #[test]
    fn test_load_or_default_finds_record() {
        let items = vec![product(1, "first"), product(2, "second")];
        let draft: NewProduct = load_or_default(items, ProductId::new(2), |p| p.id);
        assert_eq!(draft.title, "second");
    }

    #[test]
    fn test_load_or_default_misses_silently() {
        let items = vec![product(1, "first")];
        let draft: NewProduct = load_or_default(items, ProductId::new(99), |p| p.id);
        assert_eq!(draft, NewProduct::default());
    }

    #[test]
    fn test_mode_verb_and_action() {
        let create: FormMode<ProductId> = FormMode::Create;
        assert_eq!(create.verb(), "Create");
        assert_eq!(create.action("/products"), "/products/new");

        let edit = FormMode::Edit(ProductId::new(7));
        assert_eq!(edit.verb(), "Edit");
        assert!(edit.is_edit());
        assert_eq!(edit.action("/products"), "/products/7");
    }

    #[test]
    fn test_rejected_state_keeps_entered_record() {
        let record = NewProduct {
            title: "typed by hand".to_string(),
            ..NewProduct::default()
        };
        let state = FormState::rejected(
            FormMode::<ProductId>::Create,
            record.clone(),
            "Failed to save product. Please try again.".to_string(),
        );

        assert_eq!(state.record(), &record);
        assert_eq!(
            state.message(),
            Some("Failed to save product. Please try again.")
        );
    }
}
