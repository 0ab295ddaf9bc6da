//! Product id and form validation.
//!
//! # Responsibilities
//! - Resolve a textual id to a catalog index
//! - Check submitted fields (required name, price format, name uniqueness)
//! - Leave sticky values and errors on the page when a submission fails
//!
//! # Design Decisions
//! - Validation only reads the store; mutation happens after it succeeds
//! - All field errors are collected, not just the first

use std::collections::BTreeMap;

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::page::{FormState, PageState, ProductForm, FIELD_NAME, FIELD_PRICE};
use crate::catalog::store::Catalog;

pub const MSG_INVALID_PRICE: &str = "Invalid price";
pub const MSG_NAME_EXISTS: &str = "Name already exists";
pub const MSG_NAME_REQUIRED: &str = "Name is required";

/// Field name → message.
pub type FieldErrors = BTreeMap<String, String>;

/// Resolve `text` to the index of the product with that id.
pub fn validate_product_id(text: &str, catalog: &Catalog) -> CatalogResult<usize> {
    let id: i64 = text
        .parse()
        .map_err(|_| CatalogError::InvalidId(text.to_string()))?;

    u64::try_from(id)
        .ok()
        .and_then(|id| catalog.index_of(id))
        .ok_or_else(|| CatalogError::NotFound(text.to_string()))
}

/// Check a submitted product form and return its price in cents.
///
/// `existing_id` is the product being edited, excluded from the name check.
/// On failure the page's form state is replaced with the submitted values
/// and errors; on success it is left alone.
pub fn validate_product_form(
    form: &ProductForm,
    existing_id: Option<u64>,
    check_name_uniqueness: bool,
    page: &mut PageState,
) -> Result<u64, FieldErrors> {
    let mut errors = FieldErrors::new();

    let price = parse_price_cents(&form.price);
    if price.is_none() {
        errors.insert(FIELD_PRICE.to_string(), MSG_INVALID_PRICE.to_string());
    }

    if form.name.is_empty() {
        errors.insert(FIELD_NAME.to_string(), MSG_NAME_REQUIRED.to_string());
    } else if check_name_uniqueness {
        let taken = match existing_id {
            Some(id) => page.catalog().has_name_except(&form.name, id),
            None => page.catalog().has_name(&form.name),
        };
        if taken {
            errors.insert(FIELD_NAME.to_string(), MSG_NAME_EXISTS.to_string());
        }
    }

    match price {
        Some(cents) if errors.is_empty() => Ok(cents),
        _ => {
            page.set_form(FormState::from_submission(form, errors.clone()));
            Err(errors)
        }
    }
}

/// Parse a decimal price into whole cents, rounding half away from zero.
///
/// Negative and non-finite values are rejected.
pub fn parse_price_cents(text: &str) -> Option<u64> {
    let price: f64 = text.parse().ok()?;
    if !price.is_finite() || price < 0.0 {
        return None;
    }
    let cents = (price * 100.0).round();
    if cents > u64::MAX as f64 {
        return None;
    }
    Some(cents as u64)
}
