//! Page state: catalog, search text, filtered view and the last form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::filter::filter;
use crate::catalog::store::{format_cents, Catalog, Product};

pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_PRICE: &str = "price";

/// Raw product form as submitted by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
}

impl ProductForm {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price: price.into(),
        }
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price.trim().to_string(),
        }
    }
}

/// Values and errors of the last displayed or submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub values: BTreeMap<String, String>,
    pub errors: BTreeMap<String, String>,
}

impl FormState {
    /// Form prefilled from an existing product.
    pub fn from_product(product: &Product) -> Self {
        let mut values = BTreeMap::new();
        values.insert(FIELD_NAME.to_string(), product.name.clone());
        values.insert(FIELD_DESCRIPTION.to_string(), product.description.clone());
        values.insert(FIELD_PRICE.to_string(), product.display_price());
        Self {
            values,
            errors: BTreeMap::new(),
        }
    }

    /// Sticky values from a failed submission along with its errors.
    pub fn from_submission(form: &ProductForm, errors: BTreeMap<String, String>) -> Self {
        let mut values = BTreeMap::new();
        values.insert(FIELD_NAME.to_string(), form.name.clone());
        values.insert(FIELD_DESCRIPTION.to_string(), form.description.clone());
        values.insert(FIELD_PRICE.to_string(), form.price.clone());
        Self { values, errors }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// `field: message` pairs joined for log lines and error display.
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Render-ready product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductView {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price_cents: u64,
    pub price: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price_cents: product.price_cents,
            price: format_cents(product.price_cents),
        }
    }
}

/// Owned snapshot of the page handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    /// Filtered products in catalog order.
    pub products: Vec<ProductView>,
    pub search_text: String,
    pub form: FormState,
    /// Product the current edit or delete form refers to.
    pub target: Option<ProductView>,
    /// Size of the unfiltered catalog.
    pub product_count: usize,
}

/// Process-wide page state. Owned by the catalog service task.
#[derive(Debug, Clone)]
pub struct PageState {
    catalog: Catalog,
    search_text: String,
    filtered: Vec<Product>,
    form: FormState,
    target: Option<u64>,
}

impl PageState {
    pub fn new(catalog: Catalog) -> Self {
        let filtered = filter(&catalog, "");
        Self {
            catalog,
            search_text: String::new(),
            filtered,
            form: FormState::default(),
            target: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Mutable catalog access. Callers must [`PageState::refresh`] afterwards.
    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Replace the search text and recompute the filtered view.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.refresh();
    }

    /// Recompute the filtered view from the catalog and search text.
    pub fn refresh(&mut self) {
        self.filtered = filter(&self.catalog, &self.search_text);
    }

    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn set_form(&mut self, form: FormState) {
        self.form = form;
    }

    /// Clear form values, errors and the form target.
    pub fn reset_form(&mut self) {
        self.form = FormState::default();
        self.target = None;
    }

    pub fn set_target(&mut self, id: Option<u64>) {
        self.target = id;
    }

    pub fn view(&self) -> PageView {
        let target = self
            .target
            .and_then(|id| self.catalog.index_of(id))
            .and_then(|idx| self.catalog.get(idx))
            .map(ProductView::from);

        PageView {
            products: self.filtered.iter().map(ProductView::from).collect(),
            search_text: self.search_text.clone(),
            form: self.form.clone(),
            target,
            product_count: self.catalog.len(),
        }
    }
}
