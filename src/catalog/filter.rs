//! Search filtering over the catalog.

use crate::catalog::store::{Catalog, Product};

/// Products whose name or description contains `search_text`, ignoring case.
///
/// An empty search returns the whole catalog. Catalog order is kept either way.
pub fn filter(catalog: &Catalog, search_text: &str) -> Vec<Product> {
    if search_text.is_empty() {
        return catalog.products().to_vec();
    }

    let needle = search_text.to_lowercase();
    catalog
        .products()
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
