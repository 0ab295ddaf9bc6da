//! In-memory product store.

use serde::{Deserialize, Serialize};

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, monotonically assigned identifier.
    pub id: u64,
    pub name: String,
    pub description: String,
    /// Canonical price representation.
    pub price_cents: u64,
}

impl Product {
    /// Price formatted with two decimals, e.g. `1050` → `"10.50"`.
    pub fn display_price(&self) -> String {
        format_cents(self.price_cents)
    }
}

/// Format a cent amount as a decimal string.
pub fn format_cents(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

/// Ordered product list plus the id counter.
///
/// Insertion order is display order. The counter only moves forward, so an id
/// freed by `remove` is never handed out again.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    last_id: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the product with `id`, if any.
    pub fn index_of(&self, id: u64) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }

    /// Exact, case-sensitive name lookup.
    pub fn has_name(&self, name: &str) -> bool {
        self.products.iter().any(|p| p.name == name)
    }

    /// Like [`Catalog::has_name`] but ignores the product with id `except`.
    pub fn has_name_except(&self, name: &str, except: u64) -> bool {
        self.products
            .iter()
            .any(|p| p.id != except && p.name == name)
    }

    /// Append a new product with the next id.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        price_cents: u64,
    ) -> Product {
        self.last_id += 1;
        let product = Product {
            id: self.last_id,
            name: name.into(),
            description: description.into(),
            price_cents,
        };
        self.products.push(product.clone());
        product
    }

    /// Remove the product at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Product {
        self.products.remove(index)
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Product> {
        self.products.get_mut(index)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Highest id handed out so far.
    pub fn last_id(&self) -> u64 {
        self.last_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.create("Hammer", "Smashing hammer", 1000);
        catalog
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let mut catalog = seeded();
        let saw = catalog.create("Saw", "Hand saw", 1250);
        let drill = catalog.create("Drill", "Cordless drill", 8999);

        assert_eq!(saw.id, 2);
        assert_eq!(drill.id, 3);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.products()[2].name, "Drill");
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut catalog = seeded();
        let saw = catalog.create("Saw", "Hand saw", 1250);
        let idx = catalog.index_of(saw.id).unwrap();
        catalog.remove(idx);

        let next = catalog.create("Saw", "Hand saw again", 1300);
        assert_eq!(next.id, 3);
        assert_eq!(catalog.last_id(), 3);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut catalog = seeded();
        catalog.create("Saw", "", 1);
        catalog.create("Drill", "", 2);

        let removed = catalog.remove(1);
        assert_eq!(removed.name, "Saw");
        let names: Vec<_> = catalog.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Hammer", "Drill"]);
    }

    #[test]
    fn test_lookups() {
        let catalog = seeded();
        assert_eq!(catalog.index_of(1), Some(0));
        assert_eq!(catalog.index_of(42), None);
        assert!(catalog.has_name("Hammer"));
        assert!(!catalog.has_name("hammer")); // Case sensitive
        assert!(!catalog.has_name_except("Hammer", 1));
    }

    #[test]
    fn test_display_price() {
        let product = Product {
            id: 1,
            name: "Saw".into(),
            description: String::new(),
            price_cents: 1050,
        };
        assert_eq!(product.display_price(), "10.50");
        assert_eq!(format_cents(7), "0.07");
        assert_eq!(format_cents(0), "0.00");
    }
}
