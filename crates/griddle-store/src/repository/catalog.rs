//! # Catalog Repositories
//!
//! Categories and products, plus [`ProductSnapshot`]: the batch-fetched
//! product map handed to the engine as its `ProductLookup`.

use std::collections::HashMap;

use griddle_core::{Category, CategoryId, Product, ProductId, ProductLookup};
use tracing::debug;

use super::Table;
use crate::error::{StoreError, StoreResult};

// =============================================================================
// Categories
// =============================================================================

#[derive(Default)]
pub struct CategoryRepository {
    table: Table<CategoryId, Category>,
}

impl CategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, category: Category) -> StoreResult<()> {
        let id = category.id();
        debug!(%id, name = category.name(), "Creating category");

        if !self.table.insert(id, category)? {
            return Err(StoreError::duplicate("Category", id));
        }
        Ok(())
    }

    pub fn get(&self, id: CategoryId) -> StoreResult<Category> {
        self.table
            .get(id)?
            .ok_or_else(|| StoreError::not_found("Category", id))
    }

    /// Case-insensitive exact name match.
    pub fn find_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        let name = name.trim();
        self.table.find(|c| c.name().eq_ignore_ascii_case(name))
    }

    pub fn list(&self) -> StoreResult<Vec<Category>> {
        self.table.list()
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.table.len()? == 0)
    }

    pub fn update(&self, category: Category) -> StoreResult<()> {
        let id = category.id();
        if !self.table.replace(id, category)? {
            return Err(StoreError::not_found("Category", id));
        }
        Ok(())
    }

    pub fn delete(&self, id: CategoryId) -> StoreResult<()> {
        self.table
            .remove(id)?
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("Category", id))
    }
}

// =============================================================================
// Products
// =============================================================================

#[derive(Default)]
pub struct ProductRepository {
    table: Table<ProductId, Product>,
}

impl ProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, product: Product) -> StoreResult<()> {
        let id = product.id();
        debug!(%id, name = product.name(), price = %product.price(), "Creating product");

        if !self.table.insert(id, product)? {
            return Err(StoreError::duplicate("Product", id));
        }
        Ok(())
    }

    pub fn get(&self, id: ProductId) -> StoreResult<Product> {
        self.table
            .get(id)?
            .ok_or_else(|| StoreError::not_found("Product", id))
    }

    pub fn find(&self, id: ProductId) -> StoreResult<Option<Product>> {
        self.table.get(id)
    }

    /// Case-insensitive exact name match.
    pub fn find_by_name(&self, name: &str) -> StoreResult<Option<Product>> {
        let name = name.trim();
        self.table.find(|p| p.name().eq_ignore_ascii_case(name))
    }

    pub fn list(&self) -> StoreResult<Vec<Product>> {
        self.table.list()
    }

    pub fn list_by_category(&self, category_id: CategoryId) -> StoreResult<Vec<Product>> {
        self.table.filter(|p| p.category_id() == category_id)
    }

    pub fn update(&self, product: Product) -> StoreResult<()> {
        let id = product.id();
        if !self.table.replace(id, product)? {
            return Err(StoreError::not_found("Product", id));
        }
        Ok(())
    }

    pub fn delete(&self, id: ProductId) -> StoreResult<()> {
        self.table
            .remove(id)?
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("Product", id))
    }

    /// Batch-fetches the given products under a single read lock.
    ///
    /// Ids that are not in the catalog are simply absent from the snapshot.
    pub fn snapshot<I>(&self, ids: I) -> StoreResult<ProductSnapshot>
    where
        I: IntoIterator<Item = ProductId>,
    {
        let products = self.table.get_many(ids)?;

        debug!(count = products.len(), "Product snapshot taken");
        Ok(ProductSnapshot { products })
    }
}

// =============================================================================
// Product Snapshot
// =============================================================================

/// Products pre-resolved for one pricing or validation pass.
#[derive(Debug, Clone, Default)]
pub struct ProductSnapshot {
    products: HashMap<ProductId, Product>,
}

impl ProductSnapshot {
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductLookup for ProductSnapshot {
    fn find_product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }
}

impl FromIterator<Product> for ProductSnapshot {
    fn from_iter<T: IntoIterator<Item = Product>>(iter: T) -> Self {
        ProductSnapshot {
            products: iter.into_iter().map(|p| (p.id(), p)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use griddle_core::Money;

    fn setup() -> (CategoryRepository, ProductRepository, Category, Product) {
        let categories = CategoryRepository::new();
        let products = ProductRepository::new();

        let extras = Category::new("Extras").unwrap();
        let fries = Product::new("Fries", &extras, Money::from_cents(200)).unwrap();

        categories.create(extras.clone()).unwrap();
        products.create(fries.clone()).unwrap();
        (categories, products, extras, fries)
    }

    #[test]
    fn test_create_rejects_duplicate_ids() {
        let (categories, products, extras, fries) = setup();

        assert!(matches!(
            categories.create(extras),
            Err(StoreError::Duplicate { entity: "Category", .. })
        ));
        assert!(matches!(
            products.create(fries),
            Err(StoreError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_lookup_by_name_ignores_case() {
        let (categories, products, extras, fries) = setup();

        assert_eq!(categories.find_by_name("extras").unwrap(), Some(extras.clone()));
        assert_eq!(products.find_by_name(" FRIES ").unwrap(), Some(fries));
        assert_eq!(products.find_by_name("Onion Rings").unwrap(), None);
        assert_eq!(products.list_by_category(extras.id()).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_records() {
        let (categories, products, _, _) = setup();

        assert!(matches!(
            products.get(ProductId::new()),
            Err(StoreError::NotFound { entity: "Product", .. })
        ));
        assert!(categories.delete(CategoryId::new()).is_err());
    }

    #[test]
    fn test_snapshot_skips_unknown_ids() {
        let (_, products, _, fries) = setup();
        let unknown = ProductId::new();

        let snapshot = products.snapshot([fries.id(), unknown, fries.id()]).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.find_product(fries.id()), Some(&fries));
        assert_eq!(snapshot.find_product(unknown), None);
    }

    #[test]
    fn test_update_replaces_product() {
        let (_, products, _, mut fries) = setup();
        fries.update_price(Money::from_cents(250)).unwrap();

        products.update(fries.clone()).unwrap();
        assert_eq!(products.get(fries.id()).unwrap().price(), Money::from_cents(250));
    }
}
