//! In-memory product store.
//!
//! One `RwLock` guards both the ID counter and the record map. IDs start at 1
//! and are never reused, even after deletion.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::model::{Product, ProductId};
use crate::observability::metrics;
use crate::repository::{ProductRepository, RepositoryError};

#[derive(Debug)]
struct Inner {
    next_id: u64,
    products: BTreeMap<ProductId, Product>,
}

/// Process-lifetime product store.
#[derive(Debug)]
pub struct InMemoryProductRepository {
    inner: RwLock<Inner>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                products: BTreeMap::new(),
            }),
        }
    }

    /// Number of stored products.
    pub fn len(&self) -> usize {
        self.read().map(|inner| inner.products.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, RepositoryError> {
        self.inner.read().map_err(|_| {
            tracing::error!("Product store lock poisoned on read");
            RepositoryError::Poisoned
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, RepositoryError> {
        self.inner.write().map_err(|_| {
            tracing::error!("Product store lock poisoned on write");
            RepositoryError::Poisoned
        })
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn create(&self, mut product: Product) -> Result<ProductId, RepositoryError> {
        let mut inner = self.write()?;

        let id = ProductId(inner.next_id);
        inner.next_id += 1;
        product.id = id;
        inner.products.insert(id, product);
        metrics::record_product_count(inner.products.len());

        tracing::debug!(product_id = %id, "Product created");
        Ok(id)
    }

    fn update(&self, product: Product) -> Result<(), RepositoryError> {
        let mut inner = self.write()?;

        let id = product.id;
        match inner.products.get_mut(&id) {
            Some(slot) => {
                *slot = product;
                tracing::debug!(product_id = %id, "Product updated");
                Ok(())
            }
            None => Err(RepositoryError::NotFound(id)),
        }
    }

    fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut inner = self.write()?;

        if inner.products.remove(&id).is_none() {
            return Err(RepositoryError::NotFound(id));
        }
        metrics::record_product_count(inner.products.len());

        tracing::debug!(product_id = %id, "Product deleted");
        Ok(())
    }

    fn get(&self, id: ProductId) -> Result<Product, RepositoryError> {
        self.read()?
            .products
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        // BTreeMap iteration is already ascending by ID.
        Ok(self.read()?.products.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn product(name: &str, price: f64) -> Product {
        Product {
            name: name.to_string(),
            description: format!("A {}", name.to_lowercase()),
            price,
            ..Default::default()
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let repo = InMemoryProductRepository::new();
        assert_eq!(repo.create(product("Widget", 9.99)).unwrap(), ProductId(1));
        assert_eq!(repo.create(product("Gadget", 5.0)).unwrap(), ProductId(2));

        let all = repo.get_all().unwrap();
        let names: Vec<_> = all.iter().map(|p| (p.id, p.name.as_str())).collect();
        assert_eq!(names, vec![(ProductId(1), "Widget"), (ProductId(2), "Gadget")]);
    }

    #[test]
    fn test_create_ignores_supplied_id() {
        let repo = InMemoryProductRepository::new();
        let mut p = product("Widget", 1.0);
        p.id = ProductId(500);
        assert_eq!(repo.create(p).unwrap(), ProductId(1));
        assert!(matches!(repo.get(ProductId(500)), Err(RepositoryError::NotFound(_))));
    }

    #[test]
    fn test_get_returns_copy_of_input() {
        let repo = InMemoryProductRepository::new();
        let mut input = product("Widget", 9.99);
        input.tags = vec!["tools".into(), "metal".into()];
        input.prices.insert("EUR".into(), 8.5);

        let id = repo.create(input.clone()).unwrap();
        let mut stored = repo.get(id).unwrap();
        assert_eq!(stored.id, id);

        input.id = id;
        assert_eq!(stored, input);

        // Mutating the copy leaves the store untouched.
        stored.name = "Changed".into();
        assert_eq!(repo.get(id).unwrap().name, "Widget");
    }

    #[test]
    fn test_ids_never_reused() {
        let repo = InMemoryProductRepository::new();
        let first = repo.create(product("Widget", 1.0)).unwrap();
        repo.delete(first).unwrap();
        let second = repo.create(product("Gadget", 1.0)).unwrap();
        assert!(second > first);
        assert_eq!(second, ProductId(2));
    }

    #[test]
    fn test_delete_then_get_and_delete_not_found() {
        let repo = InMemoryProductRepository::new();
        let id = repo.create(product("Widget", 1.0)).unwrap();

        repo.delete(id).unwrap();
        assert_eq!(repo.get(id), Err(RepositoryError::NotFound(id)));
        assert_eq!(repo.delete(id), Err(RepositoryError::NotFound(id)));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_update_replaces_record() {
        let repo = InMemoryProductRepository::new();
        let id = repo.create(product("Widget", 1.0)).unwrap();

        let mut changed = product("Sprocket", 2.5);
        changed.id = id;
        repo.update(changed.clone()).unwrap();
        assert_eq!(repo.get(id).unwrap(), changed);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_update_missing_does_not_insert() {
        let repo = InMemoryProductRepository::new();
        let mut ghost = product("Ghost", 1.0);
        ghost.id = ProductId(42);

        assert_eq!(repo.update(ghost), Err(RepositoryError::NotFound(ProductId(42))));
        assert!(repo.is_empty());
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_update_after_delete_does_not_resurrect() {
        let repo = InMemoryProductRepository::new();
        let id = repo.create(product("Widget", 1.0)).unwrap();
        let snapshot = repo.get(id).unwrap();

        repo.delete(id).unwrap();
        assert_eq!(repo.update(snapshot), Err(RepositoryError::NotFound(id)));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_get_all_sorted_after_deletions() {
        let repo = InMemoryProductRepository::new();
        for i in 0..10 {
            repo.create(product(&format!("P{}", i), i as f64)).unwrap();
        }
        for id in [3, 7, 1, 10] {
            repo.delete(ProductId(id)).unwrap();
        }
        repo.create(product("Late", 1.0)).unwrap();

        let ids: Vec<u64> = repo.get_all().unwrap().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![2, 4, 5, 6, 8, 9, 11]);
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let repo = InMemoryProductRepository::new();
        assert!(repo.get_all().unwrap().is_empty());
        assert_eq!(repo.get(ProductId(1)), Err(RepositoryError::NotFound(ProductId(1))));
    }

    #[test]
    fn test_concurrent_creates_issue_unique_ids() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let repo = repo.clone();
                thread::spawn(move || {
                    (0..50)
                        .map(|i| repo.create(product(&format!("T{}-{}", t, i), 1.0)).unwrap().0)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=400).collect::<Vec<_>>());
        assert_eq!(repo.len(), 400);
    }

    #[test]
    fn test_concurrent_deletes_single_winner() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let id = repo.create(product("Widget", 1.0)).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                thread::spawn(move || repo.delete(id).is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
    }

    #[test]
    fn test_poisoned_lock_reports_error() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let poisoner = repo.clone();
        let _ = thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the store");
        })
        .join();

        assert_eq!(repo.get_all(), Err(RepositoryError::Poisoned));
        assert_eq!(repo.create(product("Widget", 1.0)), Err(RepositoryError::Poisoned));
    }
}
