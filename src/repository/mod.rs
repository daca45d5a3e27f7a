//! Product storage subsystem.
//!
//! # Data Flow
//! ```text
//! http handlers
//!     → Arc<dyn ProductRepository>
//!     → memory.rs (RwLock-guarded ordered map)
//!     → owned copies returned to callers
//! ```
//!
//! # Concurrency
//! - Reads (get, get_all) share the lock; writes (create, update, delete) are exclusive
//! - Existence checks for update/delete happen under the write lock that performs the mutation
//! - Concurrent updates to the same ID are last-writer-wins

pub mod memory;

use thiserror::Error;

use crate::model::{Product, ProductId};

pub use memory::InMemoryProductRepository;

/// Errors raised by a product store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// No record with this ID exists.
    #[error("product {0} is not found")]
    NotFound(ProductId),

    /// A writer panicked while holding the store lock.
    #[error("product store lock poisoned")]
    Poisoned,
}

/// Storage capability used by the handler layer.
///
/// Implementations own the canonical records; every method hands out copies.
pub trait ProductRepository: Send + Sync {
    /// Store `product` under the next sequential ID and return that ID.
    ///
    /// Any ID already set on `product` is overwritten.
    fn create(&self, product: Product) -> Result<ProductId, RepositoryError>;

    /// Replace the record stored under `product.id`. Never inserts.
    fn update(&self, product: Product) -> Result<(), RepositoryError>;

    /// Remove the record for `id` permanently.
    fn delete(&self, id: ProductId) -> Result<(), RepositoryError>;

    /// Copy of the record for `id`.
    fn get(&self, id: ProductId) -> Result<Product, RepositoryError>;

    /// Copies of all records, ordered by ascending ID.
    fn get_all(&self) -> Result<Vec<Product>, RepositoryError>;
}
