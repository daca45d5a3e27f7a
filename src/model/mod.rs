//! Product domain model.
//!
//! # Data Flow
//! ```text
//! request body (JSON)
//!     → ProductPayload (every field optional)
//!     → validate() → Vec<FieldError> (all violations, not fail-fast)
//!     → Product (canonical record, ID assigned by the repository)
//! ```
//!
//! # Invariants
//! - `ProductId(0)` is never issued or stored
//! - Additional prices never carry the default currency key
//! - Base and additional prices are non-negative

pub mod product;

pub use product::{
    validate_prices, CreatedId, FieldError, PriceError, Prices, Product, ProductId,
    ProductPayload, DEFAULT_CURRENCY,
};
