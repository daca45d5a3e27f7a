//! Product record, request payload and field validation.

use std::collections::BTreeMap;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency code of a product's base `Price`.
///
/// Never present as a key in the additional prices map.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Additional prices keyed by currency code.
pub type Prices = BTreeMap<String, f64>;

/// Product identifier, assigned by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ProductId> for u64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// Canonical product record as stored and rendered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(rename = "ID")]
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Base price in [`DEFAULT_CURRENCY`].
    pub price: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub prices: Prices,
}

/// Response body for a successful create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedId {
    #[serde(rename = "ID")]
    pub id: ProductId,
}

/// A single field violation reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

const MSG_EMPTY: &str = "can not be empty";
const MSG_REQUIRED: &str = "is required";
const MSG_NEGATIVE: &str = "price can't be negative";

/// Create/update body as sent by clients.
///
/// Every field is optional so that missing values are reported as field
/// violations instead of decode failures. A client-supplied `ID` is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub prices: Option<Prices>,
}

impl ProductPayload {
    /// Collect every field violation.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if is_blank(self.name.as_deref()) {
            errors.push(FieldError::new("Name", MSG_EMPTY));
        }
        if is_blank(self.description.as_deref()) {
            errors.push(FieldError::new("Description", MSG_EMPTY));
        }
        match self.price {
            None => errors.push(FieldError::new("Price", MSG_REQUIRED)),
            Some(price) if !is_valid_price(price) => {
                errors.push(FieldError::new("Price", MSG_NEGATIVE))
            }
            Some(_) => {}
        }
        if let Some(prices) = &self.prices {
            if let Err(e) = validate_prices(prices) {
                errors.push(FieldError::new("Prices", e.to_string()));
            }
        }

        errors
    }

    /// Validate and build a record carrying `id`.
    pub fn into_product(self, id: ProductId) -> Result<Product, Vec<FieldError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Product {
            id,
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            prices: self.prices.unwrap_or_default(),
        })
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

/// Rejection reasons for an additional prices map.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PriceError {
    #[error("only for additional currencies")]
    DefaultCurrency,

    #[error("price can't be negative")]
    Negative { currency: String },
}

/// Check an additional prices map before it replaces a product's prices.
pub fn validate_prices(prices: &Prices) -> Result<(), PriceError> {
    if prices.contains_key(DEFAULT_CURRENCY) {
        return Err(PriceError::DefaultCurrency);
    }

    match prices.iter().find(|(_, price)| !is_valid_price(**price)) {
        Some((currency, _)) => Err(PriceError::Negative {
            currency: currency.clone(),
        }),
        None => Ok(()),
    }
}
