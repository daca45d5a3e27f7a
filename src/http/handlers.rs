//! Product endpoint handlers.
//!
//! Each handler resolves and validates its input, makes one or two repository
//! calls, and renders the result. Repository locks are never held across an
//! await point.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::http::request::{decode_json, parse_product_id};
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::model::{validate_prices, CreatedId, Prices, Product, ProductId, ProductPayload};

const CANT_READ_PRODUCT: &str = "can't retrieve product";
const CANT_READ_PRICES: &str = "can't retrieve prices";

/// `GET /products`
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.repository.get_all()?;
    Ok(Json(products))
}

/// `POST /products`
pub async fn create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CreatedId>, ApiError> {
    let payload: ProductPayload = decode_json(&body, CANT_READ_PRODUCT)?;
    let product = payload
        .into_product(ProductId::default())
        .map_err(ApiError::Validation)?;

    let id = state.repository.create(product)?;
    tracing::info!(product_id = %id, "Product created");

    Ok(Json(CreatedId { id }))
}

/// `GET /products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = find_product(&state, &raw_id)?;
    Ok(Json(product))
}

/// `PUT /products/{id}`
///
/// Replaces every mutable field except the additional prices, which only
/// change through `PUT /products/{id}/prices`.
pub async fn update_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let existing = find_product(&state, &raw_id)?;

    let mut payload: ProductPayload = decode_json(&body, CANT_READ_PRODUCT)?;
    payload.prices = None;
    let mut product = payload
        .into_product(existing.id)
        .map_err(ApiError::Validation)?;
    product.prices = existing.prices;

    state.repository.update(product)?;
    tracing::info!(product_id = %existing.id, "Product updated");

    Ok(StatusCode::OK)
}

/// `DELETE /products/{id}`
pub async fn delete_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = find_product(&state, &raw_id)?.id;

    state.repository.delete(id)?;
    tracing::info!(product_id = %id, "Product deleted");

    Ok(StatusCode::OK)
}

/// `PUT /products/{id}/prices`
///
/// Replaces the additional prices map wholesale. The stored record is left
/// untouched when the map is rejected.
pub async fn set_prices(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let mut product = find_product(&state, &raw_id)?;

    let prices: Prices = decode_json(&body, CANT_READ_PRICES)?;
    validate_prices(&prices)?;

    let id = product.id;
    product.prices = prices;
    state.repository.update(product)?;
    tracing::info!(product_id = %id, "Product prices set");

    Ok(StatusCode::OK)
}

fn find_product(state: &AppState, raw_id: &str) -> Result<Product, ApiError> {
    let id = parse_product_id(raw_id)?;
    Ok(state.repository.get(id)?)
}
