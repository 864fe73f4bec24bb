//! Product HTTP Routes
//!
//! CRUD endpoints for inventory products. Handlers hold no state of their
//! own: each one makes sure the store is connected, delegates, and wraps the
//! result in the response envelope.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::observability::{log_event_with_fields, Event};
use crate::product::Product;
use crate::store::ProductStore;

use super::errors::{ApiError, ApiResult};
use super::response::Envelope;

// ==================
// Shared State
// ==================

/// Product state shared across handlers
pub struct ProductState {
    pub store: Arc<dyn ProductStore>,
}

impl ProductState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }
}

// ==================
// Product Routes
// ==================

/// Create product routes, mounted under `/api/product`
pub fn product_routes(state: Arc<ProductState>) -> Router {
    Router::new()
        .route(
            "/",
            get(list_products_handler)
                .post(create_product_handler)
                .fallback(method_not_allowed),
        )
        .route(
            "/:id",
            get(get_product_handler)
                .put(update_product_handler)
                .delete(delete_product_handler)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Accepts only a JSON object body
fn object_body(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Map<String, Value>> {
    let Json(value) = body?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::InvalidBody(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Extracts the raw id segment; undecodable segments are malformed ids
fn path_id(path: Result<Path<String>, PathRejection>) -> ApiResult<String> {
    let Path(id) = path?;
    Ok(id)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ==================
// Handlers
// ==================

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn list_products_handler(
    State(state): State<Arc<ProductState>>,
) -> ApiResult<Json<Envelope<Vec<Product>>>> {
    state.store.ensure_connected().await?;
    let products = state.store.list().await?;
    debug!(count = products.len(), "listing products");
    Ok(Json(Envelope::list(products)))
}

async fn get_product_handler(
    State(state): State<Arc<ProductState>>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Envelope<Product>>> {
    let id = path_id(path)?;
    state.store.ensure_connected().await?;
    let product = state.store.get(&id).await?;
    Ok(Json(Envelope::ok(product)))
}

async fn create_product_handler(
    State(state): State<Arc<ProductState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<Product>>)> {
    let candidate = object_body(body)?;
    state.store.ensure_connected().await?;

    let product = state.store.create(&candidate).await?;
    log_event_with_fields(
        Event::ProductCreated,
        &[("id", product.id.as_str()), ("name", product.name.as_str())],
    );

    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_message(product, "Product created successfully")),
    ))
}

async fn update_product_handler(
    State(state): State<Arc<ProductState>>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Envelope<Product>>> {
    let id = path_id(path)?;
    let changes = object_body(body)?;
    state.store.ensure_connected().await?;

    let product = state.store.update(&id, &changes).await?;
    log_event_with_fields(Event::ProductUpdated, &[("id", product.id.as_str())]);

    Ok(Json(Envelope::with_message(
        product,
        "Product updated successfully",
    )))
}

async fn delete_product_handler(
    State(state): State<Arc<ProductState>>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Envelope<Map<String, Value>>>> {
    let id = path_id(path)?;
    state.store.ensure_connected().await?;
    state.store.delete(&id).await?;
    log_event_with_fields(Event::ProductDeleted, &[("id", id.as_str())]);
    info!(id = %id, "product removed");

    Ok(Json(Envelope::with_message(
        Map::new(),
        "Product deleted successfully",
    )))
}
