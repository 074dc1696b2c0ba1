use crate::{error::AppError, extract::ValidatedProduct, AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use core_types::{Product, WriteOutcome};
use database::ProductRow;
use std::sync::Arc;

pub const GREETING: &str = "This is Malay";

/// # GET /
pub async fn greet() -> &'static str {
    GREETING
}

/// # GET /products
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductRow>>, AppError> {
    let products = state.store.list_all().await?;
    Ok(Json(products))
}

/// # GET /products/id/:id
pub async fn get_product(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProductRow>, AppError> {
    match state.store.find_by_id(id).await? {
        Some(product) => Ok(Json(product)),
        None => Err(AppError::NotFound(format!(
            "Product with id {id} not found, please verify the id, or try by name."
        ))),
    }
}

/// # GET /products/name/:name
pub async fn get_product_by_name(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProductRow>, AppError> {
    match state.store.find_by_name(&name).await? {
        Some(product) => Ok(Json(product)),
        None => Err(AppError::NotFound(format!(
            "Product named {name} not found, please check the name again, or try with id."
        ))),
    }
}

/// # POST /products/:id
/// The body's `id` is authoritative; the path segment is accepted but not used.
pub async fn create_product(
    Path(path_id): Path<String>,
    State(state): State<Arc<AppState>>,
    ValidatedProduct(product): ValidatedProduct,
) -> Result<Json<Product>, AppError> {
    if path_id.trim() != product.id.to_string() {
        tracing::warn!(path_id = %path_id, body_id = product.id, "Path id ignored in favour of body id.");
    }

    match state.store.insert(&product).await? {
        WriteOutcome::Conflict => Err(AppError::Conflict(format!(
            "Product with id {} already exists",
            product.id
        ))),
        _ => {
            tracing::info!(id = product.id, name = %product.name, "Product created.");
            Ok(Json(product))
        }
    }
}

/// # PUT /products/:id
/// Replaces name, description, price and quantity. The row keeps its id.
pub async fn update_product(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    ValidatedProduct(product): ValidatedProduct,
) -> Result<String, AppError> {
    match state.store.update(id, &product).await? {
        WriteOutcome::Applied => {
            tracing::info!(id, name = %product.name, "Product updated.");
            Ok(format!(
                "Information for product id: {id} and name: {} updated",
                product.name
            ))
        }
        _ => Err(AppError::NotFound(format!("No product with id {id} found"))),
    }
}

/// # DELETE /products/del_id/:id
pub async fn delete_product(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> Result<String, AppError> {
    match state.store.delete(id).await? {
        WriteOutcome::Applied => {
            tracing::info!(id, "Product deleted.");
            Ok(format!("Product with id {id} deleted successfully."))
        }
        _ => Err(AppError::NotFound(format!(
            "Product Not found, please check the {id} again"
        ))),
    }
}

/// # DELETE /products/del_name/:name
pub async fn delete_product_by_name(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<String, AppError> {
    match state.store.delete_by_name(&name).await? {
        WriteOutcome::Applied => {
            tracing::info!(name = %name, "Product deleted.");
            Ok(format!("Product named {name} deleted successfully"))
        }
        _ => Err(AppError::NotFound(format!(
            "There is no product named {name}, please try with id or check the name again."
        ))),
    }
}
