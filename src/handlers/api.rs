//! JSON API: the same add/list operations as the HTML pages.

use crate::db::models::{Customer, Order, Product};
use crate::types::drafts::{CustomerDraft, OrderDraft, ProductDraft};
use crate::{EstoreError, router::EstoreState};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

/// GET /api/products
pub async fn list_products(
    State(state): State<EstoreState>,
) -> Result<Json<Vec<Product>>, EstoreError> {
    Ok(Json(state.ops.list_products().await?))
}

/// POST /api/products -> 201 with the stored row. Undecodable bodies are
/// reported as validation errors, same as missing fields.
pub async fn create_product(
    State(state): State<EstoreState>,
    payload: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), EstoreError> {
    let Json(draft) = payload?;
    let product = state.ops.add_product(draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn list_customers(
    State(state): State<EstoreState>,
) -> Result<Json<Vec<Customer>>, EstoreError> {
    Ok(Json(state.ops.list_customers().await?))
}

pub async fn create_customer(
    State(state): State<EstoreState>,
    payload: Result<Json<CustomerDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>), EstoreError> {
    let Json(draft) = payload?;
    let customer = state.ops.add_customer(draft).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn list_orders(
    State(state): State<EstoreState>,
) -> Result<Json<Vec<Order>>, EstoreError> {
    Ok(Json(state.ops.list_orders().await?))
}

pub async fn create_order(
    State(state): State<EstoreState>,
    payload: Result<Json<OrderDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), EstoreError> {
    let Json(draft) = payload?;
    let order = state.ops.add_order(draft).await?;
    Ok((StatusCode::CREATED, Json(order)))
}
