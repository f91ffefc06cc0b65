use crate::handlers::{api, pages};
use crate::service::StoreOps;
use axum::{
    Router,
    routing::{get, post},
};

#[derive(Clone)]
pub struct EstoreState {
    pub ops: StoreOps,
}

impl EstoreState {
    pub fn new(ops: StoreOps) -> Self {
        Self { ops }
    }
}

pub fn estore_router(state: EstoreState) -> Router {
    Router::new()
        .route("/", get(pages::home_page))
        .route("/navigate", post(pages::navigate))
        .route(
            "/products",
            get(pages::products_page).post(pages::submit_product),
        )
        .route(
            "/customers",
            get(pages::customers_page).post(pages::submit_customer),
        )
        .route("/orders", get(pages::orders_page).post(pages::submit_order))
        .route(
            "/api/products",
            get(api::list_products).post(api::create_product),
        )
        .route(
            "/api/customers",
            get(api::list_customers).post(api::create_customer),
        )
        .route(
            "/api/orders",
            get(api::list_orders).post(api::create_order),
        )
        .with_state(state)
}
