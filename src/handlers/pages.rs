//! Server-rendered screens: home, plus one add-form-and-list page per entity.
//!
//! A successful submit redirects back to the page with a notice; a rejected
//! submit re-renders the page with the error and the matching 4xx status.

use super::html;
use crate::EstoreError;
use crate::router::EstoreState;
use crate::types::drafts::{CustomerDraft, OrderDraft, ProductDraft};
use crate::types::page::{NavAction, Page};
use axum::{
    Form,
    extract::{Query, State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NavigateForm {
    pub action: NavAction,
    pub from: Option<String>,
}

/// GET /
pub async fn home_page() -> Html<String> {
    let body = format!(
        "<p>Choose a section</p>{}{}{}",
        html::nav_button(Page::Home, NavAction::OpenProducts, "Products"),
        html::nav_button(Page::Home, NavAction::OpenCustomers, "Customers"),
        html::nav_button(Page::Home, NavAction::OpenOrders, "Orders"),
    );
    Html(html::layout(Page::Home, &body))
}

/// POST /navigate -> 303 to the page the action leads to.
pub async fn navigate(Form(form): Form<NavigateForm>) -> Redirect {
    let current = form
        .from
        .as_deref()
        .and_then(Page::from_path)
        .unwrap_or_default();
    let next = current.apply(form.action);
    tracing::debug!(from = ?current, to = ?next, "navigate");
    Redirect::to(next.path())
}

pub async fn products_page(
    State(state): State<EstoreState>,
    Query(query): Query<PageQuery>,
) -> Result<Response, EstoreError> {
    render_products(&state, StatusCode::OK, query.notice.as_deref(), None).await
}

pub async fn submit_product(
    State(state): State<EstoreState>,
    payload: Result<Form<ProductDraft>, FormRejection>,
) -> Result<Response, EstoreError> {
    let result = match payload {
        Ok(Form(draft)) => state.ops.add_product(draft).await,
        Err(rejection) => Err(rejection.into()),
    };
    match result {
        Ok(product) => Ok(redirect_with_notice(
            Page::Products,
            &format!("Product '{}' added successfully!", product.name),
        )),
        Err(err @ EstoreError::Persistence(_)) => Err(err),
        Err(err) => {
            render_products(&state, err.status(), None, Some(&err.public_message())).await
        }
    }
}

pub async fn customers_page(
    State(state): State<EstoreState>,
    Query(query): Query<PageQuery>,
) -> Result<Response, EstoreError> {
    render_customers(&state, StatusCode::OK, query.notice.as_deref(), None).await
}

pub async fn submit_customer(
    State(state): State<EstoreState>,
    payload: Result<Form<CustomerDraft>, FormRejection>,
) -> Result<Response, EstoreError> {
    let result = match payload {
        Ok(Form(draft)) => state.ops.add_customer(draft).await,
        Err(rejection) => Err(rejection.into()),
    };
    match result {
        Ok(customer) => Ok(redirect_with_notice(
            Page::Customers,
            &format!("Customer '{}' added successfully!", customer.name),
        )),
        Err(err @ EstoreError::Persistence(_)) => Err(err),
        Err(err) => {
            render_customers(&state, err.status(), None, Some(&err.public_message())).await
        }
    }
}

pub async fn orders_page(
    State(state): State<EstoreState>,
    Query(query): Query<PageQuery>,
) -> Result<Response, EstoreError> {
    render_orders(&state, StatusCode::OK, query.notice.as_deref(), None).await
}

pub async fn submit_order(
    State(state): State<EstoreState>,
    payload: Result<Form<OrderDraft>, FormRejection>,
) -> Result<Response, EstoreError> {
    let result = match payload {
        Ok(Form(draft)) => state.ops.add_order(draft).await,
        Err(rejection) => Err(rejection.into()),
    };
    match result {
        Ok(_) => Ok(redirect_with_notice(Page::Orders, "Order added successfully!")),
        Err(err @ EstoreError::Persistence(_)) => Err(err),
        Err(err) => render_orders(&state, err.status(), None, Some(&err.public_message())).await,
    }
}

fn redirect_with_notice(page: Page, notice: &str) -> Response {
    let encoded: String = url::form_urlencoded::byte_serialize(notice.as_bytes()).collect();
    Redirect::to(&format!("{}?notice={}", page.path(), encoded)).into_response()
}

async fn render_products(
    state: &EstoreState,
    status: StatusCode,
    notice: Option<&str>,
    error: Option<&str>,
) -> Result<Response, EstoreError> {
    let products = state.ops.list_products().await?;
    let form = "<h2>Add New Product</h2>\
        <form method=\"post\" action=\"/products\">\
        <label>Product Name <input name=\"name\"></label>\
        <label>Price <input name=\"price\" type=\"number\" min=\"0\" step=\"0.01\" value=\"0\"></label>\
        <label>Stock <input name=\"stock\" type=\"number\" min=\"0\" step=\"1\" value=\"0\"></label>\
        <button type=\"submit\">Add Product</button></form>";
    let items = products
        .iter()
        .map(|p| format!("{} - ₹{:?} - Stock: {}", p.name, p.price, p.stock));
    Ok(page_response(
        Page::Products,
        status,
        notice,
        error,
        form,
        html::list("Product List", items),
    ))
}

async fn render_customers(
    state: &EstoreState,
    status: StatusCode,
    notice: Option<&str>,
    error: Option<&str>,
) -> Result<Response, EstoreError> {
    let customers = state.ops.list_customers().await?;
    let form = "<h2>Add New Customer</h2>\
        <form method=\"post\" action=\"/customers\">\
        <label>Customer Name <input name=\"name\"></label>\
        <label>Email <input name=\"email\" type=\"email\"></label>\
        <label>Phone <input name=\"phone\"></label>\
        <button type=\"submit\">Add Customer</button></form>";
    let items = customers
        .iter()
        .map(|c| format!("{} - {} - {}", c.name, c.email, c.phone));
    Ok(page_response(
        Page::Customers,
        status,
        notice,
        error,
        form,
        html::list("Customer List", items),
    ))
}

async fn render_orders(
    state: &EstoreState,
    status: StatusCode,
    notice: Option<&str>,
    error: Option<&str>,
) -> Result<Response, EstoreError> {
    let orders = state.ops.list_orders().await?;
    let form = "<h2>Add New Order</h2>\
        <form method=\"post\" action=\"/orders\">\
        <label>Customer ID <input name=\"customer_id\" type=\"number\" min=\"1\" step=\"1\" value=\"1\"></label>\
        <label>Product ID <input name=\"product_id\" type=\"number\" min=\"1\" step=\"1\" value=\"1\"></label>\
        <label>Quantity <input name=\"quantity\" type=\"number\" min=\"1\" step=\"1\" value=\"1\"></label>\
        <button type=\"submit\">Add Order</button></form>";
    let items = orders.iter().map(|o| {
        format!(
            "Customer ID: {} | Product ID: {} | Quantity: {}",
            o.customer_id, o.product_id, o.quantity
        )
    });
    Ok(page_response(
        Page::Orders,
        status,
        notice,
        error,
        form,
        html::list("Order List", items),
    ))
}

fn page_response(
    page: Page,
    status: StatusCode,
    notice: Option<&str>,
    error: Option<&str>,
    form: &str,
    list: String,
) -> Response {
    let body = format!(
        "{}{}{}{}",
        html::nav_button(page, NavAction::BackToHome, "Back to Home"),
        html::banners(notice, error),
        form,
        list,
    );
    (status, Html(html::layout(page, &body))).into_response()
}
