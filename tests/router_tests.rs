use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use estore::router::{EstoreState, estore_router};
use estore::{StoreOps, StoreStorage};
use tower::ServiceExt;

async fn app() -> Router {
    let storage = StoreStorage::connect_in_memory()
        .await
        .expect("failed to open in-memory store");
    estore_router(EstoreState::new(StoreOps::new(storage)))
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

fn json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

async fn body_string(resp: axum::response::Response) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}

fn location(resp: &axum::response::Response) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("missing location header")
}

#[tokio::test]
async fn navigate_redirects_to_target_page() {
    let app = app().await;

    let resp = app
        .clone()
        .oneshot(form("/navigate", "action=open_orders&from=%2F"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/orders");

    let resp = app
        .oneshot(form("/navigate", "action=back_to_home&from=%2Fproducts"))
        .await
        .expect("request failed");
    assert_eq!(location(&resp), "/");
}

#[tokio::test]
async fn home_page_offers_every_section() {
    let resp = app().await.oneshot(get("/")).await.expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    for action in ["open_products", "open_customers", "open_orders"] {
        assert!(body.contains(action), "missing {action}");
    }
}

#[tokio::test]
async fn product_form_submit_redirects_and_lists_row() {
    let app = app().await;

    let resp = app
        .clone()
        .oneshot(form("/products", "name=Pen&price=10&stock=100"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let target = location(&resp).to_string();
    assert!(target.starts_with("/products?notice="));

    let resp = app.oneshot(get(&target)).await.expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("Product &#39;Pen&#39; added successfully!"));
    assert!(body.contains("Pen - ₹10.0 - Stock: 100"));
}

#[tokio::test]
async fn blank_form_field_rerenders_with_error() {
    let resp = app()
        .await
        .oneshot(form("/products", "name=&price=&stock=0"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_string(resp).await;
    assert!(body.contains("missing required field: name"));
}

#[tokio::test]
async fn customer_page_escapes_user_text() {
    let app = app().await;
    let resp = app
        .clone()
        .oneshot(form(
            "/customers",
            "name=%3Cb%3EBob%3C%2Fb%3E&email=bob%40x.com&phone=555",
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let body = body_string(app.oneshot(get("/customers")).await.expect("request failed")).await;
    assert!(body.contains("&lt;b&gt;Bob&lt;/b&gt; - bob@x.com - 555"));
    assert!(!body.contains("<b>Bob</b>"));
}

#[tokio::test]
async fn api_create_and_list() {
    let app = app().await;

    let resp = app
        .clone()
        .oneshot(json(
            "/api/products",
            r#"{"name":"Pen","price":10.0,"stock":100}"#,
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: serde_json::Value =
        serde_json::from_str(&body_string(resp).await).expect("invalid json");
    assert_eq!(created["id"], 1);

    let resp = app
        .clone()
        .oneshot(json(
            "/api/customers",
            r#"{"name":"Alice","email":"alice@x.com","phone":"555-0100"}"#,
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(json(
            "/api/orders",
            r#"{"customer_id":1,"product_id":1,"quantity":3}"#,
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(get("/api/orders"))
        .await
        .expect("request failed");
    let orders: serde_json::Value =
        serde_json::from_str(&body_string(resp).await).expect("invalid json");
    assert_eq!(
        orders,
        serde_json::json!([{"id":1,"customer_id":1,"product_id":1,"quantity":3}])
    );

    let resp = app
        .oneshot(get("/api/products"))
        .await
        .expect("request failed");
    let products: serde_json::Value =
        serde_json::from_str(&body_string(resp).await).expect("invalid json");
    assert_eq!(products[0]["stock"], 100);
}

#[tokio::test]
async fn api_maps_domain_errors_to_statuses() {
    let app = app().await;
    let alice = r#"{"name":"Alice","email":"alice@x.com","phone":"555-0100"}"#;

    let resp = app
        .clone()
        .oneshot(json("/api/customers", alice))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(json("/api/customers", alice))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert!(body_string(resp).await.contains(r#""code":"UNIQUE_CONSTRAINT""#));

    let resp = app
        .clone()
        .oneshot(json(
            "/api/orders",
            r#"{"customer_id":1,"product_id":9,"quantity":1}"#,
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_string(resp).await.contains(r#""code":"UNKNOWN_REFERENCE""#));

    let resp = app
        .oneshot(json("/api/products", r#"{"name":"Pen","stock":1}"#))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_string(resp).await.contains(r#""code":"VALIDATION_ERROR""#));
}

#[tokio::test]
async fn unparseable_numbers_are_validation_errors() {
    let app = app().await;

    let resp = app
        .clone()
        .oneshot(json(
            "/api/products",
            r#"{"name":"Pen","price":"abc","stock":1}"#,
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value =
        serde_json::from_str(&body_string(resp).await).expect("invalid json");
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(
        body["error"]["message"]
            .as_str()
            .is_some_and(|m| m.contains("price"))
    );

    let resp = app
        .clone()
        .oneshot(form("/products", "name=Pen&price=abc&stock=1"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    let body = body_string(resp).await;
    assert!(body.contains("Add New Product"));
    assert!(body.contains("class=\"error\""));
    assert!(body.contains("price"));

    let resp = app
        .clone()
        .oneshot(form("/orders", "customer_id=1&product_id=1&quantity=2.5"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_string(resp).await;
    assert!(body.contains("Add New Order"));
    assert!(body.contains("quantity"));

    let resp = app
        .oneshot(get("/api/products"))
        .await
        .expect("request failed");
    assert_eq!(body_string(resp).await, "[]");
}

#[tokio::test]
async fn storage_failure_is_an_opaque_500() {
    let storage = StoreStorage::connect_in_memory()
        .await
        .expect("failed to open in-memory store");
    let app = estore_router(EstoreState::new(StoreOps::new(storage.clone())));
    storage.pool().close().await;

    let resp = app
        .clone()
        .oneshot(json(
            "/api/products",
            r#"{"name":"Pen","price":10.0,"stock":100}"#,
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_string(resp).await;
    assert!(body.contains(r#""code":"INTERNAL_ERROR""#));
    assert!(body.contains("An internal server error occurred."));
    assert!(!body.contains("closed"));

    let resp = app
        .oneshot(form("/customers", "name=Alice&email=alice%40x.com&phone=555"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_string(resp).await;
    assert!(body.contains(r#""code":"INTERNAL_ERROR""#));
    assert!(!body.contains("Add New Customer"));
}
