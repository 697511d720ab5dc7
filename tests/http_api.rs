mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use axum_cart_api::app::build_app;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> anyhow::Result<Router> {
    let state = common::setup_state().await?;
    build_app(state, &common::test_config())
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body)?).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, json))
}

fn shoe(user: &str, quantity: Value) -> Value {
    json!({ "user": user, "id": 1, "name": "Shoe", "price": 10, "quantity": quantity })
}

#[tokio::test]
async fn add_item_reports_created_then_ok() -> anyhow::Result<()> {
    let app = app().await?;

    let first = Some(shoe("a", json!(2)));
    let (status, body) = send(&app, Method::POST, "/api/addCart", first).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Item added to new cart");

    let second = Some(shoe("a", json!("1")));
    let (status, body) = send(&app, Method::POST, "/api/addCart", second).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item added to existing cart");

    let (status, body) = send(&app, Method::GET, "/api/getAll/a", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["id"], "1");
    assert_eq!(body["items"][0]["quantity"], 3);
    assert_eq!(body["totalPrice"], 30.0);
    Ok(())
}

#[tokio::test]
async fn add_item_rejects_missing_fields_and_bad_json() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/addCart",
        Some(json!({ "user": "a", "id": "1", "name": "Shoe" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required parameters");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/addCart")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn user_path_segment_is_percent_decoded() -> anyhow::Result<()> {
    let app = app().await?;

    let item = Some(shoe("jane doe@example.com", json!(1)));
    send(&app, Method::POST, "/api/addCart", item).await?;
    let uri = "/api/getAll/jane%20doe%40example.com";
    let (status, body) = send(&app, Method::GET, uri, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn empty_cart_lookup_returns_zero_total() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, body) = send(&app, Method::GET, "/api/getAll/ghost", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No item in cart");
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["totalPrice"], 0.0);
    Ok(())
}

#[tokio::test]
async fn remove_item_maps_not_found() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, body) = send(&app, Method::DELETE, "/api/removeItem/a/1/1", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Cart not found");

    send(&app, Method::POST, "/api/addCart", Some(shoe("a", json!(3)))).await?;
    let (status, body) = send(&app, Method::DELETE, "/api/removeItem/a/1/2", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item updated successfully");
    assert_eq!(body["cart"]["items"][0]["quantity"], 1);
    assert_eq!(body["cart"]["totalPrice"], 10.0);
    assert_eq!(body["cart"]["isCheckout"], false);

    let (status, body) = send(&app, Method::DELETE, "/api/removeItem/a/42/1", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Item not found in cart");
    Ok(())
}

#[tokio::test]
async fn update_quantity_validates_action() -> anyhow::Result<()> {
    let app = app().await?;
    send(&app, Method::POST, "/api/addCart", Some(shoe("a", json!(1)))).await?;

    let (status, _) = send(&app, Method::POST, "/api/updateQuantity/a/1/triple", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::POST, "/api/updateQuantity/a/1/increase", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Quantity increased successfully");
    assert_eq!(body["cart"]["items"][0]["quantity"], 2);
    assert_eq!(body["cart"]["totalPrice"], 20.0);

    let (status, _) = send(&app, Method::POST, "/api/updateQuantity/a/9/increase", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn checkout_and_history_round_trip() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, body) = send(&app, Method::POST, "/api/checkOut/a", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Cart not found or empty");

    send(&app, Method::POST, "/api/addCart", Some(shoe("a", json!(2)))).await?;
    let (status, body) = send(&app, Method::POST, "/api/checkOut/a", None).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Checkout successful");
    assert_eq!(body["receipt"]["user"], "a");
    assert_eq!(body["receipt"]["totalPrice"], 20.0);
    assert!(body["receipt"]["timestamp"].is_string());
    assert_eq!(body["cart"], json!({ "items": [] }));

    let (status, body) = send(&app, Method::GET, "/api/checkoutHistory/a", None).await?;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["totalPrice"], 20.0);
    assert_eq!(data[0]["products"]["items"][0]["name"], "Shoe");

    let (status, body) = send(&app, Method::GET, "/api/checkoutHistory/b", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_json_not_found() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, body) = send(&app, Method::GET, "/api/nope", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not Found");
    Ok(())
}

#[tokio::test]
async fn responses_carry_request_id() -> anyhow::Result<()> {
    let app = app().await?;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    Ok(())
}

#[tokio::test]
async fn oversized_body_is_rejected() -> anyhow::Result<()> {
    let app = app().await?;
    let padding = "x".repeat(2 * 1024 * 1024);
    let payload = json!({ "user": "a", "id": 1, "name": padding, "price": 1 }).to_string();

    let declared = Request::builder()
        .method(Method::POST)
        .uri("/api/addCart")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, payload.len())
        .body(Body::from(payload.clone()))?;
    let response = app.clone().oneshot(declared).await?;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let undeclared = Request::builder()
        .method(Method::POST)
        .uri("/api/addCart")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload))?;
    let response = app.clone().oneshot(undeclared).await?;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let (_, body) = send(&app, Method::GET, "/api/getAll/a", None).await?;
    assert_eq!(body["items"], json!([]));
    Ok(())
}

#[tokio::test]
async fn missing_content_type_is_unsupported_media() -> anyhow::Result<()> {
    let app = app().await?;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/addCart")
        .body(Body::from(shoe("a", json!(1)).to_string()))?;
    let response = app.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["message"], "Unsupported Media Type");
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin_with_credentials() -> anyhow::Result<()> {
    let app = app().await?;

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/addCart")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())?;
    let response = app.clone().oneshot(preflight).await?;
    assert!(response.status().is_success());

    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).and_then(|v| v.to_str().ok()),
        Some("true")
    );
    let methods = headers
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(methods.contains("DELETE"));

    let foreign = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/addCart")
        .header(header::ORIGIN, "http://evil.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())?;
    let response = app.clone().oneshot(foreign).await?;
    assert!(!response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    Ok(())
}
