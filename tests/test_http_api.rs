mod helpers;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use helpers::*;
use hotelier::infrastructure::http::router::build_router;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn app_with_token() -> (Router, String) {
    let app = build_router(setup_memory_state().await);
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "admin", "password": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();
    (app, token)
}

#[tokio::test]
async fn test_health_is_public() {
    let app = build_router(setup_memory_state().await);
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_api_requires_login() {
    let app = build_router(setup_memory_state().await);

    let (status, body) = send(&app, Method::GET, "/api/rooms", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = send(&app, Method::GET, "/api/rooms", Some("made-up"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "admin", "password": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let (app, token) = app_with_token().await;

    let (status, _) = send(&app, Method::POST, "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, "/api/rooms", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_room_booking_and_availability_flow() {
    let (app, token) = app_with_token().await;
    let token = Some(token.as_str());

    let (status, room) = send(
        &app,
        Method::POST,
        "/api/rooms",
        token,
        Some(json!({"number": "101", "type": "double", "capacity": 2, "basePrice": 200.0})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(room["id"], "1");
    assert_eq!(room["status"], "empty");

    let (status, rule) = send(
        &app,
        Method::POST,
        "/api/pricing-rules",
        token,
        Some(json!({
            "roomId": "all",
            "startDate": "2024-06-01",
            "endDate": "2024-06-30",
            "priceType": "percentage",
            "priceValue": -10.0,
            "name": "June promo"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(rule["roomId"], "all");

    let (status, available) = send(
        &app,
        Method::GET,
        "/api/availability?start=2024-06-01&end=2024-06-04&pax=2",
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(available.as_array().unwrap().len(), 1);
    assert_eq!(available[0]["number"], "101");
    assert_eq!(available[0]["nights"], 3);
    assert_close(available[0]["pricePerNight"].as_f64().unwrap(), 180.0);
    assert_close(available[0]["totalPrice"].as_f64().unwrap(), 540.0);

    let (status, booking) = send(
        &app,
        Method::POST,
        "/api/bookings",
        token,
        Some(json!({
            "roomId": "1",
            "guestName": "Grace Hopper",
            "checkIn": "2024-06-01",
            "checkOut": "2024-06-04"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(booking["status"], "active");
    assert_close(booking["totalPrice"].as_f64().unwrap(), 540.0);

    let (status, conflict) = send(
        &app,
        Method::POST,
        "/api/bookings",
        token,
        Some(json!({
            "roomId": "1",
            "guestName": "Alan Turing",
            "checkIn": "2024-06-03",
            "checkOut": "2024-06-05"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(conflict["error"].is_string());

    let (status, available) = send(
        &app,
        Method::GET,
        "/api/availability?start=2024-06-01&end=2024-06-04&pax=2",
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(available.as_array().unwrap().is_empty());

    let (status, cancelled) = send(
        &app,
        Method::PUT,
        "/api/bookings/1",
        token,
        Some(json!({"status": "cancelled"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");

    let (status, room) = send(&app, Method::GET, "/api/rooms/1", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(room["status"], "empty");
}

#[tokio::test]
async fn test_invalid_requests_map_to_error_bodies() {
    let (app, token) = app_with_token().await;
    let token = Some(token.as_str());

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/availability?start=2024-06-04&end=2024-06-01&pax=2",
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/availability?start=2024-06-01&end=2024-06-04&pax=0",
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::GET, "/api/availability?start=2024-06-01", token, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required parameter: end");

    let (status, _) = send(&app, Method::GET, "/api/rooms/99", token, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/reports/yearly", token, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/rooms",
        token,
        Some(json!({"number": "101", "type": "double", "capacity": 0, "basePrice": 100.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_quote_and_report_endpoints() {
    let (app, token) = app_with_token().await;
    let token = Some(token.as_str());

    send(
        &app,
        Method::POST,
        "/api/rooms",
        token,
        Some(json!({"number": "101", "type": "single", "capacity": 1, "basePrice": 100.0})),
    )
    .await;

    let (status, quote) = send(
        &app,
        Method::POST,
        "/api/pricing/quote",
        token,
        Some(json!({"roomId": "1", "checkIn": "2024-06-01", "checkOut": "2024-06-04"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["nights"], 3);
    assert_eq!(quote["dailyPrices"].as_array().unwrap().len(), 3);
    assert_close(quote["totalPrice"].as_f64().unwrap(), 300.0);

    let (status, report) = send(
        &app,
        Method::GET,
        "/api/reports/weekly?date=2024-06-02",
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["reportType"], "weekly");
    assert_eq!(report["totalRooms"], 1);
    assert_eq!(report["dailyOccupancy"].as_array().unwrap().len(), 7);

    let (status, changed) = send(
        &app,
        Method::POST,
        "/api/rooms/reconcile?date=2024-06-02",
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(changed.as_array().unwrap().is_empty());
}
