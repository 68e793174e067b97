use httpmock::prelude::*;
use mystara_client::market::types::{NewPurchaseRequest, Registration};
use mystara_client::{ApiError, Role, SessionStore};
use serde_json::json;
use std::sync::atomic::Ordering;

mod support;

#[tokio::test]
async fn buyer_login_then_request_sends_buyer_identity() {
    let server = MockServer::start_async().await;
    let login = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/buyer/auth/login")
                .json_body(json!({"email": "asha@example.com", "password": "pw"}));
            then.status(200).json_body(json!({
                "token": "jwt-1",
                "buyer": {"id": "b1", "email": "asha@example.com", "name": "Asha"}
            }));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/buyer/requests")
                .header("authorization", "Bearer jwt-1")
                .header("x-buyer-id", "b1")
                .json_body(json!({"productId": "p1", "quantity": 2, "message": "hi"}));
            then.status(201).json_body(json!({
                "id": "r1",
                "buyerId": "b1",
                "sellerId": "s1",
                "productId": "p1",
                "productName": "Lamp",
                "quantity": 2,
                "price": 250.0,
                "message": "hi",
                "status": "PENDING",
                "createdAt": "2025-03-01T09:30:00"
            }));
        })
        .await;

    let store = support::store_with(None);
    let client = support::client(&server.base_url(), store.clone());

    let session = client
        .auth()
        .login(true, "asha@example.com", "pw")
        .await
        .unwrap()
        .into_data();
    assert_eq!(session.role, Role::Buyer);
    assert_eq!(session.user_id, "b1");
    assert_eq!(store.get(), Some(session));

    let resp = client
        .requests()
        .create(&NewPurchaseRequest {
            product_id: "p1".into(),
            quantity: 2,
            message: Some("hi".into()),
        })
        .await
        .unwrap();

    assert_eq!(resp.status.as_u16(), 201);
    assert_eq!(resp.data.id, "r1");
    login.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
async fn seller_register_stores_seller_session() {
    let server = MockServer::start_async().await;
    let register = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/seller/auth/register")
                .json_body(json!({
                    "email": "shop@example.com",
                    "password": "pw",
                    "name": "Ravi",
                    "businessName": "Ravi Crafts"
                }));
            then.status(201).json_body(json!({
                "token": "jwt-s",
                "seller": {"id": "s7", "email": "shop@example.com", "name": "Ravi", "businessName": "Ravi Crafts"}
            }));
        })
        .await;

    let store = support::store_with(None);
    let client = support::client(&server.base_url(), store.clone());

    let registration = Registration {
        email: "shop@example.com".into(),
        password: "pw".into(),
        name: "Ravi".into(),
        business_name: Some("Ravi Crafts".into()),
        ..Default::default()
    };
    let session = client
        .auth()
        .register(false, &registration)
        .await
        .unwrap()
        .into_data();

    register.assert_async().await;
    assert_eq!(session.role, Role::Seller);
    assert_eq!(session.token, "jwt-s");
    let stored = store.get().unwrap();
    assert_eq!(stored.user_id, "s7");
    assert_eq!(stored.profile.extra["businessName"], "Ravi Crafts");
}

#[tokio::test]
async fn logout_clears_session() {
    let store = support::store_with(Some(support::buyer_session()));
    let client = support::client(support::UNREACHABLE, store.clone());

    client.auth().logout();
    assert!(store.get().is_none());
    assert!(client.auth().current_session().is_none());
    client.auth().logout();
}

#[tokio::test]
async fn unauthorized_tears_down_session_from_any_call() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/cart");
            then.status(401).json_body(json!({"error": "Token expired"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/themes");
            then.status(401);
        })
        .await;

    let store = support::store_with(Some(support::buyer_session()));
    let (client, expired) = support::counting_client(&server.base_url(), store.clone());

    let err = client.cart().get().await.unwrap_err();
    assert!(matches!(err, ApiError::AuthExpired { .. }));
    assert_eq!(err.to_string(), "Token expired");
    assert!(store.get().is_none());
    assert_eq!(expired.load(Ordering::SeqCst), 1);

    store.set(support::seller_session()).unwrap();
    let err = client.themes().list().await.unwrap_err();
    assert!(err.is_auth_expired());
    assert!(store.get().is_none());
    assert_eq!(expired.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_login_reports_server_reason() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/seller/auth/login");
            then.status(401)
                .json_body(json!({"error": "Invalid email or password"}));
        })
        .await;

    let store = support::store_with(None);
    let (client, expired) = support::counting_client(&server.base_url(), store.clone());

    let err = client
        .auth()
        .login(false, "x@example.com", "bad")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(store.get().is_none());
    assert_eq!(expired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn login_without_profile_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/buyer/auth/login");
            then.status(200).json_body(json!({"token": "jwt"}));
        })
        .await;

    let store = support::store_with(None);
    let client = support::client(&server.base_url(), store.clone());

    let err = client.auth().login(true, "a@b.c", "pw").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    assert!(store.get().is_none());
}
