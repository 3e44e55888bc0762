//! Session-gate integration tests: login, logout, cookie handling, and
//! the redirect-vs-401 split between page and API paths.

use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::{rngs::OsRng, RngCore};
use tempfile::TempDir;
use tower::ServiceExt;

use giftwise_server::api::app_router;
use giftwise_server::build_state;
use giftwise_server::config::{AuthConfig, Config};

async fn build_test_router(password: &str) -> (TempDir, axum::Router) {
    let tmp = tempfile::tempdir().unwrap();

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string();

    let mut secret_bytes = [0u8; 32];
    OsRng.fill_bytes(&mut secret_bytes);

    let config = Config {
        listen_addr: "127.0.0.1:0".to_string(),
        db_path: tmp.path().join("test.db").to_string_lossy().into_owned(),
        static_dir: tmp.path().join("public").to_string_lossy().into_owned(),
        auth: AuthConfig {
            password_hash,
            secret_key: Some(BASE64.encode(secret_bytes)),
            cookie_secure: false,
        },
    };
    let state = build_state(&config).await.unwrap();
    (tmp, app_router(state, &config))
}

async fn login(app: &axum::Router, password: &str) -> axum::http::Response<Body> {
    let body = serde_json::json!({ "password": password });
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

fn session_cookie(response: &axum::http::Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set the session cookie")
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("giftwise_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    // Cookie value up to the first attribute separator.
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn login_and_access_protected_route() {
    let password = "super-secret";
    let (_tmp, app) = build_test_router(password).await;

    // Unauthorized API request gets 401 JSON.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/gifts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    // Auth status without a cookie.
    let status_response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/auth/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(status_response.status(), 200);
    let status_body = to_bytes(status_response.into_body(), usize::MAX)
        .await
        .unwrap();
    let status_json: serde_json::Value = serde_json::from_slice(&status_body).unwrap();
    assert_eq!(status_json["authenticated"], false);

    // Login with the correct password.
    let login_response = login(&app, password).await;
    assert_eq!(login_response.status(), 200);
    let cookie = session_cookie(&login_response);
    let login_body = to_bytes(login_response.into_body(), usize::MAX)
        .await
        .unwrap();
    let login_json: serde_json::Value = serde_json::from_slice(&login_body).unwrap();
    assert_eq!(login_json["success"], true);

    // Access with the cookie succeeds.
    let authed_response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/gifts")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(authed_response.status(), 200);

    // Status now reports authenticated.
    let status_response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/auth/status")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status_body = to_bytes(status_response.into_body(), usize::MAX)
        .await
        .unwrap();
    let status_json: serde_json::Value = serde_json::from_slice(&status_body).unwrap();
    assert_eq!(status_json["authenticated"], true);
}

#[tokio::test]
async fn wrong_password_gets_401_and_no_cookie() {
    let (_tmp, app) = build_test_router("super-secret").await;

    let response = login(&app, "wrong").await;
    assert_eq!(response.status(), 401);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn page_navigation_without_session_redirects_to_login() {
    let (_tmp, app) = build_test_router("super-secret").await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap(),
        "/login"
    );
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let password = "super-secret";
    let (_tmp, app) = build_test_router(password).await;

    let cookie = session_cookie(&login(&app, password).await);

    let logout_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/auth/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(logout_response.status(), 200);
    let cleared = logout_response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cleared.contains("Max-Age=0"));

    // A cleared (empty) cookie value no longer opens a session.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/gifts")
                .header(header::COOKIE, "giftwise_session=")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn garbage_cookie_is_rejected() {
    let (_tmp, app) = build_test_router("super-secret").await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/people")
                .header(header::COOKIE, "giftwise_session=bm90LWEtdG9rZW4=")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn health_is_reachable_without_a_session() {
    let (_tmp, app) = build_test_router("super-secret").await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}
