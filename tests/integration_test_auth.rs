mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{
    parse_body, valid_submission, TestApp, ADMIN_EMAIL, ADMIN_PASSWORD, BASE_URL, CLIENT_ID, CLIENT_SECRET,
    USER_EMAIL, USER_PASSWORD,
};

#[tokio::test]
async fn test_obtain_access_token() {
    let app = TestApp::new().await;

    let form = format!("grant_type=password&username={}&password={}", USER_EMAIL, USER_PASSWORD);
    let response = app.request_token((CLIENT_ID, CLIENT_SECRET), &form).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], 600);
    assert_eq!(body["scope"], "read write");
}

#[tokio::test]
async fn test_token_with_wrong_password() {
    let app = TestApp::new().await;

    let form = format!("grant_type=password&username={}&password=not-it", ADMIN_EMAIL);
    let response = app.request_token((CLIENT_ID, CLIENT_SECRET), &form).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(response).await["error"], "invalid_grant");
}

#[tokio::test]
async fn test_token_for_unknown_user() {
    let app = TestApp::new().await;

    let response = app
        .request_token((CLIENT_ID, CLIENT_SECRET), "grant_type=password&username=ghost@events.test&password=x")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(response).await["error"], "invalid_grant");
}

#[tokio::test]
async fn test_token_with_wrong_client_secret() {
    let app = TestApp::new().await;

    let form = format!("grant_type=password&username={}&password={}", ADMIN_EMAIL, ADMIN_PASSWORD);
    let response = app.request_token((CLIENT_ID, "wrong"), &form).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    assert_eq!(parse_body(response).await["error"], "invalid_client");
}

#[tokio::test]
async fn test_token_without_client_credentials() {
    let app = TestApp::new().await;

    let response = app.send(
        Request::builder()
            .method("POST")
            .uri("/oauth/token")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("grant_type=password&username={}&password={}", ADMIN_EMAIL, ADMIN_PASSWORD)))
            .unwrap()
    ).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unsupported_grant_type() {
    let app = TestApp::new().await;

    let response = app.request_token((CLIENT_ID, CLIENT_SECRET), "grant_type=client_credentials").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(response).await["error"], "unsupported_grant_type");
}

#[tokio::test]
async fn test_password_grant_missing_password() {
    let app = TestApp::new().await;

    let form = format!("grant_type=password&username={}", ADMIN_EMAIL);
    let response = app.request_token((CLIENT_ID, CLIENT_SECRET), &form).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(response).await["error"], "invalid_request");
}

#[tokio::test]
async fn test_garbage_bearer_token() {
    let app = TestApp::new().await;

    // Required authentication: refused.
    let response = app.call("POST", "/api/events", Some("not-a-jwt"), Some(&valid_submission())).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Optional authentication: served as a guest.
    let response = app.call("GET", "/api/events", Some("not-a-jwt"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert!(body["_links"].get("create-event").is_none());
}

#[tokio::test]
async fn test_index() {
    let app = TestApp::new().await;

    let response = app.call("GET", "/api", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["_links"]["self"]["href"], format!("{}/api", BASE_URL));
    assert_eq!(body["_links"]["events"]["href"], format!("{}/api/events", BASE_URL));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.call("GET", "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_body(response).await["status"], "ok");
}
