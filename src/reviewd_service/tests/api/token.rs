use serde_json::json;

use crate::helpers::{TestApp, short_window_policy};

#[tokio::test]
async fn issued_code_redeems_for_a_token_exactly_once() {
    let app = TestApp::spawn().await;

    app.post_signup(&json!({ "username": "alice", "email": "a@x.com" }))
        .await;
    let code = app.last_issued_code().await;

    let response = app
        .post_token(&json!({ "username": "alice", "confirmation_code": code }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    // The code was consumed; replaying it fails.
    let response = app
        .post_token(&json!({ "username": "alice", "confirmation_code": code }))
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn token_recovers_identity_and_role_on_verify() {
    let app = TestApp::spawn().await;

    app.post_signup(&json!({ "username": "alice", "email": "a@x.com" }))
        .await;
    let code = app.last_issued_code().await;

    let response = app
        .post_token(&json!({ "username": "alice", "confirmation_code": code }))
        .await;
    let body: serde_json::Value = response.json().await.unwrap();
    let token = body["token"].as_str().unwrap();

    let response = app.post_verify(Some(token)).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn verify_rejects_missing_and_garbage_tokens() {
    let app = TestApp::spawn().await;

    assert_eq!(app.post_verify(None).await.status().as_u16(), 401);
    assert_eq!(
        app.post_verify(Some("garbage")).await.status().as_u16(),
        401
    );
}

#[tokio::test]
async fn unknown_username_is_a_404() {
    let app = TestApp::spawn().await;

    let response = app
        .post_token(&json!({ "username": "ghost", "confirmation_code": "WHATEVER" }))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn wrong_code_is_a_400_and_the_stored_code_survives() {
    let app = TestApp::spawn().await;

    app.post_signup(&json!({ "username": "alice", "email": "a@x.com" }))
        .await;
    let code = app.last_issued_code().await;

    let response = app
        .post_token(&json!({ "username": "alice", "confirmation_code": "WRONG" }))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    // One wrong attempt does not force re-signup.
    let response = app
        .post_token(&json!({ "username": "alice", "confirmation_code": code }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn repeated_failures_rate_limit_even_the_correct_code() {
    let app = TestApp::spawn_with_policy(short_window_policy(5)).await;

    app.post_signup(&json!({ "username": "alice", "email": "a@x.com" }))
        .await;
    let code = app.last_issued_code().await;

    for _ in 0..5 {
        let response = app
            .post_token(&json!({ "username": "alice", "confirmation_code": "WRONG" }))
            .await;
        assert_eq!(response.status().as_u16(), 400);
    }

    // Sixth attempt fails fast, correct code or not.
    let response = app
        .post_token(&json!({ "username": "alice", "confirmation_code": code }))
        .await;
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    let message = body["error"].as_str().unwrap();
    assert!(
        message.contains("Too many failed attempts"),
        "rate limiting should be reported distinctly, got: {message}"
    );
}
