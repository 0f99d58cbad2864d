use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn signup_echoes_the_claimed_identity() {
    let app = TestApp::spawn().await;

    let response = app
        .post_signup(&json!({ "username": "alice", "email": "a@x.com" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "a@x.com");
}

#[tokio::test]
async fn signup_sends_a_confirmation_code() {
    let app = TestApp::spawn().await;

    app.post_signup(&json!({ "username": "alice", "email": "a@x.com" }))
        .await;

    let sent = app.email_client.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "a@x.com");
    assert!(!app.last_issued_code().await.is_empty());
}

#[tokio::test]
async fn re_signup_reissues_a_fresh_code() {
    let app = TestApp::spawn().await;
    let body = json!({ "username": "alice", "email": "a@x.com" });

    app.post_signup(&body).await;
    let first = app.last_issued_code().await;

    let response = app.post_signup(&body).await;
    assert_eq!(response.status().as_u16(), 200);

    let second = app.last_issued_code().await;
    assert_ne!(first, second);
    assert_eq!(app.email_client.sent().await.len(), 2);
}

#[tokio::test]
async fn signup_rejects_invalid_handles() {
    let app = TestApp::spawn().await;

    for username in ["me", "bad handle", "no!bang"] {
        let response = app
            .post_signup(&json!({ "username": username, "email": "a@x.com" }))
            .await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "{username} should be rejected"
        );
    }
}

#[tokio::test]
async fn signup_rejects_malformed_emails() {
    let app = TestApp::spawn().await;

    let response = app
        .post_signup(&json!({ "username": "alice", "email": "not-an-email" }))
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn signup_succeeds_when_mail_delivery_is_down() {
    let app = TestApp::spawn().await;
    app.email_client.fail_sends(true);

    let response = app
        .post_signup(&json!({ "username": "alice", "email": "a@x.com" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    assert!(app.email_client.sent().await.is_empty());

    // The account was created: once delivery recovers, a re-signup
    // reissues a code for the same identity.
    app.email_client.fail_sends(false);
    let response = app
        .post_signup(&json!({ "username": "alice", "email": "a@x.com" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    assert!(!app.last_issued_code().await.is_empty());
}

#[tokio::test]
async fn signup_rejects_identity_conflicts() {
    let app = TestApp::spawn().await;

    app.post_signup(&json!({ "username": "alice", "email": "a@x.com" }))
        .await;

    // Same username bound to a different email.
    let response = app
        .post_signup(&json!({ "username": "alice", "email": "b@x.com" }))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    // Same email bound to a different username.
    let response = app
        .post_signup(&json!({ "username": "bob", "email": "a@x.com" }))
        .await;
    assert_eq!(response.status().as_u16(), 400);
}
