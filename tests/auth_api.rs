mod common;

use common::{error_messages, TestApp, TEST_SECRET};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::{json, Value};

use villa_api::features::users::model::Claims;

#[tokio::test]
async fn register_returns_the_public_account_view() {
    let app = TestApp::spawn().await;

    let response = app
        .server
        .post("/api/v1/Users/Register")
        .json(&json!({
            "userName": "newuser",
            "name": "New User",
            "password": "password123",
            "role": "customer",
        }))
        .await;
    assert_eq!(response.status_code(), 200, "{}", response.text());

    let body: Value = response.json();
    assert_eq!(body["isSuccess"], true);
    assert_eq!(body["result"]["userName"], "newuser");
    assert_eq!(body["result"]["name"], "New User");

    // The password never leaves the server, hashed or otherwise.
    let raw = response.text();
    assert!(!raw.contains("password123"));
    assert!(!raw.to_lowercase().contains("hash"));
}

#[tokio::test]
async fn duplicate_usernames_are_rejected() {
    let app = TestApp::spawn().await;
    app.register("taken", "password123", "customer").await;

    let response = app
        .server
        .post("/api/v1/Users/Register")
        .json(&json!({
            "userName": "taken",
            "name": "Someone Else",
            "password": "otherpassword",
            "role": "customer",
        }))
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(
        error_messages(&body),
        vec!["Username already exists.".to_string()]
    );

    // The original account is untouched by the failed registration.
    let token = app.login_token("taken", "password123").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn login_issues_a_decodable_token() {
    let app = TestApp::spawn().await;
    app.register("claims-user", "password123", "admin").await;

    let response = app
        .server
        .post("/api/v1/Users/Login")
        .json(&json!({ "userName": "claims-user", "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), 200, "{}", response.text());

    let body: Value = response.json();
    assert_eq!(body["result"]["role"], "admin");
    assert_eq!(body["result"]["user"]["userName"], "claims-user");

    let token = body["result"]["token"].as_str().unwrap();
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(TEST_SECRET.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .unwrap();

    assert_eq!(data.claims.name, "claims-user");
    assert_eq!(data.claims.role, "admin");
    assert!(data.claims.sub.parse::<i64>().unwrap() > 0);
}

#[tokio::test]
async fn bad_credentials_fail_identically() {
    let app = TestApp::spawn().await;
    app.register("probe-target", "password123", "customer").await;

    let wrong_password = app
        .server
        .post("/api/v1/Users/Login")
        .json(&json!({ "userName": "probe-target", "password": "wrong" }))
        .await;
    let unknown_user = app
        .server
        .post("/api/v1/Users/Login")
        .json(&json!({ "userName": "nobody-here", "password": "wrong" }))
        .await;

    assert_eq!(wrong_password.status_code(), 400);
    assert_eq!(unknown_user.status_code(), 400);

    // Both failures look the same from the outside.
    assert_eq!(wrong_password.text(), unknown_user.text());

    let body: Value = wrong_password.json();
    assert_eq!(
        error_messages(&body),
        vec!["Username or password incorrect.".to_string()]
    );
}

#[tokio::test]
async fn garbage_tokens_are_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .server
        .get("/api/v1/VillaAPI")
        .authorization_bearer("not-a-real-token")
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn account_endpoints_answer_on_both_versions() {
    let app = TestApp::spawn().await;

    let response = app
        .server
        .post("/api/v2/Users/Register")
        .json(&json!({
            "userName": "v2user",
            "name": "V2 User",
            "password": "password123",
            "role": "customer",
        }))
        .await;
    assert_eq!(response.status_code(), 200, "{}", response.text());

    let response = app
        .server
        .post("/api/v2/Users/Login")
        .json(&json!({ "userName": "v2user", "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), 200);
}
