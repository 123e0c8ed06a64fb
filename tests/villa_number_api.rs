mod common;

use common::{error_messages, TestApp};
use serde_json::{json, Value};

async fn create_villa_number(app: &TestApp, token: &str, villa_no: i64, villa_id: i64) -> Value {
    let response = app
        .server
        .post("/api/v1/VillaNumberAPI")
        .authorization_bearer(token)
        .json(&json!({
            "villaNo": villa_no,
            "villaID": villa_id,
            "specialDetails": "ground floor",
        }))
        .await;
    assert_eq!(response.status_code(), 201, "{}", response.text());
    response.json()
}

#[tokio::test]
async fn create_then_list_attaches_the_parent_villa() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let villa_id = app.create_villa(&token, "Parent Villa", 2).await;

    let body = create_villa_number(&app, &token, 101, villa_id).await;
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["result"]["villaNo"], 101);
    assert_eq!(body["result"]["villaID"], villa_id);

    let response = app
        .server
        .get("/api/v1/VillaNumberAPI")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let listed = &body["result"].as_array().unwrap()[0];
    assert_eq!(listed["villaNo"], 101);
    assert_eq!(listed["villa"]["name"], "Parent Villa");
}

#[tokio::test]
async fn get_by_number_includes_the_villa() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let villa_id = app.create_villa(&token, "Lookup Villa", 2).await;
    create_villa_number(&app, &token, 201, villa_id).await;

    let response = app
        .server
        .get("/api/v1/VillaNumberAPI/201")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["result"]["villaNo"], 201);
    assert_eq!(body["result"]["villa"]["name"], "Lookup Villa");
}

#[tokio::test]
async fn unknown_parent_villa_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .post("/api/v1/VillaNumberAPI")
        .authorization_bearer(&token)
        .json(&json!({ "villaNo": 301, "villaID": 9999 }))
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(
        error_messages(&body),
        vec!["Villa ID is Invalid!".to_string()]
    );
}

#[tokio::test]
async fn duplicate_villa_numbers_are_rejected() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let villa_id = app.create_villa(&token, "Dup Villa", 2).await;
    create_villa_number(&app, &token, 401, villa_id).await;

    let response = app
        .server
        .post("/api/v1/VillaNumberAPI")
        .authorization_bearer(&token)
        .json(&json!({ "villaNo": 401, "villaID": villa_id }))
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(
        error_messages(&body),
        vec!["Villa Number already Exists!".to_string()]
    );
}

#[tokio::test]
async fn invalid_and_unknown_numbers_are_rejected() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .get("/api/v1/VillaNumberAPI/0")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 400);

    let response = app
        .server
        .get("/api/v1/VillaNumberAPI/999")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn mutating_verbs_reject_non_positive_numbers() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let villa_id = app.create_villa(&token, "Guard Villa", 2).await;

    for number in [0_i64, -3] {
        let response = app
            .server
            .put(&format!("/api/v1/VillaNumberAPI/{}", number))
            .authorization_bearer(&token)
            .json(&json!({ "villaNo": number, "villaID": villa_id }))
            .await;
        assert_eq!(response.status_code(), 400, "PUT {}", number);

        let response = app
            .server
            .delete(&format!("/api/v1/VillaNumberAPI/{}", number))
            .authorization_bearer(&token)
            .await;
        assert_eq!(response.status_code(), 400, "DELETE {}", number);
    }
}

#[tokio::test]
async fn put_moves_a_number_to_another_villa() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let first = app.create_villa(&token, "First Villa", 2).await;
    let second = app.create_villa(&token, "Second Villa", 2).await;
    create_villa_number(&app, &token, 501, first).await;

    let response = app
        .server
        .put("/api/v1/VillaNumberAPI/501")
        .authorization_bearer(&token)
        .json(&json!({
            "villaNo": 501,
            "villaID": second,
            "specialDetails": "moved",
        }))
        .await;
    assert_eq!(response.status_code(), 200, "{}", response.text());

    let body: Value = response.json();
    assert_eq!(body["result"]["villaID"], second);
    assert_eq!(body["result"]["specialDetails"], "moved");
}

#[tokio::test]
async fn put_with_mismatched_number_is_a_bad_request() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let villa_id = app.create_villa(&token, "Mismatch Parent", 2).await;
    create_villa_number(&app, &token, 601, villa_id).await;

    let response = app
        .server
        .put("/api/v1/VillaNumberAPI/601")
        .authorization_bearer(&token)
        .json(&json!({ "villaNo": 602, "villaID": villa_id }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn deleting_the_villa_orphans_its_numbers() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let villa_id = app.create_villa(&token, "Short Lived", 2).await;
    create_villa_number(&app, &token, 701, villa_id).await;

    // The parent reference is checked at write time only, so the villa can
    // go away underneath its numbers.
    let response = app
        .server
        .delete(&format!("/api/v1/VillaAPI/{}", villa_id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 200);

    // New writes against the dead id are rejected.
    let response = app
        .server
        .post("/api/v1/VillaNumberAPI")
        .authorization_bearer(&token)
        .json(&json!({ "villaNo": 702, "villaID": villa_id }))
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(
        error_messages(&body),
        vec!["Villa ID is Invalid!".to_string()]
    );

    // The orphaned number still lists, just without a parent attached.
    let response = app
        .server
        .get("/api/v1/VillaNumberAPI/701")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["result"]["villa"].is_null());
}

#[tokio::test]
async fn delete_removes_the_number() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let villa_id = app.create_villa(&token, "Delete Parent", 2).await;
    create_villa_number(&app, &token, 801, villa_id).await;

    let response = app
        .server
        .delete("/api/v1/VillaNumberAPI/801")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 200);

    let response = app
        .server
        .get("/api/v1/VillaNumberAPI/801")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn get_string_is_public() {
    let app = TestApp::spawn().await;

    let response = app.server.get("/api/v2/VillaNumberAPI/GetString").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body, json!(["value1", "value2"]));
}
