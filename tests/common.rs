use std::str::FromStr;

use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use villa_api::core::config::AuthConfig;

#[allow(dead_code)]
pub const TEST_SECRET: &str = "test-secret-at-least-16-chars";

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub router: Router,
    pub pool: SqlitePool,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn spawn() -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();

        // A single pinned connection keeps the in-memory database alive for
        // the duration of the test.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .unwrap();

        sqlx::migrate!("./migrations").run(&pool).await.unwrap();

        let auth = AuthConfig {
            secret: TEST_SECRET.to_string(),
            token_expiry_minutes: 15,
        };
        let router = villa_api::build_router(pool.clone(), auth);
        let server = TestServer::new(router.clone()).unwrap();

        Self {
            server,
            router,
            pool,
        }
    }

    pub async fn register(&self, user_name: &str, password: &str, role: &str) {
        let response = self
            .server
            .post("/api/v1/Users/Register")
            .json(&json!({
                "userName": user_name,
                "name": user_name,
                "password": password,
                "role": role,
            }))
            .await;
        assert_eq!(response.status_code(), 200, "{}", response.text());
    }

    pub async fn login_token(&self, user_name: &str, password: &str) -> String {
        let response = self
            .server
            .post("/api/v1/Users/Login")
            .json(&json!({
                "userName": user_name,
                "password": password,
            }))
            .await;
        assert_eq!(response.status_code(), 200, "{}", response.text());

        let body: Value = response.json();
        body["result"]["token"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.register("test-admin", "password123", "admin").await;
        self.login_token("test-admin", "password123").await
    }

    pub async fn customer_token(&self) -> String {
        self.register("test-customer", "password123", "customer")
            .await;
        self.login_token("test-customer", "password123").await
    }

    /// Creates a villa through the API and returns its id.
    pub async fn create_villa(&self, token: &str, name: &str, occupancy: i64) -> i64 {
        let response = self
            .server
            .post("/api/v1/VillaAPI")
            .authorization_bearer(token)
            .json(&json!({
                "name": name,
                "details": "details",
                "rate": 100.0,
                "sqft": 500,
                "occupancy": occupancy,
                "imageUrl": "",
                "amenity": "",
            }))
            .await;
        assert_eq!(response.status_code(), 201, "{}", response.text());

        let body: Value = response.json();
        body["result"]["id"].as_i64().unwrap()
    }
}

/// Pulls the error messages out of a response envelope.
#[allow(dead_code)]
pub fn error_messages(body: &Value) -> Vec<String> {
    body["errorMessages"]
        .as_array()
        .map(|msgs| {
            msgs.iter()
                .filter_map(|m| m.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
