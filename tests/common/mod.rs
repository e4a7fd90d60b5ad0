#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use assetdesk::config::{Config, SecurityConfig};
use assetdesk::constants::seed::{DEFAULT_API_KEY, STAFF_ROLE_ID};
use assetdesk::db::Store;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const ADMIN_KEY: &str = DEFAULT_API_KEY;

pub struct TestApp {
    pub router: Router,
    pub store: Store,
}

/// Full router over a fresh sqlite file.
pub async fn spawn_app(name: &str) -> TestApp {
    let db_path = std::env::temp_dir().join(format!("assetdesk-{name}-test-{}.db", Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.server.secure_cookies = false;
    config.observability.metrics_enabled = false;
    config.security = SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    };

    let state = assetdesk::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let store = state.store().clone();

    TestApp {
        router: assetdesk::api::router(state).await,
        store,
    }
}

impl TestApp {
    /// Sends a request authenticated with `api_key` and decodes the JSON envelope.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        api_key: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(key) = api_key {
            builder = builder.header("X-Api-Key", key);
        }

        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, body)
    }

    pub async fn get(&self, uri: &str, api_key: &str) -> (StatusCode, Value) {
        self.send("GET", uri, Some(api_key), None).await
    }

    pub async fn post(&self, uri: &str, api_key: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(api_key), Some(body)).await
    }

    /// Registers a staff member through the API and returns their username.
    pub async fn register_staff(&self, first_name: &str, last_name: &str) -> String {
        let (status, body) = self
            .post(
                "/api/users",
                ADMIN_KEY,
                json!({
                    "firstName": first_name,
                    "lastName": last_name,
                    "dateOfBirth": "1995-04-07",
                    "dateJoined": "2024-06-17",
                    "gender": "Male",
                    "roleId": STAFF_ROLE_ID,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "registration failed: {body}");
        body["data"]["username"].as_str().unwrap().to_string()
    }

    /// API key of an existing user, read straight from the store.
    pub async fn api_key_of(&self, username: &str) -> String {
        self.store
            .get_user_by_username(username)
            .await
            .unwrap()
            .expect("user exists")
            .api_key
    }
}

pub fn data_field<'a>(body: &'a Value, field: &str) -> Vec<&'a str> {
    body["data"]
        .as_array()
        .expect("data is an array")
        .iter()
        .map(|item| item[field].as_str().unwrap_or_default())
        .collect()
}
