//! Shared fixtures for API integration tests.

#![allow(dead_code)]

use std::time::Duration;

use jsonboard_api::ApiClient;
use jsonboard_api::retry::RetryConfig;
use serde_json::{Value, json};
use wiremock::MockServer;

/// Client pointed at `server` with near-zero backoff.
pub fn client_for(server: &MockServer, max_retries: u32) -> ApiClient {
    let retry = RetryConfig {
        max_retries,
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
        jitter_factor: 0.0,
    };
    ApiClient::new(&server.uri(), Duration::from_secs(5), retry).expect("client builds")
}

pub fn post_json(id: u64, user_id: u64) -> Value {
    json!({
        "id": id,
        "userId": user_id,
        "title": format!("post number {id} title"),
        "body": "lorem ipsum ".repeat(10),
    })
}

pub fn user_json(id: u64) -> Value {
    json!({
        "id": id,
        "name": "Leanne Graham",
        "username": "Bret",
        "email": "Sincere@april.biz",
    })
}
