use std::collections::HashMap;
use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use wiremock::MockServer;

use formrelay::config::Config;

pub const API_KEY: &str = "test-api-key";
pub const TABLE_PATH: &str = "/v0/appTest/Subscribers";
pub const SUBSCRIBE_HOOK_PATH: &str = "/hooks/catch/1/subscribe";
pub const UNSUBSCRIBE_HOOK_PATH: &str = "/hooks/catch/1/unsubscribe";
pub const MAX_BODY_SIZE: usize = 1024;

/// A running relay wired to mock data-store and webhook servers.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: MockServer,
    pub zapier: MockServer,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn record_path(&self, id: &str) -> String {
        format!("{TABLE_PATH}/{id}")
    }

    /// POST a JSON body to /subscribe, return (status, raw body).
    pub async fn subscribe_json(&self, data: &Value) -> (StatusCode, String) {
        let resp = self
            .client
            .post(self.url("/subscribe"))
            .json(data)
            .send()
            .await
            .expect("subscribe request failed");
        let status = resp.status();
        (status, resp.text().await.unwrap_or_default())
    }

    /// POST form-urlencoded data to /subscribe, return (status, raw body).
    pub async fn subscribe_form(&self, data: &[(&str, &str)]) -> (StatusCode, String) {
        let resp = self
            .client
            .post(self.url("/subscribe"))
            .form(data)
            .send()
            .await
            .expect("subscribe form request failed");
        let status = resp.status();
        (status, resp.text().await.unwrap_or_default())
    }

    /// GET /unsubscribe with the given query string. Redirects are not followed.
    pub async fn unsubscribe(&self, query: &str) -> reqwest::Response {
        self.client
            .get(self.url(&format!("/unsubscribe{query}")))
            .send()
            .await
            .expect("unsubscribe request failed")
    }
}

pub fn created_record(id: &str, fields: &Value) -> Value {
    json!({
        "records": [{ "id": id, "createdTime": "2024-01-01T00:00:00.000Z", "fields": fields }]
    })
}

pub fn stored_record(id: &str, fields: &Value) -> Value {
    json!({ "id": id, "createdTime": "2024-01-01T00:00:00.000Z", "fields": fields })
}

/// Spawn a relay with both webhooks configured.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(true, MAX_BODY_SIZE).await
}

/// Spawn a relay; without webhooks the relay writes to the data store only.
pub async fn spawn_app_with(webhooks: bool, max_body_size: usize) -> TestApp {
    let store = MockServer::start().await;
    let zapier = MockServer::start().await;

    let mut env: HashMap<&str, String> = HashMap::new();
    env.insert("AIRTABLE_API_KEY", API_KEY.to_string());
    env.insert("AIRTABLE_ENDPOINT", format!("{}{TABLE_PATH}", store.uri()));
    env.insert("RELAY_HOST", "127.0.0.1".to_string());
    env.insert("RELAY_PORT", "0".to_string());
    env.insert("RELAY_MAX_BODY_SIZE", max_body_size.to_string());
    env.insert("RELAY_UPSTREAM_TIMEOUT_SECS", "2".to_string());
    if webhooks {
        env.insert(
            "ZAPIER_ENDPOINT_SUBSCRIBE",
            format!("{}{SUBSCRIBE_HOOK_PATH}", zapier.uri()),
        );
        env.insert(
            "ZAPIER_ENDPOINT_UNSUBSCRIBE",
            format!("{}{UNSUBSCRIBE_HOOK_PATH}", zapier.uri()),
        );
    }

    let config = Config::from_lookup(|key| env.get(key).cloned()).expect("invalid test config");
    let relay = formrelay::build_relay(&config).expect("Failed to build relay");
    let app = formrelay::build_app(relay, &config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        store,
        zapier,
    }
}
