pub mod automation;
pub mod config;
pub mod error;
pub mod models;
pub mod relay;
pub mod routes;
pub mod state;
pub mod store;
pub mod submission;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::automation::ZapierWebhook;
use crate::config::Config;
use crate::relay::Relay;
use crate::state::{AppState, SharedState};
use crate::store::AirtableStore;

/// Wire the Airtable store and Zapier webhook onto one shared HTTP client.
pub fn build_relay(config: &Config) -> Result<Relay, reqwest::Error> {
    let client = reqwest::Client::builder()
        .timeout(config.upstream_timeout)
        .build()?;

    if config.zapier.subscribe.is_none() {
        tracing::info!("No subscribe webhook configured, subscribe writes to the data store only");
    }
    if config.zapier.unsubscribe.is_none() {
        tracing::info!("No unsubscribe webhook configured");
    }

    let store = AirtableStore::new(client.clone(), &config.airtable);
    let notifier = ZapierWebhook::new(client, &config.zapier);

    Ok(Relay::new(Arc::new(store), Arc::new(notifier)))
}

pub fn build_app(relay: Relay, config: &Config) -> Router {
    let state: SharedState = Arc::new(AppState { relay });

    Router::new()
        .merge(routes::relay_routes())
        .route("/health", axum::routing::get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(config.max_body_size))
                // Extractors otherwise cap bodies at axum's 2 MiB default
                .layer(DefaultBodyLimit::max(config.max_body_size))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                )),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
