mod subscribe;
mod unsubscribe;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn relay_routes() -> Router<SharedState> {
    Router::new()
        .route("/subscribe", post(subscribe::subscribe))
        .route("/unsubscribe", get(unsubscribe::unsubscribe))
        // Legacy paths
        .route("/api/subscribe", post(subscribe::subscribe))
        .route("/api/unsubscribe", get(unsubscribe::unsubscribe))
}
