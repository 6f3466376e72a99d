use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};

use crate::error::AppError;
use crate::state::SharedState;
use crate::submission;

/// Store the posted form and notify automation. Always an empty 200 on success.
pub async fn subscribe(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let fields = submission::parse(&headers, body).await?;
    tracing::debug!("Subscribe with {} field(s)", fields.len());

    state.relay.subscribe(&fields).await?;
    Ok(StatusCode::OK)
}
