use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::RecordRef;
use crate::state::SharedState;

const UNSUBSCRIBE_REDIRECT: &str = "/?msg=unsubscribe";

#[derive(Deserialize)]
pub struct UnsubscribeParams {
    id: Option<String>,
}

pub async fn unsubscribe(
    State(state): State<SharedState>,
    Query(params): Query<UnsubscribeParams>,
) -> Result<Response, AppError> {
    let record = params
        .id
        .as_deref()
        .and_then(RecordRef::parse)
        .ok_or_else(|| AppError::BadRequest("Missing record id".to_string()))?;

    state.relay.unsubscribe(&record).await?;

    // 302 rather than axum's Redirect::to, which answers 303
    Ok((StatusCode::FOUND, [(header::LOCATION, UNSUBSCRIBE_REDIRECT)]).into_response())
}
