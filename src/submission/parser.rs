use axum::http::HeaderMap;
use serde_json::{Map, Value};

use crate::models::Submission;

#[derive(Debug)]
pub struct ParseError(pub String);

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseError {}

/// Parse a subscribe body into a field mapping based on its Content-Type.
pub async fn parse(headers: &HeaderMap, body: bytes::Bytes) -> Result<Submission, ParseError> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok());

    match content_type {
        Some(ct) if ct.contains("multipart/form-data") => parse_multipart(ct, body).await,
        Some(ct) if ct.contains("application/json") => parse_json(&body),
        Some(ct) if ct.contains("application/x-www-form-urlencoded") => parse_form_urlencoded(&body),
        // Try JSON first, then form-urlencoded
        _ => match serde_json::from_slice::<Value>(&body) {
            Ok(value) => into_fields(value),
            Err(_) => parse_form_urlencoded(&body),
        },
    }
}

fn parse_json(body: &[u8]) -> Result<Submission, ParseError> {
    let value = serde_json::from_slice(body).map_err(|e| ParseError(format!("Invalid JSON: {e}")))?;
    into_fields(value)
}

fn into_fields(value: Value) -> Result<Submission, ParseError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ParseError("Body must be a JSON object".to_string())),
    }
}

fn parse_form_urlencoded(body: &[u8]) -> Result<Submission, ParseError> {
    let body_str =
        std::str::from_utf8(body).map_err(|e| ParseError(format!("Invalid UTF-8: {e}")))?;

    let mut map = Map::new();
    for (k, v) in form_urlencoded::parse(body_str.as_bytes()) {
        map.insert(k.into_owned(), Value::String(v.into_owned()));
    }

    if map.is_empty() {
        return Err(ParseError("Body contains no form fields".to_string()));
    }
    Ok(map)
}

async fn parse_multipart(content_type: &str, body: bytes::Bytes) -> Result<Submission, ParseError> {
    let boundary = multer::parse_boundary(content_type)
        .map_err(|_| ParseError("Missing multipart boundary".to_string()))?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut map = Map::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ParseError(format!("Multipart error: {e}")))?
    {
        // Only text parts are fields; uploaded files are dropped
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| ParseError(format!("Field read error: {e}")))?;
        map.insert(name, Value::String(value));
    }

    if map.is_empty() {
        return Err(ParseError("Body contains no form fields".to_string()));
    }
    Ok(map)
}
