use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{RecordStore, StoreError};
use crate::config::AirtableConfig;
use crate::models::{Record, RecordRef, Submission};

const BODY_EXCERPT_CHARS: usize = 512;

/// Airtable REST table addressed by `endpoint`, authenticated with a bearer token.
pub struct AirtableStore {
    client: Client,
    endpoint: Url,
    api_key: SecretString,
}

#[derive(Serialize)]
struct CreateRequest<'a> {
    records: [NewRecord<'a>; 1],
}

#[derive(Serialize)]
struct NewRecord<'a> {
    fields: &'a Submission,
}

#[derive(Deserialize)]
struct CreateResponse {
    records: Vec<CreatedRecord>,
}

#[derive(Deserialize)]
struct CreatedRecord {
    id: String,
}

impl AirtableStore {
    pub fn new(client: Client, config: &AirtableConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn record_url(&self, record: &RecordRef) -> Result<Url, StoreError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Endpoint(self.endpoint.to_string()))?
            .pop_if_empty()
            .push(record.as_str());
        Ok(url)
    }
}

#[async_trait]
impl RecordStore for AirtableStore {
    async fn create(&self, submission: &Submission) -> Result<Option<String>, StoreError> {
        let body = CreateRequest {
            records: [NewRecord { fields: submission }],
        };

        let resp = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let bytes = success(resp).await?.bytes().await?;

        // The id is only used for logging; an unexpected body is still a stored record
        let id = serde_json::from_slice::<CreateResponse>(&bytes)
            .ok()
            .and_then(|created| created.records.into_iter().next())
            .map(|record| record.id);

        Ok(id)
    }

    async fn fetch(&self, record: &RecordRef) -> Result<Option<Record>, StoreError> {
        let resp = self
            .client
            .get(self.record_url(record)?)
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let bytes = success(resp).await?.bytes().await?;

        // Anything without a `fields` object is not a usable record
        Ok(serde_json::from_slice::<Record>(&bytes).ok())
    }

    async fn delete(&self, record: &RecordRef) -> Result<(), StoreError> {
        let resp = self
            .client
            .delete(self.record_url(record)?)
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await?;

        success(resp).await?;
        Ok(())
    }
}

/// Pass 2xx responses through, turn everything else into `StoreError::Status`.
async fn success(resp: Response) -> Result<Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp
        .text()
        .await
        .unwrap_or_default()
        .chars()
        .take(BODY_EXCERPT_CHARS)
        .collect::<String>();

    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}
