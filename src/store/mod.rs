pub mod airtable;

use async_trait::async_trait;

use crate::models::{Record, RecordRef, Submission};

pub use airtable::AirtableStore;

#[derive(Debug)]
pub enum StoreError {
    /// The request never produced a response (connect, timeout, TLS).
    Transport(reqwest::Error),
    /// The store answered with a non-success status.
    Status { status: u16, body: String },
    /// The configured endpoint cannot address a record by id.
    Endpoint(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Transport(err) => write!(f, "Data store request failed: {err}"),
            StoreError::Status { status, body } => {
                write!(f, "Data store returned {status}: {body}")
            }
            StoreError::Endpoint(msg) => write!(f, "Invalid data store endpoint: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Transport(err)
    }
}

/// The system of record for submissions.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Any 2xx counts as stored. Returns the new record's id when the store reported one.
    async fn create(&self, submission: &Submission) -> Result<Option<String>, StoreError>;

    /// `Ok(None)` when the record does not exist or came back without a fields object.
    async fn fetch(&self, record: &RecordRef) -> Result<Option<Record>, StoreError>;

    async fn delete(&self, record: &RecordRef) -> Result<(), StoreError>;
}
