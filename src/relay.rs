use std::sync::Arc;

use crate::automation::{AutomationEvent, Delivery, Notifier, NotifyError};
use crate::models::{Record, RecordRef, Submission};
use crate::store::{RecordStore, StoreError};

#[derive(Debug)]
pub enum RelayError {
    NotFound(RecordRef),
    Store(StoreError),
}

impl std::fmt::Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayError::NotFound(record) => write!(f, "Record {record} not found"),
            RelayError::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RelayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RelayError::Store(err) => Some(err),
            RelayError::NotFound(_) => None,
        }
    }
}

impl From<StoreError> for RelayError {
    fn from(err: StoreError) -> Self {
        RelayError::Store(err)
    }
}

/// Forwards subscribe/unsubscribe requests to the data store and the automation webhook.
///
/// The data store is the source of truth: its failures are returned. The
/// webhook is a side notification: its failures are logged and swallowed.
#[derive(Clone)]
pub struct Relay {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
}

impl Relay {
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Store the submission and notify the webhook, concurrently.
    ///
    /// Not idempotent: every call creates a new record.
    pub async fn subscribe(&self, submission: &Submission) -> Result<(), RelayError> {
        let (created, notified) = tokio::join!(
            self.store.create(submission),
            self.notifier.notify(AutomationEvent::Subscribe, submission),
        );

        log_delivery(notified);

        let id = created.inspect_err(|e| tracing::error!("Subscribe failed: {e}"))?;
        tracing::info!("Subscribed record {}", id.as_deref().unwrap_or("(no id)"));
        Ok(())
    }

    /// Fetch the record, then delete it and forward its fields, concurrently.
    pub async fn unsubscribe(&self, record: &RecordRef) -> Result<(), RelayError> {
        let fetched = self
            .store
            .fetch(record)
            .await
            .inspect_err(|e| tracing::error!("Unsubscribe fetch of {record} failed: {e}"))?;

        let Some(Record { fields, .. }) = fetched else {
            tracing::info!("Unsubscribe for unknown record {record}");
            return Err(RelayError::NotFound(record.clone()));
        };

        let (deleted, notified) = tokio::join!(
            self.store.delete(record),
            self.notifier.notify(AutomationEvent::Unsubscribe, &fields),
        );

        log_delivery(notified);

        deleted.inspect_err(|e| tracing::error!("Unsubscribe delete of {record} failed: {e}"))?;
        tracing::info!("Unsubscribed record {record}");
        Ok(())
    }
}

fn log_delivery(result: Result<Delivery, NotifyError>) {
    match result {
        Ok(Delivery::Sent) => tracing::debug!("Webhook delivered"),
        Ok(Delivery::Skipped) => {}
        Err(e) => tracing::warn!("{e}"),
    }
}
