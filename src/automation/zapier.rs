use async_trait::async_trait;
use reqwest::{Client, Url};

use super::{AutomationEvent, Delivery, NotifyError, Notifier};
use crate::config::ZapierConfig;
use crate::models::Submission;

/// Posts the raw field mapping to a catch hook. The hooks are unauthenticated.
pub struct ZapierWebhook {
    client: Client,
    subscribe: Option<Url>,
    unsubscribe: Option<Url>,
}

impl ZapierWebhook {
    pub fn new(client: Client, config: &ZapierConfig) -> Self {
        Self {
            client,
            subscribe: config.subscribe.clone(),
            unsubscribe: config.unsubscribe.clone(),
        }
    }

    fn url_for(&self, event: AutomationEvent) -> Option<&Url> {
        match event {
            AutomationEvent::Subscribe => self.subscribe.as_ref(),
            AutomationEvent::Unsubscribe => self.unsubscribe.as_ref(),
        }
    }
}

#[async_trait]
impl Notifier for ZapierWebhook {
    async fn notify(
        &self,
        event: AutomationEvent,
        fields: &Submission,
    ) -> Result<Delivery, NotifyError> {
        let Some(url) = self.url_for(event) else {
            tracing::debug!("No {event} webhook configured, skipping");
            return Ok(Delivery::Skipped);
        };

        let resp = self
            .client
            .post(url.clone())
            .json(fields)
            .send()
            .await
            .map_err(|e| NotifyError {
                event,
                message: format!("request failed: {e}"),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(NotifyError {
                event,
                message: format!("returned {}", status.as_u16()),
            });
        }

        Ok(Delivery::Sent)
    }
}
