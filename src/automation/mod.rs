pub mod zapier;

use async_trait::async_trait;

use crate::models::Submission;

pub use zapier::ZapierWebhook;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomationEvent {
    Subscribe,
    Unsubscribe,
}

impl AutomationEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            AutomationEvent::Subscribe => "subscribe",
            AutomationEvent::Unsubscribe => "unsubscribe",
        }
    }
}

impl std::fmt::Display for AutomationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No webhook is configured for the event.
    Skipped,
}

#[derive(Debug)]
pub struct NotifyError {
    pub event: AutomationEvent,
    pub message: String,
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} webhook failed: {}", self.event, self.message)
    }
}

impl std::error::Error for NotifyError {}

/// Downstream workflow automation told about subscribe/unsubscribe events.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        event: AutomationEvent,
        fields: &Submission,
    ) -> Result<Delivery, NotifyError>;
}
