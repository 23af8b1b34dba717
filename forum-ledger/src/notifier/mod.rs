//! The notification publisher seam and the side-channel result attached to
//! operations that trigger notifications.
//!
//! Publishing is fire-and-forget: delivery is not guaranteed and failure never
//! changes the outcome of the operation that triggered it. Instead of being
//! swallowed silently, the publish result is recorded in the operation's
//! receipt so callers and tests can observe it independently.
use crate::errors::PublishError;
use forum_shared::types::{notification_channel, NotificationEvent};
use tracing::{debug, warn};

/// Abstracts the push notification transport.
///
/// Implementations are injected into the ledger and content services; the
/// contract is a fire-and-forget publish of a named event to a channel.
#[async_trait::async_trait]
pub trait NotificationPublisher: Send + Sync {
    /// Publishes an event payload to a channel.
    ///
    /// # Arguments
    ///
    /// * `channel` - The recipient channel key (e.g. `user-{email}`).
    /// * `event` - The event name (e.g. `new-vote`).
    /// * `payload` - The JSON payload delivered with the event.
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), PublishError>;
}

/// Why a notification was not attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The operation removed a vote; removals never notify.
    RemovedVote,
    /// The recipient is the actor; self-directed events never notify.
    SelfDirected,
}

/// The side-channel result of an operation's notification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    /// The event was handed to the transport.
    Published,
    /// No publish was attempted.
    Skipped(SkipReason),
    /// The transport reported a failure; logged, never propagated.
    Failed,
}

/// Publishes `event` to `recipient_email`'s channel, best-effort.
///
/// Failures are logged at `warn` and reported as
/// [`NotificationStatus::Failed`]; they are never returned as errors.
pub(crate) async fn publish_best_effort(
    publisher: &dyn NotificationPublisher,
    recipient_email: &str,
    event: &NotificationEvent,
) -> NotificationStatus {
    let channel = notification_channel(recipient_email);
    let name = event.event_name();
    match publisher.publish(&channel, name, event.payload()).await {
        Ok(()) => {
            debug!(channel = %channel, event = name, "Notification published");
            NotificationStatus::Published
        }
        Err(e) => {
            warn!(channel = %channel, event = name, error = %e, "Failed to publish notification");
            NotificationStatus::Failed
        }
    }
}
