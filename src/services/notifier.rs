//! Notification delivery interface.

use crate::error::PipelineError;

/// Delivers a formatted signal message to an external channel.
///
/// Implementations never retry: a late or duplicate trading alert is worse
/// than a dropped one. Failures resolve to
/// `PipelineError::NotificationFailure` and the caller logs and moves on.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), PipelineError>;
}
