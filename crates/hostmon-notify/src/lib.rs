//! Alert delivery.
//!
//! Alert events go out through a [`NotificationChannel`]. The built-in
//! channel posts Markdown messages to a Telegram bot chat. Delivery is
//! attempted once; failures are returned to the caller, never retried.

pub mod channels;
pub mod error;
pub mod utils;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use hostmon_common::types::AlertEvent;

pub use error::{NotifyError, Result};

/// A notification delivery channel that sends alert events to an external
/// service.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Delivers the alert event through this channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    async fn send(&self, alert: &AlertEvent) -> Result<()>;

    /// Returns the channel type name (e.g., `"telegram"`).
    fn channel_name(&self) -> &str;
}
