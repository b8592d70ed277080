//! Shared error types for notification delivery.

/// Errors that can occur while building or delivering a notification.
///
/// These never cross the public send boundary: [`crate::DiscordNotifier`]
/// absorbs them into a boolean result and logs the detail.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Webhook returned {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}
