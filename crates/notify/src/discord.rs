//! Discord webhook delivery.
//!
//! One notifier per destination endpoint. Each send is a single HTTP POST
//! with no retries; every failure is absorbed at the send boundary and
//! surfaced only through the boolean result and tracing output.

use crate::error::NotifyError;
use crate::message::{Notification, SimplePayload, WebhookPayload};

/// Sends notifications to a single Discord webhook endpoint.
///
/// The endpoint is immutable after construction. The inner
/// [`reqwest::Client`] is shared across sends (connection pooling), so
/// cloning the notifier is cheap.
#[derive(Debug, Clone)]
pub struct DiscordNotifier {
    /// Target webhook URL.
    endpoint: String,
    client: reqwest::Client,
}

impl DiscordNotifier {
    /// Create a notifier for the given webhook URL.
    ///
    /// Returns [`NotifyError::Config`] when the endpoint is empty.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, NotifyError> {
        let endpoint = endpoint.into();
        if endpoint.is_empty() {
            return Err(NotifyError::Config(
                "webhook endpoint must not be empty".to_string(),
            ));
        }
        Ok(Self {
            endpoint,
            client: reqwest::Client::new(),
        })
    }

    /// Render `notification` and deliver it as a Discord embed.
    ///
    /// Returns `true` iff the webhook acknowledged with HTTP 204. Transport
    /// errors, non-204 statuses, and serialization failures are logged and
    /// absorbed; this never panics or propagates an error to the caller.
    pub async fn send_notification(&self, notification: &Notification) -> bool {
        let payload = WebhookPayload {
            embeds: vec![notification.render()],
        };
        let category = notification.category().as_str();
        match self.deliver(&payload).await {
            Ok(()) => {
                tracing::info!(category, "discord notification delivered");
                true
            }
            Err(e) => {
                tracing::warn!(category, error = %e, "discord notification failed");
                false
            }
        }
    }

    /// Deliver a plain-text message with no template applied.
    ///
    /// Same contract as [`send_notification`](Self::send_notification):
    /// boolean result, failures absorbed.
    pub async fn send_simple_message(&self, content: &str) -> bool {
        match self.deliver(&SimplePayload { content }).await {
            Ok(()) => {
                tracing::info!("discord message delivered");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "discord message failed");
                false
            }
        }
    }

    /// Serialize `payload` and POST it to the endpoint.
    ///
    /// Discord acknowledges webhook delivery with 204 No Content only; any
    /// other status is a rejection and the response body is captured for
    /// diagnostics.
    async fn deliver<T: serde::Serialize>(&self, payload: &T) -> Result<(), NotifyError> {
        let body = serde_json::to_string(payload)?;

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::NO_CONTENT {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(NotifyError::Rejected { status, body });
        }

        tracing::debug!(endpoint = %self.endpoint, "webhook acknowledged delivery");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Category;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one HTTP request with a canned response, returning the
    /// endpoint URL to POST to.
    async fn one_shot_server(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = Vec::with_capacity(4096);
            let mut chunk = [0u8; 1024];
            loop {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if request_complete(&buf) {
                    break;
                }
            }
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.flush().await.unwrap();
        });
        format!("http://{addr}/webhook")
    }

    /// True once `buf` holds the full request head plus Content-Length body.
    fn request_complete(buf: &[u8]) -> bool {
        let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let head = String::from_utf8_lossy(&buf[..head_end]);
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())?
            })
            .unwrap_or(0);
        buf.len() >= head_end + 4 + content_length
    }

    #[test]
    fn empty_endpoint_rejected() {
        let result = DiscordNotifier::new("");
        assert!(result.is_err());
        let err = result.err().unwrap().to_string();
        assert!(err.contains("must not be empty"));
    }

    #[tokio::test]
    async fn simple_message_succeeds_on_204() {
        let url = one_shot_server("HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n").await;
        let notifier = DiscordNotifier::new(url).unwrap();
        assert!(notifier.send_simple_message("hello").await);
    }

    #[tokio::test]
    async fn notification_succeeds_on_204() {
        let url = one_shot_server("HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n").await;
        let notifier = DiscordNotifier::new(url).unwrap();
        let notification = Notification::new(Category::TaskComplete)
            .project_name("demo")
            .details("all green")
            .metadata("duration", "2s");
        assert!(notifier.send_notification(&notification).await);
    }

    #[tokio::test]
    async fn non_204_status_is_failure() {
        // 200 OK is still a failure: 204 is the only success signal.
        let url = one_shot_server(
            "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
        )
        .await;
        let notifier = DiscordNotifier::new(url).unwrap();
        assert!(!notifier.send_simple_message("hello").await);
    }

    #[tokio::test]
    async fn rejection_with_body_is_failure() {
        let url = one_shot_server(
            "HTTP/1.1 400 Bad Request\r\nContent-Length: 19\r\nConnection: close\r\n\r\n{\"message\":\"nope\"}\n",
        )
        .await;
        let notifier = DiscordNotifier::new(url).unwrap();
        let notification = Notification::new(Category::Error);
        assert!(!notifier.send_notification(&notification).await);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_failure_not_panic() {
        // Bind then drop a listener so the port is very likely refused.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let notifier = DiscordNotifier::new(format!("http://{addr}/webhook")).unwrap();
        assert!(!notifier.send_simple_message("hello").await);
    }
}
