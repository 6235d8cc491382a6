//! Chat service client.
//!
//! The backend is an external collaborator reached through a single
//! operation: `POST /chat` with `{"message": ...}`, answered by
//! `{"reply": ...}` and an optional `intent` tag. Every way the exchange
//! can go wrong collapses to one user-visible outcome, [`UNREACHABLE_REPLY`].

use serde::{Deserialize, Serialize};

/// Fixed assistant text shown for any failed exchange, regardless of cause.
pub const UNREACHABLE_REPLY: &str =
    "Sorry, the server is unreachable. Make sure the backend is running.";

/// Request body for the chat exchange.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// The user's message text.
    pub message: String,
}

/// Reply body from the chat service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// The assistant's reply text.
    pub reply: String,
    /// Intent the backend matched the message to. Diagnostic only; never
    /// shown in the transcript.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
}

/// Client for the chat service.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    chat_url: String,
}

impl ChatClient {
    /// Create a client for the service at `endpoint` (scheme + authority,
    /// e.g. `http://127.0.0.1:5000`).
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(ClientError::Transport)?;
        Ok(Self {
            http,
            chat_url: format!("{}/chat", endpoint.trim_end_matches('/')),
        })
    }

    /// The resolved URL requests are posted to.
    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    /// Perform one chat exchange.
    ///
    /// One request, no retry, and no timeout beyond the transport default.
    /// Non-2xx statuses and undecodable bodies are errors; callers decide
    /// how to surface them (the TUI collapses all of them to
    /// [`UNREACHABLE_REPLY`]).
    pub async fn send(&self, message: &str) -> Result<ChatReply, ClientError> {
        tracing::debug!(url = %self.chat_url, "dispatching chat request");

        let request = ChatRequest {
            message: message.to_string(),
        };
        let response = self
            .http
            .post(&self.chat_url)
            .json(&request)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let reply: ChatReply = response
            .json()
            .await
            .map_err(ClientError::MalformedReply)?;

        if let Some(intent) = &reply.intent {
            tracing::debug!(%intent, "chat service matched intent");
        }
        Ok(reply)
    }
}

/// Errors from the chat exchange.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connection, DNS, or timeout failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("chat service returned HTTP {0}")]
    Status(u16),

    /// The body was not valid JSON or is missing the `reply` field.
    #[error("malformed reply body: {0}")]
    MalformedReply(#[source] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response, then close the connection.
    /// Returns the endpoint to point the client at.
    async fn canned_server(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();

            // Drain the request (head plus declared body) before answering,
            // so the client never sees a reset mid-write.
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
                    let content_length = head
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if buf.len() >= head_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
        });

        format!("http://{addr}")
    }

    #[test]
    fn test_chat_url_joins_without_double_slash() {
        let client = ChatClient::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(client.chat_url(), "http://127.0.0.1:5000/chat");
    }

    #[tokio::test]
    async fn test_send_success() {
        let endpoint =
            canned_server("200 OK", r#"{"reply":"Let me check that.","intent":"order_status"}"#)
                .await;
        let client = ChatClient::new(&endpoint).unwrap();

        let reply = client.send("Where is my order?").await.unwrap();
        assert_eq!(reply.reply, "Let me check that.");
        assert_eq!(reply.intent.as_deref(), Some("order_status"));
    }

    #[tokio::test]
    async fn test_send_success_without_intent() {
        let endpoint = canned_server("200 OK", r#"{"reply":"Hello!"}"#).await;
        let client = ChatClient::new(&endpoint).unwrap();

        let reply = client.send("hi").await.unwrap();
        assert_eq!(reply.reply, "Hello!");
        assert!(reply.intent.is_none());
    }

    #[tokio::test]
    async fn test_send_server_error_status() {
        let endpoint = canned_server("500 Internal Server Error", "{}").await;
        let client = ChatClient::new(&endpoint).unwrap();

        let err = client.send("hi").await.unwrap_err();
        assert!(matches!(err, ClientError::Status(500)));
    }

    #[tokio::test]
    async fn test_send_malformed_body() {
        let endpoint = canned_server("200 OK", "not json at all").await;
        let client = ChatClient::new(&endpoint).unwrap();

        let err = client.send("hi").await.unwrap_err();
        assert!(matches!(err, ClientError::MalformedReply(_)));
    }

    #[tokio::test]
    async fn test_send_body_missing_reply_field() {
        let endpoint = canned_server("200 OK", r#"{"intent":"fallback"}"#).await;
        let client = ChatClient::new(&endpoint).unwrap();

        let err = client.send("hi").await.unwrap_err();
        assert!(matches!(err, ClientError::MalformedReply(_)));
    }

    #[tokio::test]
    async fn test_send_connection_refused() {
        // Grab a free port, then release it so nothing is listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ChatClient::new(&format!("http://{addr}")).unwrap();
        let err = client.send("hi").await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
