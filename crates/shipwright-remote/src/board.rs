//! Client for the posting board.
//!
//! The board can report failure inside a 2xx response body, so the `error`
//! field is checked before anything else. Deployments disagree on whether
//! the post identifier comes back as `id` or `content_id`; both are
//! accepted.

use crate::error::RemoteError;
use crate::Result;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use shipwright_core::announce::{Announcement, Announcer, PostReceipt};
use shipwright_core::ShipwrightError;

const ENDPOINT: &str = "board";

pub struct BoardClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    channel: String,
}

impl BoardClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: SecretString,
        channel: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            http: crate::http_client()?,
            base_url: base_url.into(),
            api_key,
            channel: channel.into(),
        })
    }

    /// Submit one post; returns the post identifier.
    pub async fn create_post(&self, title: &str, content: &str) -> Result<String> {
        let url = format!("{}/api/posts/create", self.base_url.trim_end_matches('/'));
        let payload = CreatePostRequest {
            channel: &self.channel,
            title,
            content,
            verification_required: false,
        };

        tracing::debug!("posting announcement to channel {}", self.channel);
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                endpoint: ENDPOINT,
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = response.json().await?;
        if let Some(error) = body.get("error") {
            let message = error
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| error.to_string());
            return Err(RemoteError::Api {
                endpoint: ENDPOINT,
                message,
            });
        }

        post_id(&body).ok_or(RemoteError::Api {
            endpoint: ENDPOINT,
            message: "response missing post id".to_string(),
        })
    }
}

fn post_id(body: &serde_json::Value) -> Option<String> {
    let value = body.get("id").or_else(|| body.get("content_id"))?;
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl Announcer for BoardClient {
    async fn announce(&self, post: &Announcement) -> shipwright_core::Result<PostReceipt> {
        self.create_post(&post.title, &post.body)
            .await
            .map(|post_id| PostReceipt { post_id })
            .map_err(|e| ShipwrightError::Announce(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct CreatePostRequest<'a> {
    channel: &'a str,
    title: &'a str,
    content: &'a str,
    verification_required: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client(server: &mockito::Server) -> BoardClient {
        BoardClient::new(server.url(), SecretString::new("board-key".into()), "builds").unwrap()
    }

    #[tokio::test]
    async fn create_post_returns_string_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/posts/create")
            .match_header("authorization", "Bearer board-key")
            .match_body(Matcher::Json(serde_json::json!({
                "channel": "builds",
                "title": "[builds] Service: LedgerLite",
                "content": "body text",
                "verification_required": false,
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "post-77"}"#)
            .create_async()
            .await;

        let id = client(&server)
            .create_post("[builds] Service: LedgerLite", "body text")
            .await
            .unwrap();
        assert_eq!(id, "post-77");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn accepts_numeric_content_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/posts/create")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content_id": 4242}"#)
            .create_async()
            .await;

        let id = client(&server).create_post("t", "c").await.unwrap();
        assert_eq!(id, "4242");
    }

    #[tokio::test]
    async fn error_field_fails_even_on_http_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/posts/create")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "channel is read-only"}"#)
            .create_async()
            .await;

        let err = client(&server).create_post("t", "c").await.unwrap_err();
        match err {
            RemoteError::Api { message, .. } => assert_eq!(message, "channel is read-only"),
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_post_id_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/posts/create")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let err = client(&server).create_post("t", "c").await.unwrap_err();
        assert!(matches!(err, RemoteError::Api { .. }));
    }

    #[tokio::test]
    async fn announcer_port_maps_failures() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/posts/create")
            .with_status(500)
            .with_body("board down")
            .create_async()
            .await;

        let client = client(&server);
        let announcer: &dyn Announcer = &client;
        let err = announcer
            .announce(&Announcement {
                title: "t".into(),
                body: "b".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ShipwrightError::Announce(_)));
    }
}
