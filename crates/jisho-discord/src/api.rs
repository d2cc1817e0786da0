//! Discord REST client for the primitives the bot needs: posting,
//! editing and reacting to messages, plus resolving its own identity.

use jisho_core::{DisplayError, MessageDisplay};
use jisho_types::{ChannelId, MessageRef, UserId};
use reqwest::{Client, Method, Response, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::events::User;

#[derive(Debug, Clone, Deserialize)]
struct CreatedMessage {
    id: String,
    channel_id: String,
}

#[derive(Clone)]
pub struct DiscordApiClient {
    http: Client,
    token: String,
    base_url: String,
}

impl DiscordApiClient {
    pub fn new(token: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            token,
            base_url,
        }
    }

    /// Resolve the bot's own account
    pub async fn current_user(&self) -> Result<(UserId, String), DisplayError> {
        let resp = self.send(Method::GET, &["users", "@me"], None).await?;
        let user: User = resp
            .json()
            .await
            .map_err(|e| DisplayError::Decode(e.to_string()))?;

        Ok((user.id.into(), user.username))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, DisplayError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| DisplayError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| DisplayError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            // Percent-encodes each segment, emoji included
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<serde_json::Value>,
    ) -> Result<Response, DisplayError> {
        let url = self.endpoint(segments)?;

        let mut request = self
            .http
            .request(method, url)
            .header("Authorization", format!("Bot {}", self.token));
        if let Some(body) = body {
            request = request.json(&body);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| DisplayError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let reset_after = resp
                .headers()
                .get("x-ratelimit-reset-after")
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            warn!(reset_after = ?reset_after, "Discord rate limit reached");
        }

        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".into());
        Err(DisplayError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait::async_trait]
impl MessageDisplay for DiscordApiClient {
    async fn create_message(
        &self,
        channel_id: &ChannelId,
        content: &str,
    ) -> Result<MessageRef, DisplayError> {
        debug!(channel_id = %channel_id, "creating message");

        let resp = self
            .send(
                Method::POST,
                &["channels", channel_id.as_str(), "messages"],
                Some(serde_json::json!({ "content": content })),
            )
            .await?;

        let created: CreatedMessage = resp
            .json()
            .await
            .map_err(|e| DisplayError::Decode(e.to_string()))?;

        Ok(MessageRef::new(created.channel_id, created.id))
    }

    async fn edit_message(&self, message: &MessageRef, content: &str) -> Result<(), DisplayError> {
        debug!(
            channel_id = %message.channel_id,
            message_id = %message.message_id,
            "editing message"
        );

        self.send(
            Method::PATCH,
            &[
                "channels",
                message.channel_id.as_str(),
                "messages",
                message.message_id.as_str(),
            ],
            Some(serde_json::json!({ "content": content })),
        )
        .await?;

        Ok(())
    }

    async fn add_reaction(&self, message: &MessageRef, emoji: &str) -> Result<(), DisplayError> {
        debug!(message_id = %message.message_id, emoji = %emoji, "adding reaction");

        self.send(
            Method::PUT,
            &[
                "channels",
                message.channel_id.as_str(),
                "messages",
                message.message_id.as_str(),
                "reactions",
                emoji,
                "@me",
            ],
            None,
        )
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> DiscordApiClient {
        DiscordApiClient::new("secret".into(), format!("{}/api/v10", server.uri()))
    }

    #[test]
    fn endpoint_encodes_emoji_segment() {
        let client = DiscordApiClient::new("t".into(), "https://discord.com/api/v10/".into());
        let url = client
            .endpoint(&["channels", "1", "messages", "2", "reactions", "\u{27A1}", "@me"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://discord.com/api/v10/channels/1/messages/2/reactions/%E2%9E%A1/@me"
        );
    }

    #[tokio::test]
    async fn create_message_returns_address() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v10/channels/42/messages"))
            .and(header("Authorization", "Bot secret"))
            .and(body_json(serde_json::json!({"content": "hello"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": "7", "channel_id": "42", "content": "hello"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let message = client(&server)
            .create_message(&ChannelId::from("42"), "hello")
            .await
            .unwrap();
        assert_eq!(message, MessageRef::new("42", "7"));
    }

    #[tokio::test]
    async fn edit_message_patches_content() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/v10/channels/42/messages/7"))
            .and(body_json(serde_json::json!({"content": "page 2"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .edit_message(&MessageRef::new("42", "7"), "page 2")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rejected_edit_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Missing Permissions"))
            .mount(&server)
            .await;

        let err = client(&server)
            .edit_message(&MessageRef::new("42", "7"), "page 2")
            .await
            .unwrap_err();
        assert!(matches!(err, DisplayError::Rejected { status: 403, .. }));
    }

    #[tokio::test]
    async fn current_user_resolves_identity() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v10/users/@me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"id": "99", "username": "jisho", "bot": true}),
            ))
            .mount(&server)
            .await;

        let (id, name) = client(&server).current_user().await.unwrap();
        assert_eq!(id, UserId::from("99"));
        assert_eq!(name, "jisho");
    }

    #[tokio::test]
    async fn add_reaction_puts_to_own_reaction() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v10/channels/42/messages/7/reactions/%E2%AC%85/@me"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .add_reaction(&MessageRef::new("42", "7"), "\u{2B05}")
            .await
            .unwrap();
    }
}
