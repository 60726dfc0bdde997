// src/client.rs
//
// Thin client used by the terminal view to talk to the relay. No state,
// no retries: one POST per send, errors surface to the caller which maps
// them to the fixed placeholder message.

use crate::constants::CHAT_ROUTE;
use crate::errors::{FynoraqError, FynoraqResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequestBody<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatReplyBody {
    reply: String,
}

#[derive(Debug, Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RelayClient {
    pub fn new(relay_url: &str) -> Self {
        RelayClient {
            http: reqwest::Client::new(),
            endpoint: format!("{}{}", relay_url.trim_end_matches('/'), CHAT_ROUTE),
        }
    }

    /// Posts `{ "message": ... }` and returns the relay's reply text.
    pub async fn send(&self, message: &str) -> FynoraqResult<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&ChatRequestBody { message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FynoraqError::relay_error(format!(
                "relay returned {}",
                status
            )));
        }

        let body: ChatReplyBody = response.json().await?;
        Ok(body.reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_returns_reply_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({"message": "Hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "Hi there!"})))
            .mount(&server)
            .await;

        let client = RelayClient::new(&server.uri());
        assert_eq!(client.send("Hello").await.unwrap(), "Hi there!");
    }

    #[tokio::test]
    async fn test_send_maps_500_to_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({"error": "Failed to fetch from Gemini"})),
            )
            .mount(&server)
            .await;

        let client = RelayClient::new(&server.uri());
        assert!(client.send("Hello").await.is_err());
    }

    #[tokio::test]
    async fn test_send_maps_refused_connection_to_error() {
        let client = RelayClient::new("http://127.0.0.1:9");
        assert!(client.send("Hello").await.is_err());
    }
}
