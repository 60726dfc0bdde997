use crate::constants::FALLBACK_REPLY;
use crate::errors::FynoraqResult;
use serde::{Deserialize, Serialize};

// Request payload for the generateContent endpoint:
// { "contents": [ { "parts": [ { "text": ... } ] } ] }

#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart {
    pub text: String,
}

impl GenerateRequest {
    pub fn from_message(message: &str) -> Self {
        GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: message.to_string(),
                }],
            }],
        }
    }
}

// Response shape. Every level is optional: upstream error bodies and safety
// blocks arrive as valid JSON without a candidates path, and those must
// degrade to the fallback reply instead of failing the request.

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

/// First candidate's first text part, if the response carries one.
/// An empty string counts as missing and degrades to the fallback.
pub fn extract_reply(response: &GenerateResponse) -> Option<String> {
    response
        .candidates
        .first()?
        .content
        .as_ref()?
        .parts
        .first()?
        .text
        .clone()
        .filter(|text| !text.is_empty())
}

/// Makes one generateContent call and returns the reply text.
///
/// Shape mismatches degrade to `FALLBACK_REPLY`; only transport and
/// JSON-parse failures surface as errors.
pub async fn generate_reply(
    client: &reqwest::Client,
    api_url: &str,
    api_key: &str,
    message: &str,
) -> FynoraqResult<String> {
    let payload = GenerateRequest::from_message(message);

    let response = client
        .post(api_url)
        .query(&[("key", api_key)])
        .json(&payload)
        .send()
        .await?;

    let body: GenerateResponse = response.json().await?;

    Ok(extract_reply(&body).unwrap_or_else(|| FALLBACK_REPLY.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gemini_body(text: &str) -> serde_json::Value {
        json!({
            "candidates": [
                { "content": { "parts": [ { "text": text } ] } }
            ]
        })
    }

    #[tokio::test]
    async fn test_generate_reply_extracts_first_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(query_param("key", "test-api-key"))
            .and(body_partial_json(json!({
                "contents": [ { "parts": [ { "text": "Hello" } ] } ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body("Hi there!")))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/generate", server.uri());
        let reply = generate_reply(&client, &url, "test-api-key", "Hello")
            .await
            .unwrap();
        assert_eq!(reply, "Hi there!");
    }

    #[tokio::test]
    async fn test_missing_candidates_degrades_to_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            })))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/generate", server.uri());
        let reply = generate_reply(&client, &url, "k", "Hello").await.unwrap();
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_error_status_with_json_body_degrades_to_fallback() {
        // Only the body shape matters, not the status code.
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": { "code": 429, "message": "quota" }
            })))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/generate", server.uri());
        let reply = generate_reply(&client, &url, "k", "Hello").await.unwrap();
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_empty_reply_text_degrades_to_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body("")))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/generate", server.uri());
        let reply = generate_reply(&client, &url, "k", "Hello").await.unwrap();
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_non_json_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/generate", server.uri());
        assert!(generate_reply(&client, &url, "k", "Hello").await.is_err());
    }
}
