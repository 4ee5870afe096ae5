use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{snippet, Provider};

pub struct OllamaProvider {
    client: Client,
    url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: MsgOut,
}

#[derive(Deserialize)]
struct MsgOut {
    #[serde(default)]
    content: String,
}

impl OllamaProvider {
    pub fn new(client: Client, url: String, model: String) -> Self {
        Self { client, url, model }
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    async fn generate(&self, prompt: &str, debug: bool) -> Result<String> {
        let url = format!("{}/api/chat", self.url.trim_end_matches('/'));
        let body = ChatRequest {
            model: &self.model,
            messages: vec![Msg { role: "user", content: prompt }],
            stream: false,
        };

        if debug {
            eprintln!(
                "debug[ollama]: POST {}\n{}",
                url,
                serde_json::to_string_pretty(&body)?
            );
        }

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("ollama request failed")?;

        let status = resp.status();
        let text = resp.text().await.context("ollama read body failed")?;

        if debug {
            eprintln!("debug[ollama]: raw body:\n{}\n", text);
        }

        if !status.is_success() {
            bail!("Ollama error ({}): {}", status, snippet(&text));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("ollama response parse error: {}", e))?;

        if parsed.message.content.trim().is_empty() {
            bail!("ollama: empty content");
        }
        Ok(parsed.message.content)
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn posts_single_user_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({
                "model": "llama3",
                "messages": [{ "role": "user", "content": "hi" }],
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": { "role": "assistant", "content": "Hello there" },
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let p = OllamaProvider::new(Client::new(), server.uri(), "llama3".into());
        assert_eq!(p.generate("hi", false).await.unwrap(), "Hello there");
    }

    #[tokio::test]
    async fn debug_tracing_does_not_change_the_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({
                "model": "llama3",
                "messages": [{ "role": "user", "content": "traced" }],
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": { "role": "assistant", "content": "ok" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let p = OllamaProvider::new(Client::new(), server.uri(), "llama3".into());
        assert_eq!(p.generate("traced", true).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn empty_reply_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": { "role": "assistant", "content": "  " }
            })))
            .mount(&server)
            .await;

        let p = OllamaProvider::new(Client::new(), server.uri(), "llama3".into());
        assert!(p.generate("hi", false).await.is_err());
    }
}
