use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{snippet, Provider};

/// Google Generative Language API (`generateContent`) provider.
pub struct GeminiProvider {
    client: Client,
    api_base: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<PartIn<'a>>,
}

#[derive(Serialize)]
struct PartIn<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ContentOut>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ContentOut {
    #[serde(default)]
    parts: Vec<PartOut>,
}

#[derive(Deserialize)]
struct PartOut {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl GeminiProvider {
    pub fn new(client: Client, api_base: String, model: String, api_key: String) -> Self {
        Self { client, api_base, model, api_key }
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(&self, prompt: &str, debug: bool) -> Result<String> {
        let url = self.url();
        let body = GenerateRequest {
            contents: vec![Content { role: "user", parts: vec![PartIn { text: prompt }] }],
        };

        if debug {
            eprintln!(
                "debug[gemini]: POST {}\n{}",
                url,
                serde_json::to_string_pretty(&body)?
            );
        }

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("gemini request failed")?;

        let status = resp.status();
        let text = resp.text().await.context("gemini read body failed")?;

        if debug {
            eprintln!("debug[gemini]: raw status: {}", status);
            eprintln!("debug[gemini]: raw response:\n{}", text);
        }

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorEnvelope>(&text) {
                Ok(env) => anyhow!(
                    "Gemini API error ({}): {} {}",
                    status,
                    env.error.status,
                    env.error.message
                ),
                Err(_) => anyhow!("Gemini API error ({}): {}", status, snippet(&text)),
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("failed to parse Gemini response: {e}\nRaw: {}", snippet(&text)))?;

        extract_text(parsed)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

/// Joins the text parts of the first candidate.
fn extract_text(resp: GenerateResponse) -> Result<String> {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        match resp.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => bail!("prompt was blocked: {reason}"),
            None => bail!("Gemini returned no candidates"),
        }
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        bail!(
            "Gemini returned an empty candidate (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        );
    }
    Ok(text)
}
