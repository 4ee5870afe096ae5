use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use crate::cli::ProviderKind;
use crate::config::Config;
use crate::errors::CaptionError;

pub mod gemini;
pub mod ollama;

#[async_trait]
pub trait Provider: Send + Sync {
    /// Sends one prompt and returns the generated text.
    async fn generate(&self, prompt: &str, debug: bool) -> Result<String>;

    fn name(&self) -> &'static str;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

pub fn make_provider(cfg: &Config) -> Result<DynProvider, CaptionError> {
    let client = http_client(cfg)?;
    match cfg.provider {
        ProviderKind::Gemini => Ok(Box::new(gemini::GeminiProvider::new(
            client,
            cfg.api_base.clone(),
            cfg.model.clone(),
            cfg.api_key()?,
        ))),
        ProviderKind::Ollama => Ok(Box::new(ollama::OllamaProvider::new(
            client,
            cfg.ollama_url.clone(),
            cfg.model.clone(),
        ))),
    }
}

// No timeout unless one is configured.
fn http_client(cfg: &Config) -> Result<Client, CaptionError> {
    let mut builder = Client::builder();
    if let Some(t) = cfg.timeout() {
        builder = builder.timeout(t);
    }
    builder.build().map_err(|e| CaptionError::Config(format!("http client: {e}")))
}

/// Trims a response body for error messages.
pub(crate) fn snippet(text: &str) -> String {
    const MAX: usize = 300;
    let t = text.trim();
    match t.char_indices().nth(MAX) {
        Some((i, _)) => format!("{}…", &t[..i]),
        None => t.to_string(),
    }
}
