use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::cli::{Args, ProviderKind};
use crate::errors::CaptionError;

/// Picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "caption_gen.toml";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const FALLBACK_API_KEY_ENV: &str = "VITE_GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub provider: ProviderKind,
    pub model: String,
    pub api_base: String,
    pub api_key_env: String,
    pub ollama_url: String,
    pub reveal_delay_ms: u64,
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Gemini,
            model: DEFAULT_MODEL.into(),
            api_base: GEMINI_API_BASE.into(),
            api_key_env: "GEMINI_API_KEY".into(),
            ollama_url: "http://localhost:11434".into(),
            reveal_delay_ms: 1000,
            timeout_secs: None,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, CaptionError> {
        let raw = fs::read_to_string(path).map_err(|e| CaptionError::Config(e.to_string()))?;
        toml::from_str(&raw)
            .map_err(|e| CaptionError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Defaults, then the config file, then command-line overrides.
    pub fn load(args: &Args) -> Result<Self, CaptionError> {
        Self::load_in(args, Path::new("."))
    }

    /// Like `load`, with `dir` standing in for the working directory.
    pub fn load_in(args: &Args, dir: &Path) -> Result<Self, CaptionError> {
        let default_file = dir.join(DEFAULT_CONFIG_FILE);
        let mut cfg = match &args.config {
            Some(p) => Self::from_file(Path::new(p))?,
            None if default_file.is_file() => Self::from_file(&default_file)?,
            None => Self::default(),
        };
        cfg.apply_args(args);
        Ok(cfg)
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(p) = args.provider {
            self.provider = p;
        }
        if let Some(m) = &args.model {
            self.model = m.clone();
        }
        if let Some(b) = &args.api_base {
            self.api_base = b.clone();
        }
        if let Some(ms) = args.delay_ms {
            self.reveal_delay_ms = ms;
        }
        if let Some(t) = args.timeout_secs {
            self.timeout_secs = Some(t);
        }
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Reads the key from `api_key_env`, then from the Vite-style fallback.
    pub fn api_key(&self) -> Result<String, CaptionError> {
        self.api_key_with(|name| std::env::var(name).ok())
    }

    fn api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String, CaptionError> {
        [self.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .iter()
            .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()))
            .ok_or_else(|| {
                CaptionError::Config(format!(
                    "{} env var is not set (also checked {})",
                    self.api_key_env, FALLBACK_API_KEY_ENV
                ))
            })
    }
}
