use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[value(alias = "google")]
    Gemini,
    Ollama,
}

#[derive(Parser, Debug)]
#[command(name = "caption_gen", version, about = "Generate social media captions with a generative-language model")]
pub struct Args {
    /// Instagram, Twitter, LinkedIn, Facebook or YouTube; with --style and --topic runs once and exits
    #[arg(long)]
    pub platform: Option<String>,

    /// Professional, Casual, Humorous or Inspirational
    #[arg(long)]
    pub style: Option<String>,

    /// Topic or details of the post, e.g. "Course Completion"
    #[arg(long)]
    pub topic: Option<String>,

    /// Number of captions to generate in one-shot mode
    #[arg(long, default_value_t = 1)]
    pub count: u32,

    #[arg(long, value_enum)]
    pub provider: Option<ProviderKind>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub api_base: Option<String>,

    #[arg(long)]
    pub config: Option<String>,

    /// Cosmetic pause before a new caption is shown
    #[arg(long)]
    pub delay_ms: Option<u64>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub progress: bool,
}

impl Args {
    /// All three form fields given; a partial set only pre-fills the
    /// interactive form.
    pub fn is_one_shot(&self) -> bool {
        self.platform.is_some() && self.style.is_some() && self.topic.is_some()
    }
}
