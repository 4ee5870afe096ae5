//! Developer diagnostics. Everything here goes to stderr and only runs with
//! `--debug`; nothing is written to disk.

use std::io::Write;
use uuid::Uuid;

use crate::caption::CaptionRecord;
use crate::config::Config;

pub fn print_config_debug(cfg: &Config) {
    match toml::to_string_pretty(cfg) {
        Ok(s) => eprintln!("debug[config]: effective configuration:\n{}", s),
        Err(e) => eprintln!("debug[config]: could not render configuration: {e}"),
    }
    std::io::stderr().flush().ok();
}

pub fn print_dispatch_debug(id: Uuid, provider: &str, prompt: &str) {
    eprintln!("debug[dispatch {id}]: provider: {provider}");
    eprintln!("debug[dispatch {id}]: prompt:\n{prompt}");
    std::io::stderr().flush().ok();
}

pub fn print_record_debug(record: &CaptionRecord) {
    match serde_json::to_string_pretty(record) {
        Ok(s) => eprintln!("debug[dispatch {}]: appended record:\n{}", record.id(), s),
        Err(e) => eprintln!("debug[dispatch {}]: appended record ({e})", record.id()),
    }
    std::io::stderr().flush().ok();
}

pub fn print_failure_debug(id: Uuid, err: &anyhow::Error) {
    eprintln!("debug[dispatch {id}]: generation failed: {err:#}");
    for (i, cause) in err.chain().skip(1).enumerate() {
        eprintln!("debug[dispatch {id}]:   cause {}: {}", i + 1, cause);
    }
    std::io::stderr().flush().ok();
}
