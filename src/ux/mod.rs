use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::Mutex;
use std::time::Duration;

use crate::caption::{CaptionRecord, Platform, Style};
use crate::dispatch::BusyIndicator;
use crate::errors::CaptionError;
use crate::form::CaptionForm;

pub mod markdown;

pub const IDLE_LABEL: &str = "✨ Inspire Me";
pub const BUSY_LABEL: &str = "Generating...";
pub const GENERIC_FAILURE: &str = "Something went wrong!";

pub fn button_label(busy: bool) -> &'static str {
    if busy { BUSY_LABEL } else { IDLE_LABEL }
}

pub fn show_banner() {
    println!("\n{}", "┏━━━━━━━━━━━━━━━━━━ Caption Generator ━━━━━━━━━━━━━━━━━━┓".bold());
    println!("  Pick a platform, describe the post, choose a writing style.");
    println!("{}\n", "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold());
}

/// User-facing text for an error. Generation failures stay generic.
pub fn notice_text(err: &CaptionError, debug: bool) -> String {
    match err {
        CaptionError::Validation { .. } => {
            let mut s = err.to_string();
            if let Some(first) = s.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            s
        }
        CaptionError::Generation(_) if debug => GENERIC_FAILURE.to_string(),
        CaptionError::Generation(_) => format!("{GENERIC_FAILURE} (run with --debug for details)"),
        CaptionError::UnknownChoice { .. } | CaptionError::Config(_) => err.to_string(),
    }
}

pub fn notice(err: &CaptionError, debug: bool) {
    eprintln!("{} {}", "⚠".yellow().bold(), notice_text(err, debug).yellow().bold());
}

/// Busy-flag display: an indicatif spinner, or a plain line when progress is off.
pub struct Spinner {
    enabled: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl Spinner {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: Mutex::new(None) }
    }
}

impl BusyIndicator for Spinner {
    fn busy_changed(&self, busy: bool) {
        let Ok(mut slot) = self.bar.lock() else { return };
        if !busy {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
            return;
        }
        if !self.enabled {
            eprintln!("{}", BUSY_LABEL.dimmed());
            return;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.magenta} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(BUSY_LABEL);
        pb.enable_steady_tick(Duration::from_millis(100));
        *slot = Some(pb);
    }
}

/// One caption as a card: badges, topic line, rendered text.
pub fn caption_card(index: usize, rec: &CaptionRecord) -> String {
    let header = format!(
        "#{}  {}  {}  {}",
        index + 1,
        format!("[{}]", rec.platform()).blue().bold(),
        format!("[{}]", rec.style()).green().bold(),
        rec.created_at().format("%H:%M:%S UTC").to_string().dimmed(),
    );
    let topic = format!("Topic: {}", rec.topic()).dimmed();
    format!("{}\n{}\n{}", header, topic, markdown::render(rec.text()))
}

pub fn print_captions(captions: &[CaptionRecord]) {
    if captions.is_empty() {
        return;
    }
    println!("\n{}", "━━━━━━━━━━━━━━━━━━━━━━━━━ Captions ━━━━━━━━━━━━━━━━━━━━━━━━━".bold());
    for (i, c) in captions.iter().enumerate() {
        println!("{}\n", caption_card(i, c));
    }
}

pub fn show_form(form: &CaptionForm) {
    let unset = || "-- Select --".dimmed().to_string();
    println!(
        "  Platform: {}   Style: {}   Topic: {}",
        form.platform().map_or_else(unset, |p| p.to_string().bold().to_string()),
        form.style().map_or_else(unset, |s| s.to_string().bold().to_string()),
        if form.topic().trim().is_empty() { unset() } else { form.topic().bold().to_string() },
    );
    println!("  [ {} ]", button_label(form.is_busy()).magenta().bold());
}

/// Walks the user through the three fields. Enter keeps the current value.
/// Returns `Ok(false)` when stdin is closed.
pub fn edit_form(form: &mut CaptionForm) -> io::Result<bool> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let Some(platform) = pick(&mut input, "Select a Platform..", &Platform::ALL, form.platform())? else {
        return Ok(false);
    };
    form.set_platform(platform);

    let Some(topic) = ask(&mut input, "Tell us the Topic/Details of the Post ..", form.topic())? else {
        return Ok(false);
    };
    form.set_topic(topic);

    let Some(style) = pick(&mut input, "Writing Style", &Style::ALL, form.style())? else {
        return Ok(false);
    };
    form.set_style(style);

    Ok(true)
}

fn read_answer(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let _ = io::stdout().flush();
    let mut s = String::new();
    if input.read_line(&mut s)? == 0 {
        return Ok(None);
    }
    Ok(Some(s.trim_end_matches(['\r', '\n']).to_string()))
}

fn pick<T>(input: &mut impl BufRead, label: &str, options: &[T], current: Option<T>) -> io::Result<Option<Option<T>>>
where
    T: Copy + Display + FromStr,
{
    println!("\n{}", label.bold());
    println!("  0. -- Select --");
    for (i, o) in options.iter().enumerate() {
        println!("  {}. {}", i + 1, o);
    }
    loop {
        match current {
            Some(c) => print!("choice [{}]: ", c),
            None => print!("choice: "),
        }
        let Some(answer) = read_answer(input)? else { return Ok(None) };
        match parse_pick(&answer, options, current) {
            Some(v) => return Ok(Some(v)),
            None => println!("{}", "not one of the listed options".red()),
        }
    }
}

/// Number, option name, `0` for unset, or blank to keep `current`.
fn parse_pick<T: Copy + FromStr>(answer: &str, options: &[T], current: Option<T>) -> Option<Option<T>> {
    let a = answer.trim();
    if a.is_empty() {
        return Some(current);
    }
    if let Ok(n) = a.parse::<usize>() {
        return match n {
            0 => Some(None),
            n => options.get(n - 1).map(|o| Some(*o)),
        };
    }
    a.parse::<T>().ok().map(Some)
}

fn ask(input: &mut impl BufRead, label: &str, current: &str) -> io::Result<Option<String>> {
    println!("\n{}", label.bold());
    if current.is_empty() {
        print!("{} ", "(e.g. Course Completion..)".dimmed());
    } else {
        print!("[{}]: ", current);
    }
    Ok(read_answer(input)?.map(|a| if a.trim().is_empty() { current.to_string() } else { a }))
}

pub fn confirm(prompt: &str) -> bool {
    print!("{} [y/N]: ", prompt);
    let _ = io::stdout().flush();
    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        let ans = s.trim().to_lowercase();
        ans == "y" || ans == "yes"
    } else {
        false
    }
}
