use colored::Colorize;
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn code_span() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`([^`]+)`").expect("valid regex"))
}

fn strong() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*|__(.+?)__").expect("valid regex"))
}

fn emphasis() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*([^*\s](?:[^*]*[^*\s])?)\*|\b_([^_]+)_\b").expect("valid regex"))
}

fn numbered() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)[.)]\s+(.*)$").expect("valid regex"))
}

/// Renders the small markdown subset captions come back in: headings,
/// bold/italic, bullet and numbered lists, quotes, rules and code.
pub fn render(text: &str) -> String {
    let mut out = Vec::new();
    let mut in_fence = false;

    for line in text.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            out.push(format!("    {}", line.dimmed()));
            continue;
        }

        if let Some((level, title)) = heading(trimmed) {
            let title = inline(title);
            out.push(if level == 1 {
                title.bold().underline().to_string()
            } else {
                title.bold().to_string()
            });
        } else if let Some(item) = ["- ", "* ", "+ "].iter().find_map(|m| trimmed.strip_prefix(m)) {
            out.push(format!("  • {}", inline(item)));
        } else if let Some(c) = numbered().captures(trimmed) {
            out.push(format!("  {}. {}", &c[1], inline(&c[2])));
        } else if let Some(quote) = trimmed.strip_prefix('>') {
            out.push(format!("{} {}", "│".dimmed(), inline(quote.trim_start()).italic()));
        } else if is_rule(trimmed) {
            out.push("─".repeat(40).dimmed().to_string());
        } else {
            out.push(inline(line));
        }
    }

    out.join("\n")
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    // "#tag" is a hashtag, not a heading
    line[level..].strip_prefix(' ').map(|rest| (level, rest.trim()))
}

fn is_rule(line: &str) -> bool {
    let t = line.trim();
    t.len() >= 3
        && (t.chars().all(|c| c == '-') || t.chars().all(|c| c == '*') || t.chars().all(|c| c == '_'))
}

fn inline(text: &str) -> String {
    let mut out = String::new();
    let mut last = 0;
    for m in code_span().captures_iter(text) {
        let whole = m.get(0).map_or(0..0, |g| g.range());
        out.push_str(&emphasize(&text[last..whole.start]));
        out.push_str(&m[1].cyan().to_string());
        last = whole.end;
    }
    out.push_str(&emphasize(&text[last..]));
    out
}

fn emphasize(text: &str) -> String {
    let bolded = strong().replace_all(text, |c: &Captures| {
        let inner = c.get(1).or_else(|| c.get(2)).map_or("", |m| m.as_str());
        inner.bold().to_string()
    });
    emphasis()
        .replace_all(&bolded, |c: &Captures| {
            let inner = c.get(1).or_else(|| c.get(2)).map_or("", |m| m.as_str());
            inner.italic().to_string()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> String {
        colored::control::set_override(false);
        render(text)
    }

    #[test]
    fn strips_markup_from_headings_and_emphasis() {
        assert_eq!(plain("# Big News\n**Bold** and *italic* and _under_"), "Big News\nBold and italic and under");
    }

    #[test]
    fn lists_get_bullets_and_numbers() {
        assert_eq!(plain("- one\n* two\n1. three\n2) four"), "  • one\n  • two\n  1. three\n  2. four");
    }

    #[test]
    fn hashtags_are_left_alone() {
        assert_eq!(plain("#Graduation #ProudMoment"), "#Graduation #ProudMoment");
    }

    #[test]
    fn code_spans_keep_their_asterisks() {
        assert_eq!(plain("run `a*b*c` now"), "run a*b*c now");
    }

    #[test]
    fn snake_case_words_are_not_italicized() {
        assert_eq!(plain("see my_file_name here"), "see my_file_name here");
    }

    #[test]
    fn quotes_rules_and_fences() {
        let out = plain("> wise words\n---\n```\nraw *text*\n```");
        assert_eq!(out, format!("│ wise words\n{}\n    raw *text*", "─".repeat(40)));
    }

    #[test]
    fn plain_text_passes_through() {
        let caption = "Finally done!\n\nOn to the next adventure.";
        assert_eq!(plain(caption), caption);
    }
}
