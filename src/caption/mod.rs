use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Instagram,
    Twitter,
    LinkedIn,
    Facebook,
    YouTube,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Instagram,
        Platform::Twitter,
        Platform::LinkedIn,
        Platform::Facebook,
        Platform::YouTube,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Twitter => "Twitter",
            Platform::LinkedIn => "LinkedIn",
            Platform::Facebook => "Facebook",
            Platform::YouTube => "YouTube",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Platform::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Style {
    Professional,
    Casual,
    Humorous,
    Inspirational,
}

impl Style {
    pub const ALL: [Style; 4] = [
        Style::Professional,
        Style::Casual,
        Style::Humorous,
        Style::Inspirational,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Style::Professional => "Professional",
            Style::Casual => "Casual",
            Style::Humorous => "Humorous",
            Style::Inspirational => "Inspirational",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Style::ALL
            .into_iter()
            .find(|st| st.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// One generated caption together with the inputs that produced it.
///
/// Fields are private so a record cannot change after it has been appended
/// to a session.
#[derive(Debug, Clone, Serialize)]
pub struct CaptionRecord {
    id: Uuid,
    platform: Platform,
    style: Style,
    topic: String,
    text: String,
    created_at: DateTime<Utc>,
}

impl CaptionRecord {
    pub fn new(id: Uuid, platform: Platform, style: Style, topic: String, text: String) -> Self {
        Self { id, platform, style, topic, text, created_at: Utc::now() }
    }

    pub fn id(&self) -> Uuid { self.id }
    pub fn platform(&self) -> Platform { self.platform }
    pub fn style(&self) -> Style { self.style }
    pub fn topic(&self) -> &str { &self.topic }
    pub fn text(&self) -> &str { &self.text }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_parses_display_names_case_insensitively() {
        assert_eq!("Twitter".parse::<Platform>(), Ok(Platform::Twitter));
        assert_eq!("linkedin".parse::<Platform>(), Ok(Platform::LinkedIn));
        assert_eq!(" YOUTUBE ".parse::<Platform>(), Ok(Platform::YouTube));
        assert!("myspace".parse::<Platform>().is_err());
        assert!("".parse::<Platform>().is_err());
    }

    #[test]
    fn style_parses_display_names_case_insensitively() {
        assert_eq!("humorous".parse::<Style>(), Ok(Style::Humorous));
        assert_eq!("Inspirational".parse::<Style>(), Ok(Style::Inspirational));
        assert!("sarcastic".parse::<Style>().is_err());
    }

    #[test]
    fn display_uses_capitalized_names() {
        let names: Vec<String> = Platform::ALL.iter().map(|p| p.to_string()).collect();
        assert_eq!(names, ["Instagram", "Twitter", "LinkedIn", "Facebook", "YouTube"]);
        assert_eq!(Style::Casual.to_string(), "Casual");
    }
}
