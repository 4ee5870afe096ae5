use std::fmt;

use crate::caption::{Platform, Style};
use crate::errors::CaptionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Platform,
    Style,
    Topic,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormField::Platform => "platform",
            FormField::Style => "style",
            FormField::Topic => "topic",
        })
    }
}

/// Current values of the caption form plus the advisory busy flag.
#[derive(Debug, Clone, Default)]
pub struct CaptionForm {
    platform: Option<Platform>,
    style: Option<Style>,
    topic: String,
    busy: bool,
}

/// The three fields after validation, copied out at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    pub platform: Platform,
    pub style: Style,
    pub topic: String,
}

impl CaptionForm {
    pub fn platform(&self) -> Option<Platform> { self.platform }
    pub fn style(&self) -> Option<Style> { self.style }
    pub fn topic(&self) -> &str { &self.topic }
    pub fn is_busy(&self) -> bool { self.busy }

    pub fn set_platform(&mut self, platform: Option<Platform>) {
        self.platform = platform;
    }

    pub fn set_style(&mut self, style: Option<Style>) {
        self.style = style;
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    /// `""` unsets the platform; an unknown name leaves it unchanged.
    pub fn set_platform_str(&mut self, value: &str) -> Result<(), CaptionError> {
        self.platform = parse_choice(value, FormField::Platform)?;
        Ok(())
    }

    /// `""` unsets the style; an unknown name leaves it unchanged.
    pub fn set_style_str(&mut self, value: &str) -> Result<(), CaptionError> {
        self.style = parse_choice(value, FormField::Style)?;
        Ok(())
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Collects every missing field so the notice can name them all at once.
    pub fn validate(&self) -> Result<ValidatedForm, CaptionError> {
        let mut missing = Vec::new();
        if self.platform.is_none() {
            missing.push(FormField::Platform);
        }
        if self.style.is_none() {
            missing.push(FormField::Style);
        }
        if self.topic.trim().is_empty() {
            missing.push(FormField::Topic);
        }
        match (self.platform, self.style) {
            (Some(platform), Some(style)) if missing.is_empty() => Ok(ValidatedForm {
                platform,
                style,
                topic: self.topic.clone(),
            }),
            _ => Err(CaptionError::Validation { missing }),
        }
    }
}

fn parse_choice<T: std::str::FromStr>(value: &str, field: FormField) -> Result<Option<T>, CaptionError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    value
        .parse::<T>()
        .map(Some)
        .map_err(|_| CaptionError::UnknownChoice { field, value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CaptionForm {
        let mut form = CaptionForm::default();
        form.set_platform(Some(Platform::Twitter));
        form.set_style(Some(Style::Humorous));
        form.set_topic("Course Completion");
        form
    }

    #[test]
    fn new_form_is_empty_and_idle() {
        let form = CaptionForm::default();
        assert_eq!(form.platform(), None);
        assert_eq!(form.style(), None);
        assert_eq!(form.topic(), "");
        assert!(!form.is_busy());
    }

    #[test]
    fn validate_returns_fields_verbatim() {
        let v = filled().validate().unwrap();
        assert_eq!(
            v,
            ValidatedForm {
                platform: Platform::Twitter,
                style: Style::Humorous,
                topic: "Course Completion".into(),
            }
        );
    }

    #[test]
    fn validate_reports_every_missing_field() {
        let err = CaptionForm::default().validate().unwrap_err();
        match err {
            CaptionError::Validation { missing } => {
                assert_eq!(missing, vec![FormField::Platform, FormField::Style, FormField::Topic]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn whitespace_topic_counts_as_empty() {
        let mut form = filled();
        form.set_topic("   ");
        match form.validate().unwrap_err() {
            CaptionError::Validation { missing } => assert_eq!(missing, vec![FormField::Topic]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn field_update_replaces_only_that_field() {
        let mut form = filled();
        form.set_style(Some(Style::Casual));
        assert_eq!(form.platform(), Some(Platform::Twitter));
        assert_eq!(form.style(), Some(Style::Casual));
        assert_eq!(form.topic(), "Course Completion");
    }

    #[test]
    fn string_updates_accept_names_and_blank() {
        let mut form = filled();
        form.set_platform_str("linkedin").unwrap();
        assert_eq!(form.platform(), Some(Platform::LinkedIn));
        form.set_platform_str("").unwrap();
        assert_eq!(form.platform(), None);
        form.set_style_str("Inspirational").unwrap();
        assert_eq!(form.style(), Some(Style::Inspirational));
    }

    #[test]
    fn unknown_choice_leaves_field_unchanged() {
        let mut form = filled();
        let err = form.set_style_str("sarcastic").unwrap_err();
        assert!(matches!(err, CaptionError::UnknownChoice { field: FormField::Style, .. }));
        assert_eq!(form.style(), Some(Style::Humorous));
    }
}
