//! Name, phone and email extraction

use crate::extraction::patterns::PatternLibrary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub emails: Vec<String>,
}

pub struct ContactExtractor<'a> {
    patterns: &'a PatternLibrary,
}

impl<'a> ContactExtractor<'a> {
    pub fn new(patterns: &'a PatternLibrary) -> Self {
        Self { patterns }
    }

    pub fn extract(&self, text: &str) -> ContactFields {
        ContactFields {
            name: self.extract_name(text),
            phone: self.extract_phone_number(text),
            emails: self.extract_emails(text),
        }
    }

    /// First line starting with a run of letters, scanning from the top.
    /// Only the start of the line is tested, so "Jane Doe, PhD" qualifies.
    pub fn extract_name(&self, text: &str) -> Option<String> {
        text.lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && self.patterns.name_regex().is_match(line))
            .map(str::to_string)
    }

    /// First phone-like run in the document, dropped when it is too long to be
    /// a single number
    pub fn extract_phone_number(&self, text: &str) -> Option<String> {
        let number = self.patterns.phone_regex().find(text)?.as_str();
        if number.chars().count() <= self.patterns.max_phone_length() {
            Some(number.to_string())
        } else {
            None
        }
    }

    pub fn extract_emails(&self, text: &str) -> Vec<String> {
        self.patterns
            .email_regex()
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
