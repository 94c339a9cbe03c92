//! Education section normalization
//!
//! Rewrites a raw education section into a fixed hierarchy of degree
//! headings with institution names and scores indented beneath them.
//! Lines that fit none of the categories are dropped.

use crate::extraction::lines::{collapse_whitespace, join_lines};
use crate::extraction::patterns::{EducationKeywords, PatternLibrary};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

const INDENT: &str = "    ";

/// Canonical degree levels, in the order they are tested against a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Bachelor,
    MasterPhd,
    ClassXII,
    ClassX,
}

impl Heading {
    pub fn label(&self) -> &'static str {
        match self {
            Heading::Bachelor => "Bachelor's Degree:",
            Heading::MasterPhd => "Master's/PhD Degree:",
            Heading::ClassXII => "Class XII:",
            Heading::ClassX => "Class X:",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Degree(Heading),
    Institution,
    Metric,
    Other,
}

/// State carried from line to line during one normalization pass
#[derive(Debug, Default)]
struct Refinement {
    heading: Option<Heading>,
    last_institution: Option<String>,
    // Institution named before any degree line; placed under the first heading
    pending_institution: Option<String>,
    lines: Vec<String>,
}

impl Refinement {
    fn apply(mut self, kind: LineKind, line: String) -> Self {
        match kind {
            LineKind::Degree(heading) => {
                if self.heading != Some(heading) {
                    self.lines.push(String::new());
                    self.lines.push(heading.label().to_string());
                    self.heading = Some(heading);
                    self.last_institution = None;
                }
                self.lines.push(line);

                if let Some(institution) = self.pending_institution.take() {
                    self.lines.push(format!("{}{}", INDENT, institution));
                    self.last_institution = Some(institution);
                }
            }
            LineKind::Institution => match self.heading {
                Some(_) => {
                    if self.last_institution.as_deref() == Some(line.as_str()) {
                        debug!("Skipping repeated institution '{}'", line);
                    } else {
                        self.lines.push(format!("{}{}", INDENT, line));
                        self.last_institution = Some(line);
                    }
                }
                None => self.pending_institution = Some(line),
            },
            LineKind::Metric => {
                if self.heading.is_some() {
                    self.lines.push(format!("{}{}", INDENT, line));
                }
            }
            LineKind::Other => {}
        }
        self
    }

    fn finish(self) -> String {
        join_lines(&self.lines).trim().to_string()
    }
}

pub struct EducationNormalizer<'a> {
    keywords: &'a EducationKeywords,
}

impl<'a> EducationNormalizer<'a> {
    pub fn new(patterns: &'a PatternLibrary) -> Self {
        Self {
            keywords: patterns.education(),
        }
    }

    fn classify(&self, line: &str) -> LineKind {
        let k = self.keywords;
        if k.bachelor.matches(line) {
            LineKind::Degree(Heading::Bachelor)
        } else if k.master_phd.matches(line) {
            LineKind::Degree(Heading::MasterPhd)
        } else if k.class_xii.matches(line) {
            LineKind::Degree(Heading::ClassXII)
        } else if k.class_x.matches(line) {
            LineKind::Degree(Heading::ClassX)
        } else if k.institution.matches(line) {
            // Metric lines naming an institution land here too
            LineKind::Institution
        } else if k.metric.matches(line) {
            LineKind::Metric
        } else {
            LineKind::Other
        }
    }

    /// Relabel a raw education section under canonical headings.
    ///
    /// Not idempotent: the canonical labels contain the raw degree keywords,
    /// so a second pass re-detects each label as a degree line.
    pub fn refine_education_section(&self, section_text: &str) -> String {
        section_text
            .lines()
            .map(collapse_whitespace)
            .fold(Refinement::default(), |state, line| {
                let kind = self.classify(&line);
                state.apply(kind, line)
            })
            .finish()
    }
}

/// Coarse education level of a sentence fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    Tenth,
    Twelfth,
    Bachelor,
    Score,
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailLevel::Tenth => write!(f, "10th"),
            DetailLevel::Twelfth => write!(f, "12th"),
            DetailLevel::Bachelor => write!(f, "Bachelor"),
            DetailLevel::Score => write!(f, "Score"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationDetail {
    pub level: DetailLevel,
    pub text: String,
}

/// Tag each `.`-separated fragment of `text` with the first matching level.
/// Fragments matching no pattern are skipped.
pub fn classify_education_details(patterns: &[(DetailLevel, Regex)], text: &str) -> Vec<EducationDetail> {
    text.split('.')
        .filter_map(|fragment| {
            patterns
                .iter()
                .find(|(_, re)| re.is_match(fragment))
                .map(|(level, _)| EducationDetail {
                    level: *level,
                    text: fragment.trim().to_string(),
                })
        })
        .collect()
}
