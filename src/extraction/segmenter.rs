//! Header-driven section segmentation

use crate::extraction::patterns::{PatternLibrary, SectionKey};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether the line that opened a section is part of its text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderPolicy {
    #[default]
    Include,
    Exclude,
}

/// How collected lines are joined into the section text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    #[default]
    Newline,
    Space,
}

impl LineJoin {
    pub fn separator(&self) -> &'static str {
        match self {
            LineJoin::Newline => "\n",
            LineJoin::Space => " ",
        }
    }
}

impl fmt::Display for LineJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineJoin::Newline => write!(f, "newline"),
            LineJoin::Space => write!(f, "space"),
        }
    }
}

impl FromStr for LineJoin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newline" | "lines" => Ok(LineJoin::Newline),
            "space" => Ok(LineJoin::Space),
            _ => Err(format!("Invalid join style: {}. Supported: newline, space", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentOptions {
    pub header: HeaderPolicy,
    pub join: LineJoin,
}

impl SegmentOptions {
    pub fn new(header: HeaderPolicy, join: LineJoin) -> Self {
        Self { header, join }
    }
}

/// Splits a line stream into the text belonging to one section
pub struct SectionSegmenter<'a> {
    patterns: &'a PatternLibrary,
}

impl<'a> SectionSegmenter<'a> {
    pub fn new(patterns: &'a PatternLibrary) -> Self {
        Self { patterns }
    }

    /// Collect the lines of `key`'s section.
    ///
    /// The section opens at the first line carrying one of its header
    /// keywords and closes for good at the first line carrying a keyword of
    /// any other configured section. Headers of other sections seen before
    /// the opening line are ignored. Returns an empty string when the header
    /// never appears.
    pub fn extract_section_text<S: AsRef<str>>(
        &self,
        lines: &[S],
        key: SectionKey,
        options: SegmentOptions,
    ) -> String {
        let collected = self.collect_lines(lines, key, options.header);
        collected.join(options.join.separator())
    }

    pub fn collect_lines<'l, S: AsRef<str>>(
        &self,
        lines: &'l [S],
        key: SectionKey,
        header: HeaderPolicy,
    ) -> Vec<&'l str> {
        let mut collected = Vec::new();
        let mut in_section = false;

        for line in lines {
            let line = line.as_ref().trim();

            if !in_section {
                if self.patterns.is_header_for(key, line) {
                    debug!("Section '{}' opened at line '{}'", key.as_str(), line);
                    in_section = true;
                    if header == HeaderPolicy::Include {
                        collected.push(line);
                    }
                }
                continue;
            }

            if let Some(other) = self.patterns.foreign_header(key, line) {
                debug!(
                    "Section '{}' closed by '{}' header at line '{}'",
                    key.as_str(),
                    other.as_str(),
                    line
                );
                break;
            }

            // A repeated own header follows the same policy as the opening one
            if header == HeaderPolicy::Exclude && self.patterns.is_header_for(key, line) {
                continue;
            }

            collected.push(line);
        }

        collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<&'static str> {
        vec![
            "John Doe",
            "EDUCATION",
            "XYZ University",
            "B.Tech Computer Science",
            "CGPA 8.5",
            "PROJECTS",
            "A cool project",
        ]
    }

    #[test]
    fn test_section_stops_at_foreign_header() {
        let library = PatternLibrary::default();
        let segmenter = SectionSegmenter::new(&library);

        let text = segmenter.extract_section_text(&lines(), SectionKey::Education, SegmentOptions::default());
        assert_eq!(text, "EDUCATION\nXYZ University\nB.Tech Computer Science\nCGPA 8.5");
    }

    #[test]
    fn test_header_can_be_excluded_and_space_joined() {
        let library = PatternLibrary::default();
        let segmenter = SectionSegmenter::new(&library);

        let options = SegmentOptions::new(HeaderPolicy::Exclude, LineJoin::Space);
        let text = segmenter.extract_section_text(&lines(), SectionKey::Education, options);
        assert_eq!(text, "XYZ University B.Tech Computer Science CGPA 8.5");
    }

    #[test]
    fn test_missing_header_yields_empty() {
        let library = PatternLibrary::default();
        let segmenter = SectionSegmenter::new(&library);

        let text = segmenter.extract_section_text(&lines(), SectionKey::Certifications, SegmentOptions::default());
        assert!(text.is_empty());
    }

    #[test]
    fn test_foreign_header_before_own_header_is_ignored() {
        let library = PatternLibrary::default();
        let segmenter = SectionSegmenter::new(&library);

        let input = ["PROJECTS", "Parser in Rust", "EDUCATION", "MIT", "SKILLS", "Rust"];
        let text = segmenter.extract_section_text(&input, SectionKey::Education, SegmentOptions::default());
        assert_eq!(text, "EDUCATION\nMIT");
    }

    #[test]
    fn test_section_is_never_resumed() {
        let library = PatternLibrary::default();
        let segmenter = SectionSegmenter::new(&library);

        let input = ["Projects", "One", "Skills", "Rust", "Project Details", "Two"];
        let text = segmenter.extract_section_text(&input, SectionKey::Projects, SegmentOptions::default());
        assert_eq!(text, "Projects\nOne");
    }

    #[test]
    fn test_last_section_runs_to_end_of_document() {
        let library = PatternLibrary::default();
        let segmenter = SectionSegmenter::new(&library);

        let text = segmenter.extract_section_text(&lines(), SectionKey::Projects, SegmentOptions::default());
        assert_eq!(text, "PROJECTS\nA cool project");
    }

    #[test]
    fn test_repeated_header_dropped_when_excluded() {
        let library = PatternLibrary::default();
        let segmenter = SectionSegmenter::new(&library);

        let input = ["Skills", "Rust", "Soft Skills", "Teamwork", "Projects"];
        let options = SegmentOptions::new(HeaderPolicy::Exclude, LineJoin::Newline);
        let text = segmenter.extract_section_text(&input, SectionKey::Skills, options);
        assert_eq!(text, "Rust\nTeamwork");
    }

    #[test]
    fn test_line_join_parsing() {
        assert_eq!("space".parse::<LineJoin>().unwrap(), LineJoin::Space);
        assert_eq!("Newline".parse::<LineJoin>().unwrap(), LineJoin::Newline);
        assert!("tab".parse::<LineJoin>().is_err());
    }
}
