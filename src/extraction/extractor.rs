//! Runs every extractor over one document and assembles the result

use crate::config::Config;
use crate::error::Result;
use crate::extraction::contact::{ContactExtractor, ContactFields};
use crate::extraction::education::{classify_education_details, EducationDetail, EducationNormalizer};
use crate::extraction::lines::split_lines;
use crate::extraction::patterns::{PatternLibrary, SectionKey};
use crate::extraction::segmenter::{HeaderPolicy, LineJoin, SectionSegmenter, SegmentOptions};
use crate::extraction::skills::SkillsExtractor;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Everything extracted from one résumé
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub contact: ContactFields,
    pub sections: BTreeMap<SectionKey, String>,
    pub skills: Vec<String>,
    pub education_details: Vec<EducationDetail>,
}

impl ExtractionResult {
    pub fn section(&self, key: SectionKey) -> &str {
        self.sections.get(&key).map(String::as_str).unwrap_or("")
    }

    /// Sections with content, in section order
    pub fn non_empty_sections(&self) -> impl Iterator<Item = (SectionKey, &str)> {
        self.sections
            .iter()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(key, text)| (*key, text.as_str()))
    }
}

/// Stateless façade over the extractors.
///
/// Cheap to clone and safe to share between threads; the pattern library is
/// never mutated after construction.
#[derive(Debug, Clone)]
pub struct ResumeExtractor {
    patterns: Arc<PatternLibrary>,
    join: LineJoin,
}

impl Default for ResumeExtractor {
    fn default() -> Self {
        Self::new(Arc::new(PatternLibrary::default()))
    }
}

impl ResumeExtractor {
    pub fn new(patterns: Arc<PatternLibrary>) -> Self {
        Self {
            patterns,
            join: LineJoin::Newline,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let patterns = PatternLibrary::from_config(&config.patterns)?;
        Ok(Self::new(Arc::new(patterns)).with_join(config.extraction.join))
    }

    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    pub fn patterns(&self) -> &PatternLibrary {
        &self.patterns
    }

    pub fn extract_contact(&self, text: &str) -> ContactFields {
        ContactExtractor::new(&self.patterns).extract(text)
    }

    /// Raw text of a single section, before any post-processing
    pub fn extract_section_text(&self, text: &str, key: SectionKey, options: SegmentOptions) -> String {
        let lines = split_lines(text);
        SectionSegmenter::new(&self.patterns).extract_section_text(&lines, key, options)
    }

    /// One entry per configured section; education is normalized and
    /// internship lines are bulleted.
    ///
    /// Both post-processed sections are rewritten line by line, so they are
    /// always segmented with newlines; the join style applies to the rest.
    pub fn extract_sections(&self, text: &str) -> BTreeMap<SectionKey, String> {
        let lines = split_lines(text);
        let segmenter = SectionSegmenter::new(&self.patterns);
        let normalizer = EducationNormalizer::new(&self.patterns);

        let mut sections = BTreeMap::new();
        for section in self.patterns.sections() {
            let join = match section.key {
                SectionKey::Education | SectionKey::InternshipExperience => LineJoin::Newline,
                _ => self.join,
            };
            let raw = segmenter.extract_section_text(&lines, section.key, SegmentOptions::new(section.header, join));

            let text = match section.key {
                SectionKey::Education => normalizer.refine_education_section(&raw),
                SectionKey::InternshipExperience => bullet_lines(&raw),
                _ => raw,
            };

            debug!("Section '{}': {} characters", section.key.as_str(), text.len());
            sections.insert(section.key, text);
        }

        sections
    }

    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        SkillsExtractor::new(&self.patterns).extract_skills(text)
    }

    /// Level-tagged fragments of the education section, read as running text
    pub fn extract_education_details(&self, text: &str) -> Vec<EducationDetail> {
        if self.patterns.section(SectionKey::Education).is_none() {
            return Vec::new();
        }
        let options = SegmentOptions::new(HeaderPolicy::Exclude, LineJoin::Space);
        let education = self.extract_section_text(text, SectionKey::Education, options);
        classify_education_details(self.patterns.education_details(), &education)
    }

    pub fn extract(&self, text: &str) -> ExtractionResult {
        let result = ExtractionResult {
            contact: self.extract_contact(text),
            sections: self.extract_sections(text),
            skills: self.extract_skills(text),
            education_details: self.extract_education_details(text),
        };

        debug!(
            "Extracted {} non-empty sections, {} skill lines, {} emails",
            result.non_empty_sections().count(),
            result.skills.len(),
            result.contact.emails.len()
        );

        result
    }
}

/// Prefix each non-blank line with "- "
fn bullet_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("- {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::education::DetailLevel;

    const RESUME: &str = "Rahul Verma
rahul.verma@example.com | +91 98765 43210

EDUCATION
XYZ University
B.Tech Computer Science
CGPA 8.5

INTERNSHIP
Backend intern at Acme Corp

Built billing APIs

SKILLS
Python, SQL
random note

PROJECTS
A cool project";

    #[test]
    fn test_extract_assembles_every_field() {
        let extractor = ResumeExtractor::default();
        let result = extractor.extract(RESUME);

        assert_eq!(result.contact.name.as_deref(), Some("Rahul Verma"));
        assert_eq!(result.contact.phone.as_deref(), Some("+91 98765 43210"));
        assert_eq!(result.contact.emails, vec!["rahul.verma@example.com"]);
        assert_eq!(result.skills, vec!["Python, SQL"]);

        assert_eq!(
            result.section(SectionKey::Education),
            "Bachelor's Degree:\nB.Tech Computer Science\n    XYZ University\n    CGPA 8.5"
        );
        assert_eq!(
            result.section(SectionKey::InternshipExperience),
            "- INTERNSHIP\n- Backend intern at Acme Corp\n- Built billing APIs"
        );
        assert_eq!(result.section(SectionKey::Projects), "PROJECTS\nA cool project");
        assert_eq!(result.section(SectionKey::Skills), "Python, SQL\nrandom note\n");
        assert_eq!(result.section(SectionKey::Certifications), "");
    }

    #[test]
    fn test_every_configured_section_is_present() {
        let extractor = ResumeExtractor::default();
        let sections = extractor.extract_sections("nothing to see here");

        assert_eq!(sections.len(), SectionKey::ALL.len());
        assert!(sections.values().all(String::is_empty));
    }

    #[test]
    fn test_section_order_ignores_configured_order() {
        let mut config = Config::default();
        config.patterns.sections.reverse();
        let extractor = ResumeExtractor::from_config(&config).unwrap();

        let keys: Vec<SectionKey> = extractor.extract_sections(RESUME).into_keys().collect();
        assert_eq!(keys, SectionKey::ALL.to_vec());
    }

    #[test]
    fn test_empty_internship_section_stays_empty() {
        let extractor = ResumeExtractor::default();
        let sections = extractor.extract_sections("EDUCATION\nB.Tech");
        assert_eq!(sections[&SectionKey::InternshipExperience], "");
    }

    #[test]
    fn test_space_join_variant() {
        let extractor = ResumeExtractor::default().with_join(LineJoin::Space);
        let sections = extractor.extract_sections(RESUME);
        assert_eq!(sections[&SectionKey::Projects], "PROJECTS A cool project");
    }

    #[test]
    fn test_space_join_keeps_line_based_sections_intact() {
        let extractor = ResumeExtractor::default().with_join(LineJoin::Space);
        let text = "EDUCATION\nXYZ University\nB.Tech Computer Science\nCGPA 8.5\nClass XII - DPS\n\
                    Percentage 92%\nINTERNSHIP\nIntern at Acme\nBuilt APIs\nPROJECTS\nParser\nCLI";
        let sections = extractor.extract_sections(text);

        assert_eq!(
            sections[&SectionKey::Education],
            "Bachelor's Degree:\nB.Tech Computer Science\n    XYZ University\n    CGPA 8.5\n\n\
             Class XII:\nClass XII - DPS\n    Percentage 92%"
        );
        assert_eq!(
            sections[&SectionKey::InternshipExperience],
            "- INTERNSHIP\n- Intern at Acme\n- Built APIs"
        );
        assert_eq!(sections[&SectionKey::Projects], "PROJECTS Parser CLI");
    }

    #[test]
    fn test_education_details_from_running_text() {
        let extractor = ResumeExtractor::default();
        let text = "Education\nBachelor of Technology, 2020\nSchooling at DPS with 91%\nSkills\nRust";
        let details = extractor.extract_education_details(text);

        assert_eq!(details.len(), 1);
        // Tenth is tested before Bachelor
        assert_eq!(details[0].level, DetailLevel::Tenth);
        assert_eq!(details[0].text, "Bachelor of Technology, 2020 Schooling at DPS with 91%");
    }

    #[test]
    fn test_extractor_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResumeExtractor>();
    }

    #[test]
    fn test_bullet_lines_skips_blanks() {
        assert_eq!(bullet_lines("a\n\n  b  \n"), "- a\n- b");
        assert_eq!(bullet_lines(""), "");
    }
}
