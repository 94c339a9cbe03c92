//! Keyword sets and regular expressions shared by every extractor

use crate::config::PatternConfig;
use crate::error::{Result, ResumeParserError};
use crate::extraction::education::DetailLevel;
use crate::extraction::segmenter::HeaderPolicy;
use aho_corasick::AhoCorasick;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Resume section categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Education,
    Certifications,
    InternshipExperience,
    Projects,
    Skills,
}

impl SectionKey {
    pub const ALL: [SectionKey; 5] = [
        SectionKey::Education,
        SectionKey::Certifications,
        SectionKey::InternshipExperience,
        SectionKey::Projects,
        SectionKey::Skills,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Education => "education",
            SectionKey::Certifications => "certifications",
            SectionKey::InternshipExperience => "internship_experience",
            SectionKey::Projects => "projects",
            SectionKey::Skills => "skills",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SectionKey::Education => "Education",
            SectionKey::Certifications => "Certifications",
            SectionKey::InternshipExperience => "Internship Experience",
            SectionKey::Projects => "Projects",
            SectionKey::Skills => "Skills",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl FromStr for SectionKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "education" => Ok(SectionKey::Education),
            "certifications" => Ok(SectionKey::Certifications),
            "internship_experience" | "internship" | "experience" => Ok(SectionKey::InternshipExperience),
            "projects" => Ok(SectionKey::Projects),
            "skills" => Ok(SectionKey::Skills),
            _ => Err(format!(
                "Unknown section: {}. Supported: education, certifications, internship_experience, projects, skills",
                s
            )),
        }
    }
}

/// Case-insensitive substring matcher over a fixed keyword list.
///
/// Matching is ASCII case-insensitive, which is the same as testing the
/// keywords against a lowercased copy of the line for ASCII text.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    keywords: Vec<String>,
    matcher: AhoCorasick,
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .collect();

        // An empty pattern would match every line
        if keywords.iter().any(|k| k.is_empty()) {
            return Err(ResumeParserError::Configuration(
                "Keyword lists must not contain empty entries".to_string(),
            ));
        }

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&keywords)?;

        Ok(Self { keywords, matcher })
    }

    pub fn matches(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }

    /// The first keyword found in `text`, if any
    pub fn find(&self, text: &str) -> Option<&str> {
        self.matcher
            .find(text)
            .map(|m| self.keywords[m.pattern().as_usize()].as_str())
    }
}

#[derive(Debug, Clone)]
pub struct SectionPattern {
    pub key: SectionKey,
    pub keywords: KeywordSet,
    pub header: HeaderPolicy,
}

#[derive(Debug, Clone)]
pub struct EducationKeywords {
    pub bachelor: KeywordSet,
    pub master_phd: KeywordSet,
    pub class_xii: KeywordSet,
    pub class_x: KeywordSet,
    pub institution: KeywordSet,
    pub metric: KeywordSet,
}

/// Immutable, compiled form of [`PatternConfig`].
///
/// Built once and shared read-only by every extraction call.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    sections: Vec<SectionPattern>,
    skill_markers: KeywordSet,
    skill_keywords: KeywordSet,
    skills_terminator: Regex,
    education: EducationKeywords,
    education_details: Vec<(DetailLevel, Regex)>,
    name_regex: Regex,
    phone_regex: Regex,
    email_regex: Regex,
    max_phone_length: usize,
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::from_config(&PatternConfig::default()).expect("Invalid default pattern configuration")
    }
}

impl PatternLibrary {
    pub fn from_config(config: &PatternConfig) -> Result<Self> {
        if config.sections.is_empty() {
            return Err(ResumeParserError::Configuration(
                "At least one section must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut sections = Vec::with_capacity(config.sections.len());
        for section in &config.sections {
            if !seen.insert(section.key) {
                return Err(ResumeParserError::Configuration(format!(
                    "Section '{}' is configured more than once",
                    section.key.as_str()
                )));
            }
            if section.keywords.is_empty() {
                return Err(ResumeParserError::Configuration(format!(
                    "Section '{}' has no header keywords",
                    section.key.as_str()
                )));
            }
            sections.push(SectionPattern {
                key: section.key,
                keywords: KeywordSet::new(&section.keywords)?,
                header: section.header,
            });
        }

        let skills_terminator = Self::build_terminator(&config.skills.terminators)?;

        let education = EducationKeywords {
            bachelor: KeywordSet::new(&config.education.bachelor)?,
            master_phd: KeywordSet::new(&config.education.master_phd)?,
            class_xii: KeywordSet::new(&config.education.class_xii)?,
            class_x: KeywordSet::new(&config.education.class_x)?,
            institution: KeywordSet::new(&config.education.institution)?,
            metric: KeywordSet::new(&config.education.metric)?,
        };

        let education_details = config
            .education
            .details
            .iter()
            .map(|d| Ok((d.level, Regex::new(&d.pattern)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            sections,
            skill_markers: KeywordSet::new(&config.skills.markers)?,
            skill_keywords: KeywordSet::new(&config.skills.keywords)?,
            skills_terminator,
            education,
            education_details,
            name_regex: Regex::new(&config.contact.name)?,
            phone_regex: Regex::new(&config.contact.phone)?,
            email_regex: Regex::new(&config.contact.email)?,
            max_phone_length: config.contact.max_phone_length,
        })
    }

    /// `^\s*(projects|certifications|courses)\b`, case-insensitive
    fn build_terminator(terminators: &[String]) -> Result<Regex> {
        if terminators.is_empty() {
            return Err(ResumeParserError::Configuration(
                "Skills terminators must not be empty".to_string(),
            ));
        }
        let alternatives: Vec<String> = terminators
            .iter()
            .map(|t| regex::escape(t.trim()))
            .collect();
        Ok(Regex::new(&format!(r"(?i)^\s*({})\b", alternatives.join("|")))?)
    }

    pub fn sections(&self) -> &[SectionPattern] {
        &self.sections
    }

    pub fn section(&self, key: SectionKey) -> Option<&SectionPattern> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// Does `line` carry a header keyword of `key`?
    pub fn is_header_for(&self, key: SectionKey, line: &str) -> bool {
        self.section(key).is_some_and(|s| s.keywords.matches(line))
    }

    /// The first other section whose header keywords appear in `line`
    pub fn foreign_header(&self, key: SectionKey, line: &str) -> Option<SectionKey> {
        self.sections
            .iter()
            .filter(|s| s.key != key)
            .find(|s| s.keywords.matches(line))
            .map(|s| s.key)
    }

    pub fn skill_markers(&self) -> &KeywordSet {
        &self.skill_markers
    }

    pub fn skill_keywords(&self) -> &KeywordSet {
        &self.skill_keywords
    }

    pub fn skills_terminator(&self) -> &Regex {
        &self.skills_terminator
    }

    pub fn education(&self) -> &EducationKeywords {
        &self.education
    }

    pub fn education_details(&self) -> &[(DetailLevel, Regex)] {
        &self.education_details
    }

    pub fn name_regex(&self) -> &Regex {
        &self.name_regex
    }

    pub fn phone_regex(&self) -> &Regex {
        &self.phone_regex
    }

    pub fn email_regex(&self) -> &Regex {
        &self.email_regex
    }

    pub fn max_phone_length(&self) -> usize {
        self.max_phone_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SectionPatterns;

    #[test]
    fn test_keyword_set_is_case_insensitive_substring() {
        let set = KeywordSet::new(["Python", "sql"]).unwrap();
        assert!(set.matches("PYTHON, SQL"));
        assert!(set.matches("MySQL"));
        assert!(!set.matches("Rust"));
        assert_eq!(set.find("Advanced SQL"), Some("sql"));
    }

    #[test]
    fn test_builtin_patterns_compile() {
        assert!(PatternLibrary::from_config(&PatternConfig::default()).is_ok());
    }

    #[test]
    fn test_keyword_set_rejects_empty_entries() {
        assert!(KeywordSet::new(["skills", "  "]).is_err());
    }

    #[test]
    fn test_substring_matching_is_not_word_bounded() {
        let library = PatternLibrary::default();
        assert!(library.is_header_for(SectionKey::InternshipExperience, "Retraining programme"));
    }

    #[test]
    fn test_foreign_header_skips_own_section() {
        let library = PatternLibrary::default();
        assert_eq!(library.foreign_header(SectionKey::Education, "EDUCATION"), None);
        assert_eq!(
            library.foreign_header(SectionKey::Education, "Academic Projects"),
            Some(SectionKey::Projects)
        );
    }

    #[test]
    fn test_skills_terminator_is_anchored() {
        let library = PatternLibrary::default();
        let re = library.skills_terminator();
        assert!(re.is_match("  PROJECTS"));
        assert!(re.is_match("Certifications & Awards"));
        assert!(!re.is_match("Side projects"));
        assert!(!re.is_match("Projectsmith"));
    }

    #[test]
    fn test_duplicate_section_is_rejected() {
        let mut config = PatternConfig::default();
        config.sections.push(SectionPatterns {
            key: SectionKey::Education,
            keywords: vec!["studies".to_string()],
            header: HeaderPolicy::Include,
        });
        let err = PatternLibrary::from_config(&config).unwrap_err();
        assert!(matches!(err, ResumeParserError::Configuration(_)));
    }

    #[test]
    fn test_invalid_regex_is_reported() {
        let mut config = PatternConfig::default();
        config.contact.phone = "[0-9".to_string();
        assert!(matches!(
            PatternLibrary::from_config(&config),
            Err(ResumeParserError::Pattern(_))
        ));
    }

    #[test]
    fn test_section_key_parsing() {
        assert_eq!("internship-experience".parse::<SectionKey>().unwrap(), SectionKey::InternshipExperience);
        assert_eq!("Skills".parse::<SectionKey>().unwrap(), SectionKey::Skills);
        assert!("hobbies".parse::<SectionKey>().is_err());
    }
}
