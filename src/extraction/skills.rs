//! Skills block extraction

use crate::extraction::patterns::PatternLibrary;
use log::debug;

pub struct SkillsExtractor<'a> {
    patterns: &'a PatternLibrary,
}

impl<'a> SkillsExtractor<'a> {
    pub fn new(patterns: &'a PatternLibrary) -> Self {
        Self { patterns }
    }

    /// Lines of the skills block that mention a known skill, in document order.
    ///
    /// A marker line ("skills", "technologies", ...) opens the block and is not
    /// itself returned; lines without a known skill are skipped rather than
    /// ending the block. The block closes at a line starting with a projects,
    /// certifications or courses heading; that line is still kept when it names
    /// a skill. A later marker line opens it again.
    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        let mut skills = Vec::new();
        let mut in_skills = false;

        for line in text.lines().map(str::trim) {
            if let Some(marker) = self.patterns.skill_markers().find(line) {
                debug!("Skills block opened by '{}' at line '{}'", marker, line);
                in_skills = true;
                continue;
            }

            if !in_skills {
                continue;
            }

            if self.patterns.skill_keywords().matches(line) {
                skills.push(line.to_string());
            }
            if self.patterns.skills_terminator().is_match(line) {
                debug!("Skills block closed at line '{}'", line);
                in_skills = false;
            }
        }

        skills
    }
}
