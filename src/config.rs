//! Configuration management for the resume parser

use crate::error::{Result, ResumeParserError};
use crate::extraction::education::DetailLevel;
use crate::extraction::patterns::SectionKey;
use crate::extraction::segmenter::{HeaderPolicy, LineJoin};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub patterns: PatternConfig,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

/// Every keyword list and regular expression the extractors use.
///
/// Each section's keywords double as foreign headers for all the others;
/// when a line names several sections, the one listed first wins. Extraction
/// results are keyed by [`SectionKey`] and ordered by it, not by this list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub sections: Vec<SectionPatterns>,
    pub skills: SkillPatterns,
    pub education: EducationPatterns,
    pub contact: ContactPatterns,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionPatterns {
    pub key: SectionKey,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub header: HeaderPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillPatterns {
    /// Lines containing one of these open the skills block
    pub markers: Vec<String>,
    pub keywords: Vec<String>,
    /// Headings that close the skills block when they start a line
    pub terminators: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationPatterns {
    pub bachelor: Vec<String>,
    pub master_phd: Vec<String>,
    pub class_xii: Vec<String>,
    pub class_x: Vec<String>,
    pub institution: Vec<String>,
    pub metric: Vec<String>,
    pub details: Vec<DetailPattern>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailPattern {
    pub level: DetailLevel,
    pub pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactPatterns {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub max_phone_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub join: LineJoin,
    pub prefer_table_text: bool,
    pub enable_caching: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            sections: vec![
                SectionPatterns {
                    key: SectionKey::Education,
                    keywords: strings(&["education", "academic qualifications", "educational background"]),
                    header: HeaderPolicy::Include,
                },
                SectionPatterns {
                    key: SectionKey::Certifications,
                    keywords: strings(&["certifications", "courses", "participations", "certificates", "certificate"]),
                    header: HeaderPolicy::Include,
                },
                SectionPatterns {
                    key: SectionKey::InternshipExperience,
                    keywords: strings(&[
                        "internship",
                        "work experience",
                        "professional experience",
                        "training",
                        "internships",
                    ]),
                    header: HeaderPolicy::Include,
                },
                SectionPatterns {
                    key: SectionKey::Projects,
                    keywords: strings(&["projects", "project work", "project details"]),
                    header: HeaderPolicy::Include,
                },
                SectionPatterns {
                    key: SectionKey::Skills,
                    keywords: strings(&["skills", "technical skills", "soft skills"]),
                    header: HeaderPolicy::Exclude,
                },
            ],
            skills: SkillPatterns::default(),
            education: EducationPatterns::default(),
            contact: ContactPatterns::default(),
        }
    }
}

impl Default for SkillPatterns {
    fn default() -> Self {
        Self {
            markers: strings(&[
                "skills",
                "technical skills",
                "technologies",
                "proficiencies",
                "soft skills",
                "industry skills",
            ]),
            keywords: strings(&[
                "machine learning",
                "data science",
                "python",
                "java",
                "excel",
                "sql",
                "javascript",
                "c++",
                "html",
                "css",
                "aws",
                "microsoft azure",
                "docker",
                "bootstrap",
                "html-5",
                "css-3",
                "django",
                "mysql",
                "soft skills",
                "web technologies",
                "database tools",
                "cloud technologies",
            ]),
            terminators: strings(&["projects", "certifications", "courses"]),
        }
    }
}

impl Default for EducationPatterns {
    fn default() -> Self {
        Self {
            bachelor: strings(&["b. tech", "bachelor", "graduate", "b.tech", "graduation", "college of engineering"]),
            master_phd: strings(&["master", "postgraduate", "phd"]),
            class_xii: strings(&[
                "class xii",
                "12th",
                "hsc",
                "intermediate",
                "(xii)",
                "academy",
                "college",
                "sec school",
            ]),
            class_x: strings(&["class x", "10th", "schooling", "xth", "school", "high school"]),
            institution: strings(&["university", "institute", "school", "college"]),
            metric: strings(&["cgpa", "percentage", "%", "years", "year", "duration", "sgpa"]),
            details: vec![
                DetailPattern {
                    level: DetailLevel::Tenth,
                    pattern: r"(?i)(matriculation|10th|schooling)".to_string(),
                },
                DetailPattern {
                    level: DetailLevel::Twelfth,
                    pattern: r"(?i)(12th|intermediate)".to_string(),
                },
                DetailPattern {
                    level: DetailLevel::Bachelor,
                    pattern: r"(?i)(bachelor|graduation|degree)".to_string(),
                },
                DetailPattern {
                    level: DetailLevel::Score,
                    pattern: r"(\d{1,2}\.\d{1,2}%|\d{2,3}%|cgpa\s*[\d.]+)".to_string(),
                },
            ],
        }
    }
}

impl Default for ContactPatterns {
    fn default() -> Self {
        Self {
            name: r"^[A-Za-z\s]+".to_string(),
            phone: r"[+(]?[1-9][0-9 .\-()]{8,}[0-9]".to_string(),
            email: r"[a-z0-9.\-+_]+@[a-z0-9.\-+_]+\.[a-z]+".to_string(),
            max_phone_length: 15,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            join: LineJoin::Newline,
            prefer_table_text: true,
            enable_caching: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
            pretty_json: true,
        }
    }
}

impl Config {
    /// Load the user configuration, writing the defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load configuration from an explicit file; a missing file is an error here
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResumeParserError::Configuration(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ResumeParserError::Configuration(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeParserError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Overwrite the stored configuration with defaults
    pub fn reset() -> Result<Self> {
        let config = Self::default();
        config.save()?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-parser")
            .join("config.toml")
    }

    pub fn section_keywords(&self, key: SectionKey) -> Option<&[String]> {
        self.patterns
            .sections
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.keywords.as_slice())
    }
}
