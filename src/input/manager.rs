//! Input manager for handling different file types

use crate::error::{Result, ResumeParserError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Suffix of the table-derived text written next to a document
pub const TABLE_SIDECAR_SUFFIX: &str = "tables.txt";

/// Which text variant of a document was handed to the extractors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    Document,
    Tables,
}

/// Text of one résumé plus the optional table-derived variant
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub file_type: FileType,
    pub text: String,
    pub table_text: Option<String>,
}

impl SourceDocument {
    /// Table-derived text wins when it exists and is not blank
    pub fn preferred_text(&self, prefer_tables: bool) -> (&str, TextSource) {
        match &self.table_text {
            Some(tables) if prefer_tables && !tables.trim().is_empty() => (tables.as_str(), TextSource::Tables),
            _ => (self.text.as_str(), TextSource::Document),
        }
    }
}

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        // Check cache first
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeParserError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(ResumeParserError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Read a document together with its table sidecar, if one was produced
    pub async fn load_document(&mut self, path: &Path) -> Result<SourceDocument> {
        let text = self.extract_text(path).await?;
        let file_type = self.detect_file_type(path)?;

        let sidecar = Self::table_sidecar_path(path);
        let table_text = if sidecar.is_file() {
            info!("Found table-derived text: {}", sidecar.display());
            Some(PlainTextExtractor.extract(&sidecar).await?)
        } else {
            debug!("No table sidecar at {}", sidecar.display());
            None
        };

        Ok(SourceDocument {
            path: path.to_path_buf(),
            file_type,
            text,
            table_text,
        })
    }

    /// `resume.pdf` -> `resume.tables.txt`
    pub fn table_sidecar_path(path: &Path) -> PathBuf {
        path.with_extension(TABLE_SIDECAR_SUFFIX)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        FileType::from_path(path).ok_or_else(|| {
            ResumeParserError::InvalidInput(format!("File has no extension: {}", path.display()))
        })
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
