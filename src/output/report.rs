//! Report structures wrapping one document's extraction result

use crate::extraction::ExtractionResult;
use crate::input::TextSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extraction result plus where it came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub metadata: ReportMetadata,
    pub result: ExtractionResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the résumé as given on the command line
    pub source_file: String,

    /// Whether the plain or the table-derived text was parsed
    pub text_source: TextSource,

    pub character_count: usize,
    pub processing_time_ms: u64,
    pub generated_at: DateTime<Utc>,
    pub parser_version: String,
}

impl ExtractionReport {
    pub fn new(
        source_file: impl Into<String>,
        text_source: TextSource,
        character_count: usize,
        processing_time_ms: u64,
        result: ExtractionResult,
    ) -> Self {
        Self {
            metadata: ReportMetadata {
                source_file: source_file.into(),
                text_source,
                character_count,
                processing_time_ms,
                generated_at: Utc::now(),
                parser_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            result,
        }
    }

    /// File name of the source, falling back to the full path
    pub fn source_name(&self) -> String {
        Path::new(&self.metadata.source_file)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.metadata.source_file.clone())
    }

    /// Candidate name when one was found, else the file name
    pub fn display_title(&self) -> String {
        self.result
            .contact
            .name
            .clone()
            .unwrap_or_else(|| self.source_name())
    }
}
