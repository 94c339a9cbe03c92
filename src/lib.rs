//! Resume parser library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod extraction;
pub mod output;

pub use error::{Result, ResumeParserError};
pub use config::Config;
pub use extraction::{ExtractionResult, ResumeExtractor, SectionKey};
