//! CLI interface for the resume parser

use crate::config::OutputFormat;
use crate::extraction::LineJoin;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// File extensions accepted as résumé input
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown"];

#[derive(Parser)]
#[command(name = "resume-parser")]
#[command(about = "Heuristic resume parser: contact details, sections and skills")]
#[command(long_about = "Extract the candidate name, phone, emails, skills and the education, certification, internship and project sections from resumes using keyword and pattern heuristics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract every field from one or more resumes
    Parse {
        /// Resume files (PDF, TXT, MD)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        format: Option<String>,

        /// Directory to write one report per resume into
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Join section lines with newlines or spaces
        #[arg(short, long)]
        join: Option<String>,

        /// Ignore table-derived text even when a sidecar exists
        #[arg(long)]
        no_tables: bool,

        /// Include education details and metadata in console output
        #[arg(short, long)]
        detailed: bool,
    },

    /// Print the raw text of a single section
    Sections {
        /// Resume file (PDF, TXT, MD)
        file: PathBuf,

        /// Section key: education, certifications, internship_experience, projects, skills
        #[arg(short, long)]
        section: String,

        /// Drop the header line that opened the section
        #[arg(long)]
        exclude_header: bool,

        /// Join section lines with newlines or spaces
        #[arg(short, long)]
        join: Option<String>,
    },

    /// List the configured section and skill keywords
    Patterns {
        /// Only show keywords for this section
        #[arg(short, long)]
        section: Option<String>,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" | "text" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

pub fn parse_line_join(join: &str) -> Result<LineJoin, String> {
    join.parse()
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_command_arguments() {
        let cli = Cli::parse_from([
            "resume-parser", "-v", "parse", "a.pdf", "b.txt", "--format", "json", "--join", "space", "--no-tables",
        ]);
        assert!(cli.verbose);

        match cli.command {
            Commands::Parse { files, format, join, no_tables, save, .. } => {
                assert_eq!(files, vec![PathBuf::from("a.pdf"), PathBuf::from("b.txt")]);
                assert_eq!(format.as_deref(), Some("json"));
                assert_eq!(join.as_deref(), Some("space"));
                assert!(no_tables);
                assert!(save.is_none());
            }
            _ => panic!("expected parse command"),
        }
    }

    #[test]
    fn test_parse_requires_a_file() {
        assert!(Cli::try_parse_from(["resume-parser", "parse"]).is_err());
    }

    #[test]
    fn test_output_formats() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_line_join() {
        assert_eq!(parse_line_join("space"), Ok(LineJoin::Space));
        assert_eq!(parse_line_join("Newline"), Ok(LineJoin::Newline));
        assert!(parse_line_join("comma").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), SUPPORTED_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), SUPPORTED_EXTENSIONS).is_err());
        assert!(validate_file_extension(Path::new("cv"), SUPPORTED_EXTENSIONS).is_err());
    }
}
