//! Resume parser: heuristic extraction of contact details, sections and skills

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use resume_parser::cli::{self, Cli, Commands, ConfigAction, SUPPORTED_EXTENSIONS};
use resume_parser::config::Config;
use resume_parser::error::{Result, ResumeParserError};
use resume_parser::extraction::{HeaderPolicy, ResumeExtractor, SectionKey, SegmentOptions};
use resume_parser::input::{InputManager, SourceDocument};
use resume_parser::output::{save_report_to_file, suggest_filename, ExtractionReport, ReportGenerator};
use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            Config::load_from(path)
        }
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Parse {
            files,
            format,
            save,
            join,
            no_tables,
            detailed,
        } => {
            for file in &files {
                cli::validate_file_extension(file, SUPPORTED_EXTENSIONS)
                    .map_err(|e| ResumeParserError::InvalidInput(format!("{}: {}", file.display(), e)))?;
            }

            let output_format = match format {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeParserError::InvalidInput)?,
                None => config.output.format,
            };
            let join = match join {
                Some(join) => cli::parse_line_join(&join).map_err(ResumeParserError::InvalidInput)?,
                None => config.extraction.join,
            };
            let prefer_tables = config.extraction.prefer_table_text && !no_tables;

            let extractor = Arc::new(ResumeExtractor::from_config(&config)?.with_join(join));
            let mut input_manager = InputManager::new().with_cache(config.extraction.enable_caching);

            info!("Parsing {} resume(s)", files.len());
            let mut documents = Vec::with_capacity(files.len());
            for file in &files {
                documents.push(input_manager.load_document(file).await?);
            }

            let reports = extract_all(extractor, documents, prefer_tables).await?;

            let mut output_config = config.output.clone();
            output_config.detailed |= detailed;
            let generator = ReportGenerator::from_config(&output_config);

            for report in &reports {
                let content = generator.generate_report(report, &output_format)?;

                match &save {
                    Some(dir) => {
                        let path = dir.join(suggest_filename(&output_format, &report.metadata.source_file, false));
                        save_report_to_file(&content, &path)?;
                        println!("Saved report to {}", path.display());
                    }
                    None => println!("{}", content),
                }
            }
        }

        Commands::Sections {
            file,
            section,
            exclude_header,
            join,
        } => {
            cli::validate_file_extension(&file, SUPPORTED_EXTENSIONS)
                .map_err(|e| ResumeParserError::InvalidInput(format!("{}: {}", file.display(), e)))?;

            let key: SectionKey = section.parse().map_err(ResumeParserError::InvalidInput)?;
            let join = match join {
                Some(join) => cli::parse_line_join(&join).map_err(ResumeParserError::InvalidInput)?,
                None => config.extraction.join,
            };
            let header = if exclude_header {
                HeaderPolicy::Exclude
            } else {
                HeaderPolicy::Include
            };

            let extractor = ResumeExtractor::from_config(&config)?;
            if extractor.patterns().section(key).is_none() {
                return Err(ResumeParserError::Configuration(format!(
                    "Section '{}' is not configured",
                    key.as_str()
                )));
            }

            let mut input_manager = InputManager::new().with_cache(false);
            let document = input_manager.load_document(&file).await?;
            let (text, source) = document.preferred_text(config.extraction.prefer_table_text);
            debug!("Reading {:?} text of {}", source, file.display());

            let section_text = extractor.extract_section_text(text, key, SegmentOptions::new(header, join));
            if section_text.is_empty() {
                warn!("No '{}' section found in {}", key.as_str(), file.display());
            } else {
                println!("{}", section_text);
            }
        }

        Commands::Patterns { section } => {
            let filter = match section {
                Some(section) => Some(section.parse::<SectionKey>().map_err(ResumeParserError::InvalidInput)?),
                None => None,
            };

            for patterns in &config.patterns.sections {
                if filter.map_or(true, |key| key == patterns.key) {
                    println!("{} ({:?} header):", patterns.key.as_str(), patterns.header);
                    println!("  {}", patterns.keywords.join(", "));
                }
            }

            if filter.is_none() || filter == Some(SectionKey::Skills) {
                let skills = &config.patterns.skills;
                println!("\nskill markers: {}", skills.markers.join(", "));
                println!("skill terminators: {}", skills.terminators.join(", "));
                println!("skill keywords ({}): {}", skills.keywords.len(), skills.keywords.join(", "));
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| ResumeParserError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                Config::reset()?;
                println!("Configuration reset to defaults at {}", Config::config_path().display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

/// Run extraction for every document on the blocking pool, keeping input order
async fn extract_all(
    extractor: Arc<ResumeExtractor>,
    documents: Vec<SourceDocument>,
    prefer_tables: bool,
) -> Result<Vec<ExtractionReport>> {
    let total = documents.len();
    let progress = (total > 1).then(|| {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    });

    let mut tasks = JoinSet::new();
    for (index, document) in documents.into_iter().enumerate() {
        let extractor = Arc::clone(&extractor);
        tasks.spawn_blocking(move || {
            let started = Instant::now();
            let (text, source) = document.preferred_text(prefer_tables);
            let result = extractor.extract(text);
            let report = ExtractionReport::new(
                document.path.to_string_lossy(),
                source,
                text.chars().count(),
                started.elapsed().as_millis() as u64,
                result,
            );
            (index, report)
        });
    }

    let mut reports: Vec<Option<ExtractionReport>> = (0..total).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, report) = joined?;
        if let Some(bar) = &progress {
            bar.set_message(report.source_name());
            bar.inc(1);
        }
        reports[index] = Some(report);
    }

    if let Some(bar) = progress {
        bar.finish_with_message("done");
    }

    Ok(reports.into_iter().flatten().collect())
}
