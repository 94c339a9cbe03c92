//! Output formatters for extraction reports

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{Result, ResumeParserError};
use crate::output::report::ExtractionReport;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting extraction reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ExtractionReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colored headings
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for downstream tooling
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Dispatches a report to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{{ title }}</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 820px; margin: 0 auto; padding: 20px; color: #333; }
        h1 { border-bottom: 3px solid #007acc; padding-bottom: 10px; }
        h2 { color: #007acc; border-bottom: 1px solid #e9ecef; padding-bottom: 6px; }
        pre { background: #f8f9fa; padding: 12px; border-radius: 6px; white-space: pre-wrap; }
        .meta { color: #6c757d; font-size: 0.9em; }
        .missing { color: #adb5bd; font-style: italic; }
    </style>
    {% endif %}
</head>
<body>
    <h1>{{ title }}</h1>
    <p class="meta">{{ source_file }} &middot; {{ generated_at }} &middot; resume-parser {{ version }}</p>

    <h2>Contact</h2>
    <ul>
        <li>Name: {% if has_name %}{{ name }}{% else %}<span class="missing">not found</span>{% endif %}</li>
        <li>Phone: {% if has_phone %}{{ phone }}{% else %}<span class="missing">not found</span>{% endif %}</li>
        <li>Email: {% if has_emails %}{{ emails }}{% else %}<span class="missing">not found</span>{% endif %}</li>
    </ul>

    {% if has_skills %}
    <h2>Detected Skills</h2>
    <ul>
    {% for skill in skills %}
        <li>{{ skill }}</li>
    {% endfor %}
    </ul>
    {% endif %}

    {% for section in sections %}
    <h2>{{ section.title }}</h2>
    <pre>{{ section.body }}</pre>
    {% endfor %}

    {% if has_details %}
    <h2>Education Details</h2>
    <ul>
    {% for detail in details %}
        <li><strong>{{ detail.level }}</strong>: {{ detail.text }}</li>
    {% endfor %}
    </ul>
    {% endif %}
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    title: String,
    source_file: String,
    generated_at: String,
    version: String,
    has_name: bool,
    name: String,
    has_phone: bool,
    phone: String,
    has_emails: bool,
    emails: String,
    has_skills: bool,
    skills: Vec<String>,
    sections: Vec<HtmlSection>,
    has_details: bool,
    details: Vec<HtmlDetail>,
}

struct HtmlSection {
    title: String,
    body: String,
}

struct HtmlDetail {
    level: String,
    text: String,
}

fn timestamp(report: &ExtractionReport) -> String {
    report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_field(&self, label: &str, value: Option<&str>) -> String {
        match value {
            Some(v) if !v.is_empty() => format!("{}: {}\n", label, v),
            _ => format!("{}: {}\n", label, self.colorize("not found", Color::BrightBlack)),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ExtractionReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header(&format!("RESUME: {}", report.source_name()), 1));

        output.push_str(&self.format_header("Contact", 2));
        output.push_str(&self.format_field("Name", result.contact.name.as_deref()));
        output.push_str(&self.format_field("Phone", result.contact.phone.as_deref()));
        let emails = result.contact.emails.join(", ");
        output.push_str(&self.format_field("Email", Some(emails.as_str())));

        if !result.skills.is_empty() {
            output.push_str(&self.format_header("Detected Skills", 2));
            for skill in &result.skills {
                output.push_str(&format!("  • {}\n", skill));
            }
        }

        for (key, text) in result.non_empty_sections() {
            output.push_str(&self.format_header(key.title(), 2));
            output.push_str(text);
            output.push('\n');
        }

        if self.detailed {
            if !result.education_details.is_empty() {
                output.push_str(&self.format_header("Education Details", 3));
                for detail in &result.education_details {
                    output.push_str(&format!(
                        "  {} {}\n",
                        self.colorize(&format!("[{}]", detail.level), Color::Cyan),
                        detail.text
                    ));
                }
            }

            output.push_str(&self.format_header("Metadata", 3));
            output.push_str(&format!(
                "Generated: {} | Processing time: {}ms\n",
                timestamp(report),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "Text source: {:?} ({} characters)\n",
                report.metadata.text_source, report.metadata.character_count
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ExtractionReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ExtractionReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", report.display_title()));

        if self.include_metadata {
            output.push_str(&format!(
                "**Source:** `{}` | **Generated:** {} | **Text:** {:?}\n\n",
                report.source_name(),
                timestamp(report),
                report.metadata.text_source
            ));
        }

        output.push_str("## Contact\n\n");
        output.push_str(&format!(
            "- **Name:** {}\n",
            result.contact.name.as_deref().unwrap_or("_not found_")
        ));
        output.push_str(&format!(
            "- **Phone:** {}\n",
            result.contact.phone.as_deref().unwrap_or("_not found_")
        ));
        if result.contact.emails.is_empty() {
            output.push_str("- **Email:** _not found_\n\n");
        } else {
            output.push_str(&format!("- **Email:** {}\n\n", result.contact.emails.join(", ")));
        }

        if !result.skills.is_empty() {
            output.push_str("## Detected Skills\n\n");
            for skill in &result.skills {
                output.push_str(&format!("- {}\n", skill));
            }
            output.push('\n');
        }

        for (key, text) in result.non_empty_sections() {
            output.push_str(&format!("## {}\n\n```text\n{}\n```\n\n", key.title(), text));
        }

        if !result.education_details.is_empty() {
            output.push_str("## Education Details\n\n| Level | Text |\n|-------|------|\n");
            for detail in &result.education_details {
                output.push_str(&format!("| {} | {} |\n", detail.level, detail.text.replace('|', "\\|")));
            }
            output.push('\n');
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &ExtractionReport) -> HtmlTemplate {
        let result = &report.result;
        let contact = &result.contact;

        HtmlTemplate {
            include_styles: self.include_styles,
            title: report.display_title(),
            source_file: report.source_name(),
            generated_at: timestamp(report),
            version: report.metadata.parser_version.clone(),
            has_name: contact.name.is_some(),
            name: contact.name.clone().unwrap_or_default(),
            has_phone: contact.phone.is_some(),
            phone: contact.phone.clone().unwrap_or_default(),
            has_emails: !contact.emails.is_empty(),
            emails: contact.emails.join(", "),
            has_skills: !result.skills.is_empty(),
            skills: result.skills.clone(),
            sections: result
                .non_empty_sections()
                .map(|(key, text)| HtmlSection {
                    title: key.title().to_string(),
                    body: text.to_string(),
                })
                .collect(),
            has_details: !result.education_details.is_empty(),
            details: result
                .education_details
                .iter()
                .map(|d| HtmlDetail {
                    level: d.level.to_string(),
                    text: d.text.clone(),
                })
                .collect(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ExtractionReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ResumeParserError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::with_options(config.color_output, config.detailed, config.pretty_json, true)
    }

    pub fn generate_report(&self, report: &ExtractionReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_extraction{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_extraction{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_extraction{}.md", base_name, timestamp_suffix),
        OutputFormat::Html => format!("{}_extraction{}.html", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::ResumeExtractor;
    use crate::input::TextSource;

    fn sample_report() -> ExtractionReport {
        let text = "Jane Doe\njane@example.com\nEDUCATION\nB.Tech <Hons>\nCGPA 9.0\nSKILLS\nPython | SQL\nPROJECTS\nCLI tool";
        let result = ResumeExtractor::default().extract(text);
        ExtractionReport::new("cv/jane.pdf", TextSource::Document, text.len(), 3, result)
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, false).format_report(&sample_report()).unwrap();

        assert!(output.contains("█ RESUME: jane.pdf"));
        assert!(output.contains("Name: Jane Doe"));
        assert!(output.contains("Phone: not found"));
        assert!(output.contains("  • Python | SQL"));
        assert!(output.contains("▓ Education\nBachelor's Degree:"));
        assert!(!output.contains("Certifications"));
        assert!(!output.contains("Metadata"));
    }

    #[test]
    fn test_json_is_parseable() {
        let output = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["result"]["contact"]["name"], "Jane Doe");
        assert_eq!(value["result"]["sections"]["projects"], "PROJECTS\nCLI tool");
        assert_eq!(value["metadata"]["text_source"], "document");
    }

    #[test]
    fn test_markdown_sections_are_fenced() {
        let output = MarkdownFormatter::new(false).format_report(&sample_report()).unwrap();

        assert!(output.starts_with("# Jane Doe\n\n## Contact"));
        assert!(output.contains("- **Phone:** _not found_"));
        assert!(output.contains("## Projects\n\n```text\nPROJECTS\nCLI tool\n```"));
    }

    #[test]
    fn test_html_escapes_content() {
        let output = HtmlFormatter::new(false).format_report(&sample_report()).unwrap();

        assert!(output.contains("<title>Jane Doe</title>"));
        assert!(output.contains("B.Tech &lt;Hons&gt;"));
        assert!(!output.contains("<style>"));
    }

    #[test]
    fn test_generator_from_config() {
        let config = OutputConfig {
            detailed: true,
            color_output: false,
            ..OutputConfig::default()
        };
        let generator = ReportGenerator::from_config(&config);

        let console = generator.generate_report(&sample_report(), &OutputFormat::Console).unwrap();
        assert!(console.contains("▒ Metadata"));
        let markdown = generator.generate_report(&sample_report(), &OutputFormat::Markdown).unwrap();
        assert!(markdown.contains("**Source:** `jane.pdf`"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(&OutputFormat::Json, "cv/jane.pdf", false), "jane_extraction.json");
        assert_eq!(suggest_filename(&OutputFormat::Html, "jane.txt", false), "jane_extraction.html");
    }
}
