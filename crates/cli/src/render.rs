//! Output renderers for query results.
//!
//! Each renderer is a pure function of the result sequence.

use clap::ValueEnum;
use promptreg_core::AppResult;
use promptreg_prompt::PromptRecord;
use std::fmt::Write;

const MISSING: &str = "N/A";

/// Output format for query commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    Json,
    /// Fixed-width table
    Table,
    /// Human-readable summary
    Summary,
}

/// Render `records` in the requested format.
pub fn render(records: &[&PromptRecord], format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => render_json(records),
        OutputFormat::Table => Ok(render_table(records)),
        OutputFormat::Summary => Ok(render_summary(records)),
    }
}

pub fn render_json(records: &[&PromptRecord]) -> AppResult<String> {
    let mut output = serde_json::to_string_pretty(records)?;
    output.push('\n');
    Ok(output)
}

pub fn render_table(records: &[&PromptRecord]) -> String {
    if records.is_empty() {
        return "No prompts found.\n".to_string();
    }

    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:<20} {:<10} {:<30} {:<50}",
        "Workflow", "Version", "Agent Role", "Purpose"
    );
    let _ = writeln!(output, "{}", "-".repeat(110));

    for record in records {
        let purpose: String = record.purpose().unwrap_or(MISSING).chars().take(50).collect();
        let _ = writeln!(
            output,
            "{:<20} {:<10} {:<30} {:<50}",
            record.workflow().unwrap_or(MISSING),
            record.version().unwrap_or(MISSING),
            record.agent_role().unwrap_or(MISSING),
            purpose
        );
    }

    output
}

pub fn render_summary(records: &[&PromptRecord]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Found {} prompt(s):\n", records.len());

    for record in records {
        let _ = writeln!(output, "Workflow: {}", record.workflow().unwrap_or(MISSING));
        let _ = writeln!(output, "Version: {}", record.version().unwrap_or(MISSING));
        let _ = writeln!(output, "Agent Role: {}", record.agent_role().unwrap_or(MISSING));
        let _ = writeln!(output, "Purpose: {}", record.purpose().unwrap_or(MISSING));
        let _ = writeln!(output, "File: {}", record.relative_path.display());
        if !record.tags().is_empty() {
            let _ = writeln!(output, "Tags: {}", record.tags().join(", "));
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptreg_prompt::PromptMetadata;
    use std::path::PathBuf;

    fn record(workflow: Option<&str>, purpose: Option<&str>, tags: Option<&[&str]>) -> PromptRecord {
        PromptRecord {
            file_path: PathBuf::from("/prompts/cv/a.txt"),
            relative_path: PathBuf::from("cv/a.txt"),
            content: "Body".to_string(),
            metadata: PromptMetadata {
                workflow: workflow.map(str::to_string),
                version: Some("v1".to_string()),
                purpose: purpose.map(str::to_string),
                tags: tags.map(|t| t.iter().map(|s| s.to_string()).collect()),
                ..PromptMetadata::default()
            },
        }
    }

    #[test]
    fn test_summary() {
        let a = record(Some("cv_enhancer"), Some("Resume Enhancer"), Some(&["resume", "cv"]));
        let b = record(None, None, None);
        let output = render_summary(&[&a, &b]);

        assert!(output.starts_with("Found 2 prompt(s):\n\n"));
        assert!(output.contains("Workflow: cv_enhancer\n"));
        assert!(output.contains("Tags: resume, cv\n"));
        assert!(output.contains("Workflow: N/A\n"));
        assert!(output.contains("File: cv/a.txt\n"));
        assert_eq!(output.matches("Tags:").count(), 1);
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(render_summary(&[]), "Found 0 prompt(s):\n\n");
    }

    #[test]
    fn test_table() {
        let long_purpose = "p".repeat(80);
        let a = record(Some("cv_enhancer"), Some(&long_purpose), None);
        let output = render_table(&[&a]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Workflow             Version    Agent Role"));
        assert_eq!(lines[1], "-".repeat(110));
        assert!(lines[2].starts_with("cv_enhancer          v1         N/A"));
        assert!(lines[2].ends_with(&"p".repeat(50)));
        assert!(!lines[2].contains(&"p".repeat(51)));
    }

    #[test]
    fn test_table_empty() {
        assert_eq!(render_table(&[]), "No prompts found.\n");
    }

    #[test]
    fn test_json() {
        let a = record(Some("cv_enhancer"), None, Some(&["resume"]));
        let output = render(&[&a], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value[0]["workflow"], "cv_enhancer");
        assert_eq!(value[0]["relative_path"], "cv/a.txt");
        assert_eq!(value[0]["tags"][0], "resume");
    }
}
