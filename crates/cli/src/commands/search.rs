//! Search command handler.
//!
//! Filters the prompt registry by header metadata.

use crate::render::{render, OutputFormat};
use clap::Args;
use promptreg_core::{config::AppConfig, AppResult};
use promptreg_prompt::{PromptRegistry, SearchFilter};

/// Search prompts by metadata
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// Filter by workflow name
    #[arg(long)]
    pub workflow: Option<String>,

    /// Filter by version
    #[arg(long)]
    pub version: Option<String>,

    /// Filter by purpose (substring)
    #[arg(long)]
    pub purpose: Option<String>,

    /// Filter by agent role (substring)
    #[arg(long)]
    pub agent_role: Option<String>,

    /// Filter by tags (must have ALL)
    #[arg(long, num_args = 1..)]
    pub tags: Vec<String>,

    /// Filter by model hint (substring)
    #[arg(long)]
    pub model_hint: Option<String>,

    /// Filter by creation date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub created_after: Option<String>,

    /// Filter by creation date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub created_before: Option<String>,

    /// List all prompts, ignoring filters
    #[arg(long)]
    pub list_all: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "summary")]
    pub format: OutputFormat,
}

impl SearchCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing search command");
        tracing::debug!("Search options: {:?}", self);

        print!("{}", self.run(config)?);
        Ok(())
    }

    /// Run the query and return the rendered output.
    pub fn run(&self, config: &AppConfig) -> AppResult<String> {
        config.validate()?;

        let mut registry = PromptRegistry::with_extension(config.prompts_root(), &config.extension);
        tracing::debug!("Registry root: {:?}", registry.root());

        let results = if self.list_all {
            registry.list_all().iter().collect::<Vec<_>>()
        } else {
            registry.search(&self.filter())
        };

        tracing::debug!("Search matched {} prompt(s)", results.len());
        render(&results, self.format)
    }

    fn filter(&self) -> SearchFilter {
        SearchFilter {
            workflow: self.workflow.clone(),
            version: self.version.clone(),
            purpose: self.purpose.clone(),
            agent_role: self.agent_role.clone(),
            tags: self.tags.clone(),
            model_hint: self.model_hint.clone(),
            created_after: self.created_after.clone(),
            created_before: self.created_before.clone(),
        }
    }
}
