//! Latest command handler.

use crate::render::{render, OutputFormat};
use clap::Args;
use promptreg_core::{config::AppConfig, AppResult};
use promptreg_prompt::PromptRegistry;

/// Show the latest version of a workflow's prompt
#[derive(Args, Debug)]
pub struct LatestCommand {
    /// Workflow name
    pub workflow: String,

    /// Output format
    #[arg(long, value_enum, default_value = "summary")]
    pub format: OutputFormat,
}

impl LatestCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing latest command for workflow '{}'", self.workflow);

        print!("{}", self.run(config)?);
        Ok(())
    }

    /// Look up the latest version and return the rendered output.
    pub fn run(&self, config: &AppConfig) -> AppResult<String> {
        config.validate()?;

        let mut registry = PromptRegistry::with_extension(config.prompts_root(), &config.extension);
        tracing::debug!("Registry root: {:?}", registry.root());

        match registry.get_latest_version(&self.workflow) {
            Some(record) => {
                tracing::debug!("Latest version: {:?}", record.version());
                render(&[record], self.format)
            }
            None if self.format == OutputFormat::Json => Ok("null\n".to_string()),
            None => Ok(format!(
                "No prompts found for workflow '{}'.\n",
                self.workflow
            )),
        }
    }
}
