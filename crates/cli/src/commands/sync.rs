//! Sync command handler.
//!
//! Injects a prompt file into the agent node of an exported workflow.

use clap::Args;
use promptreg_core::AppResult;
use promptreg_prompt::{sync_workflow, SyncMode};
use std::path::PathBuf;

/// Inject a prompt into a workflow JSON file
#[derive(Args, Debug)]
pub struct SyncCommand {
    /// Prompt file to inject
    #[arg(long)]
    pub prompt: PathBuf,

    /// Workflow JSON file to update in place
    #[arg(long)]
    pub workflow_file: PathBuf,

    /// Inject only the prompt body (header stripped, trimmed)
    #[arg(long)]
    pub body_only: bool,
}

impl SyncCommand {
    pub fn execute(&self) -> AppResult<()> {
        tracing::info!("Executing sync command");
        tracing::debug!("Sync options: {:?}", self);

        let mode = if self.body_only {
            SyncMode::Body
        } else {
            SyncMode::Raw
        };

        let report = sync_workflow(&self.prompt, &self.workflow_file, mode)?;

        println!(
            "Updated {} with prompt from {} ({} characters).",
            report.workflow_path.display(),
            report.prompt_path.display(),
            report.characters
        );

        Ok(())
    }
}
