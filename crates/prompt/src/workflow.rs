//! Workflow sync: writes a prompt into the agent node of an exported
//! workflow JSON document.

use crate::frontmatter::split_front_matter;
use crate::loader::load_prompt_file;
use promptreg_core::{AppError, AppResult};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Node type of the agent whose prompt is replaced.
pub const AGENT_NODE_TYPE: &str = "@n8n/n8n-nodes-langchain.agent";

/// How the prompt text is taken from the prompt file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// The whole file, comments and header included
    #[default]
    Raw,
    /// The body only, header stripped and trimmed
    Body,
}

/// Outcome of a [`sync_workflow`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub prompt_path: PathBuf,
    pub workflow_path: PathBuf,
    /// Characters written into the agent node
    pub characters: usize,
}

/// Set the prompt text on the first agent node of `document`.
///
/// The node's `parameters` object is created when missing; its
/// `promptType` becomes `"define"` and its `text` becomes `text`.
pub fn inject_prompt(document: &mut Value, text: &str) -> AppResult<()> {
    let agent = document
        .get_mut("nodes")
        .and_then(Value::as_array_mut)
        .and_then(|nodes| {
            nodes
                .iter_mut()
                .find(|node| node.get("type").and_then(Value::as_str) == Some(AGENT_NODE_TYPE))
        })
        .ok_or_else(|| AppError::Workflow("No AI Agent node found in workflow".to_string()))?;

    let node = agent
        .as_object_mut()
        .ok_or_else(|| AppError::Workflow("Agent node is not an object".to_string()))?;

    let parameters = node
        .entry("parameters")
        .or_insert_with(|| json!({}))
        .as_object_mut()
        .ok_or_else(|| AppError::Workflow("Agent node parameters is not an object".to_string()))?;

    parameters.insert("promptType".to_string(), json!("define"));
    parameters.insert("text".to_string(), json!(text));

    Ok(())
}

/// Read a prompt file and inject it into the workflow file in place.
///
/// The workflow is rewritten as pretty-printed JSON with its key order kept.
pub fn sync_workflow(
    prompt_path: &Path,
    workflow_path: &Path,
    mode: SyncMode,
) -> AppResult<SyncReport> {
    let text = read_prompt_text(prompt_path, mode)?;

    let contents = std::fs::read_to_string(workflow_path).map_err(|e| {
        AppError::Workflow(format!(
            "Failed to read workflow file {:?}: {}",
            workflow_path, e
        ))
    })?;
    let mut document: Value = serde_json::from_str(&contents)?;

    inject_prompt(&mut document, &text)?;

    std::fs::write(workflow_path, serde_json::to_string_pretty(&document)?)?;

    let characters = text.chars().count();
    tracing::info!(
        "Synced {:?} into {:?} ({} characters)",
        prompt_path,
        workflow_path,
        characters
    );

    Ok(SyncReport {
        prompt_path: prompt_path.to_path_buf(),
        workflow_path: workflow_path.to_path_buf(),
        characters,
    })
}

fn read_prompt_text(prompt_path: &Path, mode: SyncMode) -> AppResult<String> {
    match mode {
        SyncMode::Raw => load_prompt_file(prompt_path, false).ok_or_else(|| {
            AppError::Prompt(format!("Unable to read prompt from {:?}", prompt_path))
        }),
        SyncMode::Body => {
            if !prompt_path.is_file() {
                return Err(AppError::Prompt(format!(
                    "Prompt file not found: {:?}",
                    prompt_path
                )));
            }
            let raw = std::fs::read_to_string(prompt_path)?;
            let (_, body) = split_front_matter(&raw)?;
            if body.is_empty() {
                return Err(AppError::Prompt(format!(
                    "Prompt file is empty or has no content: {:?}",
                    prompt_path
                )));
            }
            Ok(body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn workflow_json() -> Value {
        json!({
            "name": "CV Enhancer",
            "nodes": [
                { "type": "n8n-nodes-base.webhook", "name": "Webhook" },
                {
                    "type": AGENT_NODE_TYPE,
                    "name": "AI Agent",
                    "parameters": { "promptType": "auto", "options": {} }
                }
            ],
            "connections": {}
        })
    }

    #[test]
    fn test_inject_updates_agent_node() {
        let mut doc = workflow_json();
        inject_prompt(&mut doc, "Be helpful.").unwrap();

        let params = &doc["nodes"][1]["parameters"];
        assert_eq!(params["promptType"], "define");
        assert_eq!(params["text"], "Be helpful.");
        assert_eq!(params["options"], json!({}));
        assert!(doc["nodes"][0].get("parameters").is_none());
    }

    #[test]
    fn test_inject_creates_parameters() {
        let mut doc = json!({ "nodes": [{ "type": AGENT_NODE_TYPE }] });
        inject_prompt(&mut doc, "Hi").unwrap();
        assert_eq!(doc["nodes"][0]["parameters"]["text"], "Hi");
    }

    #[test]
    fn test_inject_without_agent_node() {
        let mut doc = json!({ "nodes": [{ "type": "n8n-nodes-base.set" }] });
        let result = inject_prompt(&mut doc, "Hi");
        assert!(matches!(result, Err(AppError::Workflow(_))));

        let mut doc = json!({});
        assert!(inject_prompt(&mut doc, "Hi").is_err());
    }

    #[test]
    fn test_sync_raw_keeps_whole_file() {
        let temp_dir = TempDir::new().unwrap();
        let prompt = temp_dir.path().join("prompt.txt");
        let workflow = temp_dir.path().join("workflow.json");
        fs::write(&prompt, "# keep me\nDo the task.\n").unwrap();
        fs::write(&workflow, workflow_json().to_string()).unwrap();

        let report = sync_workflow(&prompt, &workflow, SyncMode::Raw).unwrap();
        assert_eq!(report.characters, "# keep me\nDo the task.\n".len());

        let written = fs::read_to_string(&workflow).unwrap();
        let doc: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(doc["nodes"][1]["parameters"]["text"], "# keep me\nDo the task.\n");
        // Key order is preserved
        assert!(written.find("\"name\"").unwrap() < written.find("\"nodes\"").unwrap());
        assert!(written.contains("\n  \"nodes\""));
    }

    #[test]
    fn test_sync_body_strips_header() {
        let temp_dir = TempDir::new().unwrap();
        let prompt = temp_dir.path().join("master.txt");
        let workflow = temp_dir.path().join("workflow.json");
        fs::write(&prompt, "---\nworkflow: multi_agent\n---\n\n  Coordinate.  \n").unwrap();
        fs::write(&workflow, workflow_json().to_string()).unwrap();

        let report = sync_workflow(&prompt, &workflow, SyncMode::Body).unwrap();
        assert_eq!(report.characters, "Coordinate.".len());

        let doc: Value = serde_json::from_str(&fs::read_to_string(&workflow).unwrap()).unwrap();
        assert_eq!(doc["nodes"][1]["parameters"]["text"], "Coordinate.");
    }

    #[test]
    fn test_sync_body_rejects_empty_body() {
        let temp_dir = TempDir::new().unwrap();
        let prompt = temp_dir.path().join("empty.txt");
        let workflow = temp_dir.path().join("workflow.json");
        fs::write(&prompt, "---\nworkflow: x\n---\n   \n").unwrap();
        fs::write(&workflow, workflow_json().to_string()).unwrap();

        let result = sync_workflow(&prompt, &workflow, SyncMode::Body);
        assert!(matches!(result, Err(AppError::Prompt(_))));
        // Workflow left untouched
        let doc: Value = serde_json::from_str(&fs::read_to_string(&workflow).unwrap()).unwrap();
        assert_eq!(doc, workflow_json());
    }

    #[test]
    fn test_sync_missing_prompt() {
        let temp_dir = TempDir::new().unwrap();
        let workflow = temp_dir.path().join("workflow.json");
        fs::write(&workflow, workflow_json().to_string()).unwrap();

        let result = sync_workflow(&temp_dir.path().join("nope.txt"), &workflow, SyncMode::Raw);
        assert!(matches!(result, Err(AppError::Prompt(_))));
    }
}
