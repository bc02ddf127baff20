//! End-to-end pipeline tests with scripted backend doubles
//!
//! These exercise the whole flow: planning response parsing, artifact
//! persistence, concurrent fan-out, and output writes - with both backends
//! replaced by test doubles.

use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use projgen::config::Config;
use projgen::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, TokenUsage};
use projgen::pipeline::Pipeline;

/// Planner double: always returns the same tagged planning response
struct ScriptedPlanner {
    response: String,
}

#[async_trait]
impl LlmClient for ScriptedPlanner {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        Ok(CompletionResponse {
            content: Some(self.response.clone()),
            usage: TokenUsage {
                input_tokens: 100,
                output_tokens: 400,
            },
        })
    }
}

/// Coder double: wraps canned code in whatever tag the prompt asks for,
/// so it works regardless of which file's request arrives first
struct EchoCoder;

fn requested_tag(request: &CompletionRequest) -> Option<String> {
    let prompt = &request.messages.first()?.content;
    let start = prompt.find("File to implement: ")? + "File to implement: ".len();
    let end = prompt[start..].find('\n')? + start;
    Some(prompt[start..end].trim().to_string())
}

#[async_trait]
impl LlmClient for EchoCoder {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let tag = requested_tag(&request).ok_or_else(|| LlmError::InvalidResponse("no file name".to_string()))?;
        Ok(CompletionResponse {
            content: Some(format!("<{tag}>code of {tag}</{tag}>")),
            usage: TokenUsage::default(),
        })
    }
}

/// Coder double: fails every request
struct FailingCoder;

#[async_trait]
impl LlmClient for FailingCoder {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        Err(LlmError::ApiError {
            status: 503,
            message: "backend down".to_string(),
        })
    }
}

fn test_config(tmp: &TempDir) -> Config {
    let mut config = Config::default();
    config.output.artifact_dir = tmp.path().join("project_plan");
    config.output.project_dir = tmp.path().join("out");
    config.concurrency.max_coders = 3;
    config
}

const PLANNING_RESPONSE: &str = "Sure! Here is the plan.\n\
    <plan>A two-file tool with shared helpers.</plan>\n\
    <main.py>Entry point; imports helpers from src/util.py via `from src.util import helper`.</main.py>\n\
    <src/util.py>Helper module exposing `helper()`.</src/util.py>\n";

#[tokio::test]
async fn test_full_run_plans_persists_and_generates() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(&tmp);

    let pipeline = Pipeline::with_clients(
        Arc::new(ScriptedPlanner {
            response: PLANNING_RESPONSE.to_string(),
        }),
        Arc::new(EchoCoder),
        &config,
    );

    let report = pipeline.run("a two-file tool").await.unwrap();

    // Blueprint parsed
    assert_eq!(report.blueprint.plan, "A two-file tool with shared helpers.");
    assert_eq!(report.blueprint.files.len(), 2);

    // Artifacts persisted: fixed plan path plus flattened instruction files
    let artifact_dir = tmp.path().join("project_plan");
    assert!(artifact_dir.join("project_plan.txt").exists());
    assert!(artifact_dir.join("main.py_instructions.txt").exists());
    assert!(artifact_dir.join("src_util.py_instructions.txt").exists());
    assert!(!artifact_dir.join("src").exists());

    // Every instruction produced exactly one output write at its own path
    assert_eq!(report.generated.len(), 2);
    let main_py = std::fs::read_to_string(tmp.path().join("out/main.py")).unwrap();
    assert_eq!(main_py, "code of main.py");
    let util_py = std::fs::read_to_string(tmp.path().join("out/src/util.py")).unwrap();
    assert_eq!(util_py, "code of src/util.py");
}

#[tokio::test]
async fn test_plan_only_persists_without_generating() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(&tmp);

    let pipeline = Pipeline::with_clients(
        Arc::new(ScriptedPlanner {
            response: PLANNING_RESPONSE.to_string(),
        }),
        Arc::new(FailingCoder), // would fail if reached
        &config,
    );

    let blueprint = pipeline.plan("a two-file tool").await.unwrap();

    assert_eq!(blueprint.files.len(), 2);
    assert!(tmp.path().join("project_plan/project_plan.txt").exists());
    assert!(!tmp.path().join("out").exists());
}

#[tokio::test]
async fn test_coder_failure_aborts_the_batch() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(&tmp);

    let pipeline = Pipeline::with_clients(
        Arc::new(ScriptedPlanner {
            response: PLANNING_RESPONSE.to_string(),
        }),
        Arc::new(FailingCoder),
        &config,
    );

    let result = pipeline.run("a two-file tool").await;
    assert!(result.is_err());

    // Planning artifacts were persisted before the fan-out failed
    assert!(tmp.path().join("project_plan/project_plan.txt").exists());
}

#[tokio::test]
async fn test_planner_without_format_yields_empty_run() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(&tmp);

    let pipeline = Pipeline::with_clients(
        Arc::new(ScriptedPlanner {
            response: "I had trouble formatting this.".to_string(),
        }),
        Arc::new(EchoCoder),
        &config,
    );

    let report = pipeline.run("a two-file tool").await.unwrap();

    // Empty plan file written, no instruction files, no generation attempted
    assert_eq!(report.generated.len(), 0);
    let plan = std::fs::read_to_string(tmp.path().join("project_plan/project_plan.txt")).unwrap();
    assert_eq!(plan, "");
}

#[tokio::test]
async fn test_duplicate_tags_generate_once() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(&tmp);

    let response = "<plan>P</plan><a.py>first</a.py><a.py>second</a.py>";
    let pipeline = Pipeline::with_clients(
        Arc::new(ScriptedPlanner {
            response: response.to_string(),
        }),
        Arc::new(EchoCoder),
        &config,
    );

    let report = pipeline.run("dup tags").await.unwrap();

    // Last write wins, one instruction entry, one generated file
    assert_eq!(report.blueprint.files.get("a.py"), Some("second"));
    assert_eq!(report.generated.len(), 1);
    let saved = std::fs::read_to_string(tmp.path().join("project_plan/a.py_instructions.txt")).unwrap();
    assert_eq!(saved, "second");
}
