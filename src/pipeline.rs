//! Pipeline - the one context object the whole run flows through
//!
//! Built once from [`Config`], holding both backend clients, the prompt
//! loader, the artifact store, and the fan-out bound. Components never reach
//! for globals; tests construct a pipeline with scripted clients instead.

use std::sync::Arc;

use eyre::Result;
use tracing::info;

use crate::artifacts::ArtifactStore;
use crate::codegen::{CodeGenerator, generate_project};
use crate::config::Config;
use crate::domain::{GeneratedFile, ProjectBlueprint};
use crate::llm::{LlmClient, create_client};
use crate::planning::PlanGenerator;
use crate::prompts::PromptLoader;

/// Outcome of a full pipeline run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// The parsed blueprint (already persisted to the artifact directory)
    pub blueprint: ProjectBlueprint,

    /// Generated files, in instruction order (empty in plan-only runs)
    pub generated: Vec<GeneratedFile>,
}

/// Orchestrates planning, artifact persistence, and code generation
pub struct Pipeline {
    planner: PlanGenerator,
    coder: Arc<CodeGenerator>,
    artifacts: ArtifactStore,
    max_coders: usize,
}

impl Pipeline {
    /// Build the pipeline from configuration, creating both backend clients
    pub fn from_config(config: &Config) -> Result<Self> {
        let planner_client = create_client(&config.planner)?;
        let coder_client = create_client(&config.coder)?;
        Ok(Self::with_clients(planner_client, coder_client, config))
    }

    /// Build the pipeline with explicit clients (the test seam)
    pub fn with_clients(planner: Arc<dyn LlmClient>, coder: Arc<dyn LlmClient>, config: &Config) -> Self {
        let prompts = Arc::new(PromptLoader::new("."));

        Self {
            planner: PlanGenerator::new(planner, Arc::clone(&prompts), config.planner.max_tokens),
            coder: Arc::new(CodeGenerator::new(coder, prompts, config.coder.max_tokens)),
            artifacts: ArtifactStore::new(&config.output.artifact_dir, &config.output.project_dir),
            max_coders: config.concurrency.max_coders,
        }
    }

    /// Plan the project and persist the plan + instruction artifacts.
    ///
    /// This is the full run for `--plan-only`.
    pub async fn plan(&self, description: &str) -> Result<ProjectBlueprint> {
        let blueprint = self.planner.generate(description).await?;
        self.artifacts.persist_blueprint(&blueprint)?;
        Ok(blueprint)
    }

    /// Generate and write code for every file in a blueprint
    pub async fn build(&self, blueprint: &ProjectBlueprint) -> Result<Vec<GeneratedFile>> {
        generate_project(Arc::clone(&self.coder), blueprint, &self.artifacts, self.max_coders).await
    }

    /// Run the whole pipeline: plan, persist, fan out, write
    pub async fn run(&self, description: &str) -> Result<PipelineReport> {
        let blueprint = self.plan(description).await?;
        info!(file_count = blueprint.files.len(), "Blueprint persisted, starting code generation");

        let generated = self.build(&blueprint).await?;

        Ok(PipelineReport { blueprint, generated })
    }

    /// The artifact store this pipeline writes through
    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }
}
