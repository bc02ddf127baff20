//! PlanGenerator - turns a project description into a blueprint
//!
//! One blocking request to the planning backend, then tagged-response
//! extraction. No retries: a backend failure here is fatal for the run.

use std::sync::Arc;

use eyre::{Context, Result};
use tracing::{info, warn};

use crate::domain::ProjectBlueprint;
use crate::llm::{CompletionRequest, LlmClient, Message};
use crate::prompts::{PlanContext, PromptLoader};

/// PlanGenerator builds the planning prompt and parses the response
pub struct PlanGenerator {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
    max_tokens: u32,
}

impl PlanGenerator {
    /// Create a new generator
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>, max_tokens: u32) -> Self {
        Self { llm, prompts, max_tokens }
    }

    /// Generate a blueprint from the user's project description.
    ///
    /// The prompt instructs the model to wrap the overall plan in a `plan`
    /// tag and each file's instructions in a tag named after the file's
    /// path, with every file's instructions self-sufficient. Missing
    /// sections in the response degrade to empty content with a warning;
    /// only a backend error aborts.
    pub async fn generate(&self, description: &str) -> Result<ProjectBlueprint> {
        let context = PlanContext { description };
        let request = CompletionRequest {
            system_prompt: self.prompts.render("plan-system", &context)?,
            messages: vec![Message::user(self.prompts.render("plan-user", &context)?)],
            max_tokens: self.max_tokens,
        };

        info!("Requesting project plan from the planning backend");
        let response = self
            .llm
            .complete(request)
            .await
            .context("Planning request failed")?;

        info!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Planner responded"
        );

        let raw = response.content.unwrap_or_default();
        let blueprint = ProjectBlueprint::from_response(&raw);

        if blueprint.plan.is_empty() {
            warn!("Planner response contained no <plan> section");
        }
        if blueprint.files.is_empty() {
            warn!("Planner response contained no file instruction sections");
        }

        info!(file_count = blueprint.files.len(), "Parsed {} file instructions", blueprint.files.len());
        Ok(blueprint)
    }
}
