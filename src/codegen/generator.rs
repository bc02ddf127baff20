//! CodeGenerator - produces the source for one planned file
//!
//! One request to the coding backend per file, bounded by the configured max
//! output tokens. A missing response tag degrades to empty content with a
//! warning; a backend error propagates and fails the file.

use std::sync::Arc;

use eyre::{Context, Result};
use tracing::{debug, warn};

use crate::domain::{FileInstruction, GeneratedFile};
use crate::extract::extract_tag;
use crate::llm::{CompletionRequest, LlmClient, Message};
use crate::prompts::{CodeContext, PromptLoader};

/// CodeGenerator builds per-file coding prompts and extracts the result
pub struct CodeGenerator {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
    max_tokens: u32,
}

impl CodeGenerator {
    /// Create a new generator
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>, max_tokens: u32) -> Self {
        Self { llm, prompts, max_tokens }
    }

    /// Generate the source for one file.
    ///
    /// The response must wrap the code in a tag named exactly the file
    /// identifier. When the tag is absent the result is an empty string,
    /// never an error - the caller writes the empty file and proceeds.
    pub async fn generate(&self, plan: &str, file: &FileInstruction) -> Result<GeneratedFile> {
        debug!(file = %file.path, "Generating code");

        let context = CodeContext {
            plan,
            file_name: &file.path,
            instructions: &file.body,
        };
        let request = CompletionRequest {
            system_prompt: self.prompts.render("code-system", &context)?,
            messages: vec![Message::user(self.prompts.render("code-user", &context)?)],
            max_tokens: self.max_tokens,
        };

        let response = self
            .llm
            .complete(request)
            .await
            .context(format!("Code generation failed for {}", file.path))?;

        let raw = response.content.unwrap_or_default();
        let content = match extract_tag(&raw, &file.path) {
            Some(code) => code.to_string(),
            None => {
                warn!(file = %file.path, "Could not extract code from response, using empty content");
                String::new()
            }
        };

        Ok(GeneratedFile {
            path: file.path.clone(),
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;

    fn instruction(path: &str) -> FileInstruction {
        FileInstruction {
            path: path.to_string(),
            body: "write it".to_string(),
        }
    }

    fn generator(client: MockLlmClient) -> CodeGenerator {
        CodeGenerator::new(Arc::new(client), Arc::new(PromptLoader::embedded_only()), 8000)
    }

    #[tokio::test]
    async fn test_generate_extracts_tagged_code() {
        let client = MockLlmClient::single("Here you go:\n<app.py>print('hi')</app.py>\nDone!");

        let file = generator(client).generate("the plan", &instruction("app.py")).await.unwrap();

        assert_eq!(file.path, "app.py");
        assert_eq!(file.content, "print('hi')");
    }

    #[tokio::test]
    async fn test_generate_slash_qualified_tag() {
        let client = MockLlmClient::single("<src/app.py>import os</src/app.py>");

        let file = generator(client)
            .generate("the plan", &instruction("src/app.py"))
            .await
            .unwrap();

        assert_eq!(file.path, "src/app.py");
        assert_eq!(file.content, "import os");
    }

    #[tokio::test]
    async fn test_generate_missing_tag_returns_empty() {
        let client = MockLlmClient::single("I wrote the code but forgot the tags");

        let file = generator(client).generate("the plan", &instruction("app.py")).await.unwrap();

        assert_eq!(file.content, "");
    }

    #[tokio::test]
    async fn test_generate_backend_error_propagates() {
        let client = MockLlmClient::new(vec![]);

        let result = generator(client).generate("the plan", &instruction("app.py")).await;
        assert!(result.is_err());
    }
}
