//! Prompt Loader
//!
//! Loads prompt templates from files or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;

/// Context for rendering the planning templates
#[derive(Debug, Clone, Serialize)]
pub struct PlanContext<'a> {
    /// The user's one-line project description
    pub description: &'a str,
}

/// Context for rendering the code-generation templates
#[derive(Debug, Clone, Serialize)]
pub struct CodeContext<'a> {
    /// The plan body from the blueprint
    pub plan: &'a str,
    /// File identifier, also the response tag name
    pub file_name: &'a str,
    /// Instructions for this file
    pub instructions: &'a str,
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (`.projgen/prompts/`)
    override_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new prompt loader rooted at the working directory
    ///
    /// Templates in `.projgen/prompts/{name}.pmt` override the embedded
    /// defaults.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let override_dir = root.as_ref().join(".projgen/prompts");

        Self {
            hbs: Handlebars::new(),
            override_dir: if override_dir.exists() { Some(override_dir) } else { None },
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        Self {
            hbs: Handlebars::new(),
            override_dir: None,
        }
    }

    /// Load a template by name
    ///
    /// Checks the override directory first, then the embedded fallback.
    fn load_template(&self, name: &str) -> Result<String> {
        if let Some(ref dir) = self.override_dir {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!("Loading prompt from override: {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!("Using embedded prompt: {}", name);
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render<C: Serialize>(&self, template_name: &str, context: &C) -> Result<String> {
        let template = self.load_template(template_name)?;

        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plan_user() {
        let loader = PromptLoader::embedded_only();
        let rendered = loader
            .render("plan-user", &PlanContext { description: "a chess engine" })
            .unwrap();

        assert!(rendered.contains("a chess engine"));
    }

    #[test]
    fn test_render_code_user_keeps_slashes() {
        let loader = PromptLoader::embedded_only();
        let rendered = loader
            .render(
                "code-user",
                &CodeContext {
                    plan: "the plan",
                    file_name: "src/app.py",
                    instructions: "do the thing",
                },
            )
            .unwrap();

        // Triple-stache rendering: no HTML escaping of the '/' in the tag
        assert!(rendered.contains("<src/app.py></src/app.py>"));
        assert!(rendered.contains("the plan"));
        assert!(rendered.contains("do the thing"));
    }

    #[test]
    fn test_unknown_template_errors() {
        let loader = PromptLoader::embedded_only();
        let result = loader.render("nonexistent-template", &PlanContext { description: "x" });
        assert!(result.is_err());
    }

    #[test]
    fn test_override_dir_wins() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join(".projgen/prompts");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("plan-user.pmt"), "CUSTOM: {{{description}}}").unwrap();

        let loader = PromptLoader::new(tmp.path());
        let rendered = loader
            .render("plan-user", &PlanContext { description: "a todo app" })
            .unwrap();

        assert_eq!(rendered, "CUSTOM: a todo app");
    }
}
