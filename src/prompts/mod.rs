//! Prompt templates for the two backends
//!
//! Handlebars templates with embedded defaults and per-project overrides
//! under `.projgen/prompts/`.

pub mod embedded;
mod loader;

pub use loader::{CodeContext, PlanContext, PromptLoader};
