//! projgen configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main projgen configuration
///
/// Two LLM sections with different roles: `planner` produces the plan and
/// per-file instructions, `coder` produces source code for one file at a
/// time. Built once at startup and handed to the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Planning backend configuration
    pub planner: LlmConfig,

    /// Coding backend configuration
    pub coder: LlmConfig,

    /// Concurrency limits for the code-generation fan-out
    pub concurrency: ConcurrencyConfig,

    /// Output locations
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            planner: LlmConfig::planner_defaults(),
            coder: LlmConfig::coder_defaults(),
            concurrency: ConcurrencyConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that both API key environment variables are set. Call this
    /// early in startup to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        for llm in [&self.planner, &self.coder] {
            if std::env::var(&llm.api_key_env).is_err() {
                return Err(eyre::eyre!(
                    "{} API key not found. Set the {} environment variable.",
                    llm.provider,
                    llm.api_key_env
                ));
            }
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .projgen.yml
        let local_config = PathBuf::from(".projgen.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/projgen/projgen.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("projgen").join("projgen.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM backend configuration (used for both planner and coder roles)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider name ("openai" or "anthropic")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl LlmConfig {
    /// Default planning backend: OpenAI reasoning model
    pub fn planner_defaults() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "o1-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: "https://api.openai.com".to_string(),
            max_tokens: 32768,
            timeout_ms: 600_000,
        }
    }

    /// Default coding backend: Anthropic Claude
    pub fn coder_defaults() -> Self {
        Self {
            provider: "anthropic".to_string(),
            model: "claude-3-5-sonnet-20240620".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 8000,
            timeout_ms: 300_000,
        }
    }

    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .context(format!("API key environment variable {} not set", self.api_key_env))
    }
}

/// Concurrency limits for the fan-out
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcurrencyConfig {
    /// Maximum concurrent code-generation requests
    #[serde(rename = "max-coders")]
    pub max_coders: usize,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self { max_coders: 8 }
    }
}

/// Output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for the plan and flattened instruction artifacts
    #[serde(rename = "artifact-dir")]
    pub artifact_dir: PathBuf,

    /// Root directory for generated project files
    #[serde(rename = "project-dir")]
    pub project_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from("project_plan"),
            project_dir: PathBuf::from("."),
        }
    }
}
