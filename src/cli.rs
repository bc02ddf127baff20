//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

/// projgen - generate a multi-file project from a one-line description
#[derive(Parser)]
#[command(
    name = "projgen",
    about = "Generate a multi-file project from a one-line description using LLM backends",
    version,
    after_help = "Requires OPENAI_API_KEY and ANTHROPIC_API_KEY (or the env vars named in config)."
)]
pub struct Cli {
    /// Project description; prompted for interactively when omitted
    pub description: Option<String>,

    /// Path to config file
    #[arg(short, long, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Generate the plan and instruction artifacts, then stop before code generation
    #[arg(long)]
    pub plan_only: bool,

    /// Maximum concurrent code-generation requests (overrides config)
    #[arg(long, value_name = "N")]
    pub max_coders: Option<usize>,

    /// Directory generated files are written under (overrides config)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}
