//! projgen - LLM project scaffolder
//!
//! CLI entry point: read one line of project description, plan, persist
//! artifacts, fan out code generation, write the files.

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::info;

use projgen::cli::Cli;
use projgen::config::Config;
use projgen::pipeline::Pipeline;

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    Ok(())
}

/// Read the project description interactively (one line, once)
fn prompt_description() -> Result<String> {
    let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

    match rl.readline("Describe the project you want to create: ") {
        Ok(line) => Ok(line),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Err(eyre::eyre!("No project description given")),
        Err(err) => Err(eyre::eyre!("Readline error: {}", err)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    // Load configuration and apply CLI overrides
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(n) = cli.max_coders {
        config.concurrency.max_coders = n;
    }
    if let Some(dir) = cli.output_dir {
        config.output.project_dir = dir;
    }

    // Fail fast on missing API keys
    config.validate()?;

    info!(
        planner = %config.planner.model,
        coder = %config.coder.model,
        "projgen starting"
    );

    let description = match cli.description {
        Some(d) => d,
        None => prompt_description()?,
    };
    if description.trim().is_empty() {
        return Err(eyre::eyre!("Project description is empty"));
    }

    let pipeline = Pipeline::from_config(&config)?;

    println!("{}", "Generating project plan...".bright_cyan());
    let blueprint = pipeline.plan(&description).await?;

    println!(
        "{} plan and instructions for {} files saved to {}",
        "✓".bright_green(),
        blueprint.files.len(),
        config.output.artifact_dir.display()
    );

    if cli.plan_only {
        println!("{}", "Plan-only run, skipping code generation.".dimmed());
        return Ok(());
    }

    println!(
        "{} ({} files, up to {} concurrent requests)",
        "Generating project files...".bright_cyan(),
        blueprint.files.len(),
        config.concurrency.max_coders
    );
    let generated = pipeline.build(&blueprint).await?;

    let empty = generated.iter().filter(|f| f.content.is_empty()).count();
    println!(
        "{} generated {} files under {}",
        "✓".bright_green(),
        generated.len(),
        config.output.project_dir.display()
    );
    if empty > 0 {
        println!(
            "{} {} files had no extractable code and were written empty",
            "⚠".yellow(),
            empty
        );
    }

    Ok(())
}
