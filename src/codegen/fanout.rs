//! Fan-out coordinator for concurrent code generation
//!
//! Spawns one generation task per instruction entry, gated by a semaphore so
//! at most `max_concurrent` backend requests are in flight. All tasks start
//! up front; the batch is joined in spawn order, preserving the pairing
//! between identifier and result regardless of completion order. Each result
//! is written as the batch drains; the first irrecoverable failure aborts the
//! batch, leaving already-written files on disk (no rollback).

use std::sync::Arc;

use eyre::{Context, Result};
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::artifacts::ArtifactStore;
use crate::domain::{GeneratedFile, ProjectBlueprint};

use super::CodeGenerator;

/// Generate and write code for every file in the blueprint.
///
/// Returns the generated files in instruction order.
pub async fn generate_project(
    generator: Arc<CodeGenerator>,
    blueprint: &ProjectBlueprint,
    artifacts: &ArtifactStore,
    max_concurrent: usize,
) -> Result<Vec<GeneratedFile>> {
    info!(
        file_count = blueprint.files.len(),
        max_concurrent, "Starting code generation fan-out"
    );

    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let plan: Arc<str> = Arc::from(blueprint.plan.as_str());

    let mut handles = Vec::with_capacity(blueprint.files.len());
    for entry in &blueprint.files {
        let generator = Arc::clone(&generator);
        let semaphore = Arc::clone(&semaphore);
        let plan = Arc::clone(&plan);
        let file = entry.clone();

        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .context("Fan-out semaphore closed")?;
            debug!(file = %file.path, "permit acquired, requesting code");
            generator.generate(&plan, &file).await
        }));
    }

    let mut generated = Vec::with_capacity(handles.len());
    for handle in handles {
        let file = handle.await.context("Code generation task panicked")??;
        artifacts.write_generated(&file)?;
        generated.push(file);
    }

    info!(file_count = generated.len(), "Code generation complete");
    Ok(generated)
}
