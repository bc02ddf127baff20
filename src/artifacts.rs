//! Artifact persistence
//!
//! Two write targets with different layouts: the artifact directory holds the
//! plan plus one flattened instructions file per planned file (path
//! separators replaced so everything lands flat), while generated code is
//! written at the identifier's own path under the project root, creating
//! subdirectories as needed. Existing files are overwritten without warning.

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use tracing::{debug, info};

use crate::domain::{GeneratedFile, ProjectBlueprint};

/// Fixed file name for the plan body inside the artifact directory
pub const PLAN_FILE: &str = "project_plan.txt";

/// Substitute for `/` in flattened instruction file names
const SEPARATOR_SUBSTITUTE: &str = "_";

/// Derive the flat instructions file name for a file identifier
///
/// `src/app.py` becomes `src_app.py_instructions.txt`, distinct from the
/// entry for a root-level `app.py`.
pub fn instructions_file_name(path: &str) -> String {
    format!("{}_instructions.txt", path.replace('/', SEPARATOR_SUBSTITUTE))
}

/// Writes plan, instruction, and generated-file artifacts
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    artifact_dir: PathBuf,
    project_dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store with the given artifact and project roots
    pub fn new(artifact_dir: impl Into<PathBuf>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifact_dir: artifact_dir.into(),
            project_dir: project_dir.into(),
        }
    }

    /// Path of the persisted plan file
    pub fn plan_path(&self) -> PathBuf {
        self.artifact_dir.join(PLAN_FILE)
    }

    /// Path of the flattened instructions file for an identifier
    pub fn instructions_path(&self, file: &str) -> PathBuf {
        self.artifact_dir.join(instructions_file_name(file))
    }

    /// Persist the plan body and one instructions file per entry.
    ///
    /// Creates the artifact directory if absent. Any filesystem failure is
    /// fatal and propagates.
    pub fn persist_blueprint(&self, blueprint: &ProjectBlueprint) -> Result<()> {
        fs::create_dir_all(&self.artifact_dir)
            .context(format!("Failed to create artifact directory {}", self.artifact_dir.display()))?;

        let plan_path = self.plan_path();
        fs::write(&plan_path, &blueprint.plan)
            .context(format!("Failed to write plan to {}", plan_path.display()))?;
        info!("Saved project plan to {}", plan_path.display());

        for entry in &blueprint.files {
            let path = self.instructions_path(&entry.path);
            fs::write(&path, &entry.body)
                .context(format!("Failed to write instructions to {}", path.display()))?;
            debug!(file = %entry.path, dest = %path.display(), "saved instructions");
        }

        info!(
            "Saved instructions for {} files to {}",
            blueprint.files.len(),
            self.artifact_dir.display()
        );
        Ok(())
    }

    /// Write one generated file at its identifier's path under the project
    /// root, creating parent directories as needed.
    ///
    /// Empty content still produces the file.
    pub fn write_generated(&self, file: &GeneratedFile) -> Result<PathBuf> {
        let dest = self.project_dir.join(&file.path);

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).context(format!("Failed to create directory {}", parent.display()))?;
        }

        fs::write(&dest, &file.content).context(format!("Failed to write {}", dest.display()))?;
        info!("Saved code to {}", dest.display());
        Ok(dest)
    }

    /// The project root generated files are written under
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }
}
