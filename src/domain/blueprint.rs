//! Blueprint types produced by planning and consumed by code generation

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extract::sections;

/// A planned project: the plan body plus per-file instructions
///
/// Produced once from the raw planning response and immutable afterwards.
/// The plan body is read by the persister and by every code-generation
/// request; the instruction set drives the fan-out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectBlueprint {
    /// Free-text narrative plan (empty when the `plan` tag was missing)
    pub plan: String,

    /// Ordered per-file instructions
    pub files: FileInstructionSet,
}

impl ProjectBlueprint {
    /// Parse a raw planning response into a blueprint.
    ///
    /// Every tag-delimited section is consumed: a section named `plan`
    /// becomes the plan body, everything else becomes a file instruction
    /// entry keyed by tag name. Missing sections degrade to empty content,
    /// never an error.
    pub fn from_response(text: &str) -> Self {
        let mut plan = String::new();
        let mut files = FileInstructionSet::default();

        for section in sections(text) {
            if section.name == "plan" {
                plan = section.body.to_string();
            } else {
                files.insert(section.name, section.body);
            }
        }

        debug!(file_count = files.len(), plan_len = plan.len(), "parsed planning response");
        Self { plan, files }
    }
}

/// Instructions for a single planned file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInstruction {
    /// File identifier - may contain `/` separators (e.g. `src/app.py`)
    pub path: String,

    /// Free-text instructions for writing this file
    pub body: String,
}

/// Ordered mapping from file identifier to instructions
///
/// Keys are unique and discovery order is preserved. Inserting an existing
/// key replaces the stored instructions in place (last write wins, position
/// of first discovery kept). The overwrite behavior is intentional and
/// pinned by test.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileInstructionSet {
    entries: Vec<FileInstruction>,
}

impl FileInstructionSet {
    /// Insert or overwrite the instructions for a file identifier
    pub fn insert(&mut self, path: impl Into<String>, body: impl Into<String>) {
        let path = path.into();
        let body = body.into();

        if let Some(existing) = self.entries.iter_mut().find(|e| e.path == path) {
            debug!(%path, "duplicate file tag, overwriting earlier instructions");
            existing.body = body;
        } else {
            self.entries.push(FileInstruction { path, body });
        }
    }

    /// Look up instructions by file identifier
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.iter().find(|e| e.path == path).map(|e| e.body.as_str())
    }

    /// Iterate entries in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &FileInstruction> {
        self.entries.iter()
    }

    /// File identifiers in discovery order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a FileInstructionSet {
    type Item = &'a FileInstruction;
    type IntoIter = std::slice::Iter<'a, FileInstruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// One generated source file, paired with its identifier
///
/// Content may be empty when extraction missed; the file is still written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// File identifier, also the output path relative to the project root
    pub path: String,

    /// Extracted source text
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_plan_and_files() {
        let text = "<plan>P</plan><a.py>CODE_A</a.py><b.py>CODE_B</b.py>";
        let blueprint = ProjectBlueprint::from_response(text);

        assert_eq!(blueprint.plan, "P");
        assert_eq!(blueprint.files.len(), 2);
        assert_eq!(blueprint.files.get("a.py"), Some("CODE_A"));
        assert_eq!(blueprint.files.get("b.py"), Some("CODE_B"));
        // plan is not a file entry
        assert_eq!(blueprint.files.get("plan"), None);
    }

    #[test]
    fn test_from_response_missing_plan_degrades_to_empty() {
        let blueprint = ProjectBlueprint::from_response("<a.py>A</a.py>");
        assert!(blueprint.plan.is_empty());
        assert_eq!(blueprint.files.len(), 1);
    }

    #[test]
    fn test_from_response_no_sections() {
        let blueprint = ProjectBlueprint::from_response("the model ignored the format");
        assert!(blueprint.plan.is_empty());
        assert!(blueprint.files.is_empty());
    }

    #[test]
    fn test_duplicate_tag_last_write_wins() {
        // Pinned: duplicate tags overwrite, they do not error or duplicate
        let text = "<a.py>first</a.py><b.py>B</b.py><a.py>second</a.py>";
        let blueprint = ProjectBlueprint::from_response(text);

        assert_eq!(blueprint.files.len(), 2);
        assert_eq!(blueprint.files.get("a.py"), Some("second"));
        // first-discovery position is kept
        let paths: Vec<_> = blueprint.files.paths().collect();
        assert_eq!(paths, vec!["a.py", "b.py"]);
    }

    #[test]
    fn test_instruction_set_preserves_discovery_order() {
        let mut set = FileInstructionSet::default();
        set.insert("z.py", "Z");
        set.insert("a.py", "A");
        set.insert("m/n.py", "N");

        let paths: Vec<_> = set.paths().collect();
        assert_eq!(paths, vec!["z.py", "a.py", "m/n.py"]);
    }

    #[test]
    fn test_slash_qualified_identifiers() {
        let text = "<plan>P</plan><src/app.py>APP</src/app.py>";
        let blueprint = ProjectBlueprint::from_response(text);
        assert_eq!(blueprint.files.get("src/app.py"), Some("APP"));
    }
}
