//! Domain types for project generation
//!
//! A planning response is parsed into a [`ProjectBlueprint`]: the plan body
//! plus an ordered [`FileInstructionSet`]. Code generation turns each
//! instruction entry into a [`GeneratedFile`].

mod blueprint;

pub use blueprint::{FileInstruction, FileInstructionSet, GeneratedFile, ProjectBlueprint};
