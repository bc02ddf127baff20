//! Embedded fallback prompts
//!
//! These are compiled into the binary and used when template files are not
//! found. Variables use triple braces: tag names and code bodies must not be
//! HTML-escaped.

/// System prompt for the planning request
pub const PLAN_SYSTEM: &str = r#"You are a project manager for a team of AI coders. From a user's project description you produce a detailed plan for a multi-file project.

Your response must contain:
1. A detailed project plan enclosed in <plan></plan> tags, outlining the overall structure and goals of the project.
2. For every file the project needs, instructions enclosed in tags named after the file's path: <folder/file_name></folder/file_name>, or <file_name></file_name> for files in the root folder.

Each file's instructions must be complete and self-sufficient: a developer must be able to write the file without reading any other file's instructions. Include:
- The purpose of the file
- Required imports and dependencies
- Functions or classes to be implemented
- How this file interacts with other parts of the project, in detail
- Any specific algorithms or logic to be used
- Correct and complete import statements for all required modules
- All variables, attributes, and classes that need to be defined

Be exact and precise about imports and file structure. The coders do not know the structure of other files, so specify exactly how each file is imported and used by other files, including the exact import statements to use. All files, when developed independently, must work together seamlessly in the final project.

The project is built immediately after planning; do not mention scheduling or time-based details."#;

/// User message template for the planning request
pub const PLAN_USER: &str = r#"Create the plan and per-file instructions for this project:

{{{description}}}"#;

/// System prompt for a code-generation request
pub const CODE_SYSTEM: &str = r#"You are an AI coder implementing a single file of a larger project. You receive the overall project plan and complete instructions for your file. Follow the instructions exactly, honor the plan's cross-file import conventions, and output the full, runnable code for the file - no fragments, no commentary outside the required tags."#;

/// User message template for a code-generation request
pub const CODE_USER: &str = r#"Overall project plan:

{{{plan}}}

File to implement: {{{file_name}}}

Instructions for this file:

{{{instructions}}}

Respond with the complete code for this file enclosed in <{{{file_name}}}></{{{file_name}}}> tags."#;

/// Look up an embedded template by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    match name {
        "plan-system" => Some(PLAN_SYSTEM),
        "plan-user" => Some(PLAN_USER),
        "code-system" => Some(CODE_SYSTEM),
        "code-user" => Some(CODE_USER),
        _ => None,
    }
}
