// Resume builder: saved resumes live in the repository, edits go through
// per-resume drafts with optional debounced auto-save.

pub mod builder;
pub mod completeness;
pub mod handlers;
