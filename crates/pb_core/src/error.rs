use thiserror::Error;

/// Reported failure paths of the playbook engine.
///
/// Unknown presets, roles, or entity ids inside mutation operations are
/// no-ops, not errors; these variants cover the cases the caller must be
/// told about.
#[derive(Error, Debug)]
pub enum PlaybookError {
    #[error("Failed to parse import document: {0}")]
    ImportParse(String),

    #[error("Cannot delete the last remaining playbook")]
    LastPlaybook,

    #[error("Playbook not found: {0}")]
    PlaybookNotFound(String),

    #[error("Play not found: {0}")]
    PlayNotFound(String),
}

pub type Result<T> = std::result::Result<T, PlaybookError>;
