use thiserror::Error;

#[derive(Debug, Error)]
pub enum LineupError {
    #[error("no grenade cached yet: throw a grenade first, then use /autoadd, /addlastthrow, or /addnextthrow")]
    EmptyCache,

    #[error("the last grenade was thrown while moving: /autoadd cannot reposition it; use /addnextthrow (/ant) or /addlastthrow (/alt) instead")]
    MovingThrow,

    #[error("command /{command} requires {required} parameter(s); remember to wrap parameters in square brackets []")]
    MissingParameter { command: String, required: usize },

    #[error("command /{0} not recognized; type /help in chat for the command list")]
    UnknownCommand(String),

    #[error("invalid filename: {0}")]
    InvalidFilename(String),

    #[error("unsaved changes exist: use /save or /saveas to keep them, /append to merge, or /discard to drop them")]
    UnsavedChanges,

    #[error("no preset annotations available for map '{0}'")]
    NoPreset(String),

    #[error("a text annotation needs a title or a description (or both)")]
    TextNeedsContent,

    #[error("command /save takes no parameters; did you mean /saveas?")]
    SaveTakesNoParameters,

    #[error("host operation failed: {0}")]
    Host(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Coarse failure classification used at the dispatch boundary: validation
/// errors are rendered as short user-facing corrections, unexpected errors
/// are logged in full and surfaced through the diagnostic row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Unexpected,
}

impl LineupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LineupError::EmptyCache
            | LineupError::MovingThrow
            | LineupError::MissingParameter { .. }
            | LineupError::UnknownCommand(_)
            | LineupError::InvalidFilename(_)
            | LineupError::UnsavedChanges
            | LineupError::NoPreset(_)
            | LineupError::TextNeedsContent
            | LineupError::SaveTakesNoParameters => ErrorKind::Validation,
            LineupError::Host(_) | LineupError::Io(_) | LineupError::Yaml(_) => {
                ErrorKind::Unexpected
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LineupError>;
