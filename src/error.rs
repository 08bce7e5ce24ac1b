use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Invalid snapshot: expected a JSON array of notes, found {0}")]
    SnapshotNotArray(String),

    #[error("Invalid snapshot: duplicate note id '{0}'")]
    DuplicateNoteId(String),

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, BoardError>;
