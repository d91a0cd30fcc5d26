use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LorelineError {
    #[error("Note not found: {0}")]
    NoteNotFound(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),

    #[error("Invalid calendar: {0}")]
    InvalidCalendar(String),
}

pub type Result<T> = std::result::Result<T, LorelineError>;
