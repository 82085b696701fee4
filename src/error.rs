use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum NoteGraphError {
    #[error("Update channel error: {0}")]
    Channel(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("File System error: {0}")]
    Io(String),
    #[error("Item Not Found: {0}")]
    NotFound(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for NoteGraphError {
    fn from(src: toml::de::Error) -> NoteGraphError {
        NoteGraphError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<toml::ser::Error> for NoteGraphError {
    fn from(src: toml::ser::Error) -> NoteGraphError {
        NoteGraphError::Serialization(format!("Toml serialization error: {src}"))
    }
}

impl From<JsonError> for NoteGraphError {
    fn from(src: JsonError) -> NoteGraphError {
        NoteGraphError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}

impl From<io::Error> for NoteGraphError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => NoteGraphError::NotFound(format!("{x}")),
            _ => NoteGraphError::Io(format!("IOError: {}", x.kind())),
        }
    }
}
