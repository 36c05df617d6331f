use std::error::Error;
use std::fmt;

/// Errors surfaced by the pantry and shopping-list stores.
#[derive(Debug)]
pub enum StoreError {
    /// Missing or unparseable user input (name, quantity, selection size).
    Validation(String),
    /// Read or write failure against the key-value store.
    Storage(std::io::Error),
    /// Corrupt persisted payload.
    Serialization(serde_json::Error),
    /// An operation referenced an id that is not in the collection.
    NotFound(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Validation(msg) => write!(f, "Invalid input: {}", msg),
            StoreError::Storage(err) => write!(f, "Storage error: {}", err),
            StoreError::Serialization(err) => {
                write!(f, "Stored data could not be decoded: {}", err)
            }
            StoreError::NotFound(id) => write!(f, "No entry with id '{}'", id),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::Storage(err) => Some(err),
            StoreError::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Storage(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err)
    }
}
