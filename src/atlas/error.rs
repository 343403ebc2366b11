//! Error types

use std::path::PathBuf;

/// A rule broken by the player's nation, which ends the game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// Nothing was submitted.
    #[error("Nation name cannot be empty.")]
    Empty,

    /// The nation was already named this game.
    #[error("\"{0}\" has already been used. You lost!")]
    AlreadyUsed(String),

    /// The nation isn't in the catalog.
    #[error("\"{0}\" is not a valid nation. You lost!")]
    UnknownNation(String),

    /// The nation doesn't begin with the required letter.
    #[error("Must start with \"{}\". You lost!", .0.to_ascii_uppercase())]
    WrongLetter(char),
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog")]
    Malformed(#[from] serde_json::Error),
    #[error("catalog is empty")]
    Empty,
    #[error("catalog contains a blank name")]
    BlankName,
    #[error("catalog lists {0:?} more than once")]
    Duplicate(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access store {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed store")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("username cannot be empty")]
    EmptyName,
    #[error("{0} is a guest")]
    Guest(String),
    #[error("user '{0}' not found")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// How a [`ServiceError`] should be reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request was malformed or broke a rule.
    BadRequest,
    /// The request named something that doesn't exist.
    NotFound,
    /// The server failed to complete the request.
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Lost(#[from] Violation),
    #[error("Username cannot be empty.")]
    EmptyName,
    #[error("The guest player cannot be scored or deleted.")]
    Guest,
    #[error("User '{0}' not found.")]
    UnknownPlayer(String),
    #[error("A hint needs exactly one letter, not {0:?}.")]
    InvalidLetter(String),
    #[error("No unused nation starts with \"{}\".", .0.to_ascii_uppercase())]
    NoHint(char),
    #[error("Failed to save game data.")]
    Store(#[from] StoreError),
}

impl From<LedgerError> for ServiceError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::EmptyName => ServiceError::EmptyName,
            LedgerError::Guest(_) => ServiceError::Guest,
            LedgerError::NotFound(name) => ServiceError::UnknownPlayer(name),
            LedgerError::Store(err) => ServiceError::Store(err),
        }
    }
}

impl ServiceError {
    /// Classifies the error for the caller.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Lost(_)
            | ServiceError::EmptyName
            | ServiceError::Guest
            | ServiceError::InvalidLetter(_) => ErrorKind::BadRequest,
            ServiceError::UnknownPlayer(_) | ServiceError::NoHint(_) => ErrorKind::NotFound,
            ServiceError::Store(_) => ErrorKind::Internal,
        }
    }

    /// Returns true if the error ended the game.
    pub fn game_over(&self) -> bool {
        matches!(self, ServiceError::Lost(_))
    }
}
