use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PersistError>;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("store io error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed record on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("invalid options: {0}")]
    Options(String),
}

impl PersistError {
    pub(crate) fn parse(line: usize, reason: impl ToString) -> Self {
        PersistError::Parse {
            line,
            reason: reason.to_string(),
        }
    }
}
