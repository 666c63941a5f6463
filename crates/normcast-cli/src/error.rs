//! CLI error type and exit codes

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error(transparent)]
    Schema(#[from] normcast_schemas::SchemaError),

    #[error(transparent)]
    Normalization(#[from] normcast_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Exit code for the process: 2 for a normalization abort (strict
    /// mode), 1 for everything else
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Normalization(_) => 2,
            _ => 1,
        }
    }
}
