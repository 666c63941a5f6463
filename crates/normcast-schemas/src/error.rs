//! Error types for schema backend construction and evaluation

use thiserror::Error;

/// Errors produced while building or invoking a schema backend
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema document itself could not be compiled
    #[error("schema compilation failed: {message}")]
    Compile { message: String },

    /// The backend failed in a way outside its documented error shape
    #[error("schema backend failure: {message}")]
    Backend { message: String },
}

impl SchemaError {
    pub fn compile<M: Into<String>>(message: M) -> Self {
        Self::Compile {
            message: message.into(),
        }
    }

    pub fn backend<M: Into<String>>(message: M) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
