//! Errors raised while assembling a resource graph.
//!
//! These are programmer-input errors discovered at assembly time. They are raised
//! synchronously at the call site and never retried.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    #[error("resource '{name}' already exists in this graph")]
    DuplicateResource { name: String },

    #[error("name pattern failed to compile: {0}")]
    Pattern(String),
}

impl Error {
    pub(crate) fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
