use thiserror::Error;

use crate::host::ScopeLabel;

/// Why a command produced no edit. Every variant leaves the buffer untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A comment, docstring or signature boundary could not be located.
    #[error("no {what} found{}", within(.limit))]
    BoundaryNotFound {
        what: &'static str,
        /// Line window the scan was capped at, for bounded scans.
        limit: Option<usize>,
    },

    /// The cursor is not in a construct the command can operate on.
    #[error("nothing to do here: cursor is in {0:?} scope")]
    InoperableScope(ScopeLabel),

    /// A signature was found but its parameter list does not parse.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),
}

impl Error {
    pub(crate) const fn not_found(what: &'static str) -> Self {
        Self::BoundaryNotFound { what, limit: None }
    }

    pub(crate) const fn not_found_within(what: &'static str, lines: usize) -> Self {
        Self::BoundaryNotFound {
            what,
            limit: Some(lines),
        }
    }
}

fn within(limit: &Option<usize>) -> String {
    limit.map_or_else(String::new, |n| format!(" within {n} lines"))
}

pub type Result<T> = std::result::Result<T, Error>;
