//! Error taxonomy.
//!
//! Three kinds of failure cross the API boundary: malformed input
//! (`Parse`), a named interface that is absent (`InterfaceNotFound` /
//! `InvalidInterfaceName`), and I/O. Consistency violations are *results*
//! reported by the analyzer, never errors.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed serialized-graph or statement-tree input. Fatal to the
    /// operation that triggered it; the caller decides whether the session
    /// survives.
    #[error("parse error in {source_name} at line {line}: {message}")]
    Parse {
        source_name: String,
        line: usize,
        message: String,
    },

    /// The named interface has no `Interface` node in the graph.
    #[error("interface not found: {0}")]
    InterfaceNotFound(String),

    /// The interface name failed validation before it was ever bound into
    /// a pattern.
    #[error("invalid interface name: {0:?}")]
    InvalidInterfaceName(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Coarse category for logs and exit codes.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Parse { .. } => "parse_error",
            Error::InterfaceNotFound(_) => "not_found",
            Error::InvalidInterfaceName(_) => "validation_error",
            Error::Io(_) => "io_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_stable() {
        let err = Error::InterfaceNotFound("eth9".into());
        assert_eq!(err.category(), "not_found");
        assert_eq!(err.to_string(), "interface not found: eth9");
    }
}
