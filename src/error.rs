//! Error types for loading and saving drawings.

use std::path::PathBuf;
use thiserror::Error;

/// A drawing could not be decoded from its text or binary form.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The input ended while a value was still expected.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    /// A token could not be read as the expected value.
    #[error("token {index} ('{token}'): expected {expected}")]
    UnexpectedToken {
        index: usize,
        token: String,
        expected: &'static str,
    },

    /// The shape type keyword is not one of `line`, `rect`, `oval`, `shapegroup`.
    #[error("unknown shape type '{0}'")]
    UnknownShapeType(String),

    /// A binary record starts with a tag that names no shape type.
    #[error("invalid shape tag 0x{tag:02x} at byte {offset}")]
    InvalidTag { tag: u8, offset: usize },

    /// Groups are nested deeper than the readers allow.
    #[error("groups nested {depth} deep, limit is {limit}", limit = crate::model::MAX_GROUP_DEPTH)]
    NestingTooDeep { depth: usize },

    /// Bytes or tokens remain after the declared number of shapes.
    #[error("trailing data after {shapes} shape(s)")]
    TrailingData { shapes: usize },
}

/// Failure of a document-level load or save.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed drawing {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

impl DocumentError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn format(path: &std::path::Path, source: FormatError) -> Self {
        Self::Format {
            path: path.to_path_buf(),
            source,
        }
    }
}
