use std::io;

use namegender_types::FrequencyError;
use thiserror::Error;

/// Why a single data line was rejected.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("line has {found} bytes, expected at least {expected}")]
    LineTooShort { expected: usize, found: usize },
    #[error("unrecognized gender tag {0:?}")]
    UnknownGenderTag(String),
    #[error("empty name field")]
    EmptyName,
    #[error(transparent)]
    Frequency(#[from] FrequencyError),
}

#[derive(Debug, Error)]
pub enum DatasetError {
    /// The table could not be opened, read or decompressed.
    #[error("dataset unavailable at {origin}: {source}")]
    Unavailable {
        origin: String,
        #[source]
        source: io::Error,
    },
    /// A data line violated the fixed-column layout (1-based line number).
    #[error("malformed record at line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: RecordError,
    },
}

impl DatasetError {
    pub(crate) fn unavailable(origin: impl Into<String>, source: io::Error) -> Self {
        DatasetError::Unavailable {
            origin: origin.into(),
            source,
        }
    }
}
