use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort an index build.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open corpus {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read corpus line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// A corpus line that cannot be indexed. Skipped during the build, never returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("blank line")]
    Blank,
    #[error("line is not valid UTF-8")]
    Encoding,
    #[error("verse text contains no words")]
    NoWords,
    #[error("expected 4 fields, found {0}")]
    FieldCount(usize),
    #[error("invalid chapter number {0:?}")]
    Chapter(String),
    #[error("invalid verse number {0:?}")]
    Verse(String),
    #[error("duplicate location {0}")]
    DuplicateLocation(String),
}
