//! All error types for the droidres crate.
//!
//! These are returned from every fallible operation (parsing, walking resource
//! trees, rewriting files, rendering layouts).

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("directory walk failed: {0}")]
    Walk(#[from] ignore::Error),

    #[error("invalid file pattern: {0}")]
    Glob(#[from] globset::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("invalid locale tag `{0}`")]
    InvalidLocale(String),

    #[error("layout key at row {row}, column {column} has no matching symbol slot")]
    LayoutShape { row: usize, column: usize },

    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attaches the path of the file being processed to this error.
    ///
    /// Errors that already carry a path are returned unchanged.
    pub fn at(self, path: impl AsRef<Path>) -> Self {
        match self {
            Error::File { .. } => self,
            other => Error::File {
                path: path.as_ref().to_path_buf(),
                source: Box::new(other),
            },
        }
    }
}
