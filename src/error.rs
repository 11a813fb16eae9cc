//! Error types for the tfidf-cloud pipeline.
//!
//! Every fallible operation returns [`Result`], whose error is the single
//! [`Error`] enum below. Variants carry the path involved so that log lines
//! point at the file that caused them.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The main error type for tfidf-cloud operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O failure on a specific file or directory
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The stopword list could not be loaded
    #[error("cannot load stopwords from {path}: {source}")]
    Stopwords {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The segmentation dictionary could not be loaded
    #[error("cannot load dictionary from {path}: {source}")]
    Dictionary {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid regex pattern in the text cleaner
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// The morphological analyzer could not be set up
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// A rendering asset (font) is missing
    #[error("missing rendering asset: {0}")]
    MissingAsset(PathBuf),

    /// Rendering failed for another reason
    #[error("Render error: {0}")]
    Render(String),

    /// Corpus statistics were fed inconsistent counts
    #[error("Invariant violated: {0}")]
    Invariant(String),
}

/// Result type alias for operations that may fail with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub fn io<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        Error::Analysis(msg.into())
    }

    /// Create a new render error.
    pub fn render<S: Into<String>>(msg: S) -> Self {
        Error::Render(msg.into())
    }

    /// Create a new invariant error.
    pub fn invariant<S: Into<String>>(msg: S) -> Self {
        Error::Invariant(msg.into())
    }
}
