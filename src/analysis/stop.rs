//! Stopword and short-term filter.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Default minimum term length in characters.
pub const DEFAULT_MIN_TERM_CHARS: usize = 2;

/// A filter that removes stopwords and terms that are too short.
///
/// A term is kept when it is non-empty after trimming, is not a stopword,
/// and has at least `min_chars` characters. Single characters are dropped
/// by default.
///
/// # Examples
///
/// ```
/// use tfidf_cloud::analysis::stop::StopwordFilter;
///
/// let filter = StopwordFilter::from_words(["我们"]);
/// let kept = filter.filter(vec!["我们".to_string(), "的".to_string(), "苹果".to_string()]);
/// assert_eq!(kept, vec!["苹果"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StopwordFilter {
    stopwords: HashSet<String>,
    min_chars: usize,
}

impl StopwordFilter {
    /// Create a filter from a list of stopwords, each trimmed
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stopwords = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        Self {
            stopwords,
            min_chars: DEFAULT_MIN_TERM_CHARS,
        }
    }

    /// Load stopwords from a UTF-8 file, one per line
    ///
    /// # Errors
    /// An unreadable file is [`Error::Stopwords`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Stopwords {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_words(text.lines()))
    }

    /// Set the minimum term length in characters
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    pub fn min_chars(&self) -> usize {
        self.min_chars
    }

    /// Number of stopwords loaded
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    pub fn is_stopword(&self, term: &str) -> bool {
        self.stopwords.contains(term)
    }

    /// Whether `term` survives the filter
    #[inline]
    pub fn keeps(&self, term: &str) -> bool {
        !term.trim().is_empty()
            && !self.stopwords.contains(term)
            && term.chars().count() >= self.min_chars
    }

    /// Keep only surviving terms, in order
    pub fn filter(&self, terms: Vec<String>) -> Vec<String> {
        terms.into_iter().filter(|t| self.keeps(t)).collect()
    }
}
