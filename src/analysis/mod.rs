//! Text analysis: cleaning, segmentation, and filtering.
//!
//! An [`Analyzer`] turns the raw text of one document into its
//! [`TermFrequency`]:
//! raw text -> [`Tokenizer`] -> [`StopwordFilter`] -> counts.

pub mod segmenter;
pub mod stop;
pub mod tokenizer;

use crate::vectorizer::term::TermFrequency;

pub use segmenter::{LinderaSegmenter, MaxMatchSegmenter, Segmenter, WhitespaceSegmenter};
pub use stop::StopwordFilter;
pub use tokenizer::Tokenizer;

/// Tokenizer and stopword filter applied together.
#[derive(Debug)]
pub struct Analyzer {
    tokenizer: Tokenizer,
    filter: StopwordFilter,
}

impl Analyzer {
    pub fn new(tokenizer: Tokenizer, filter: StopwordFilter) -> Self {
        Self { tokenizer, filter }
    }

    /// Surviving terms of `text`, in text order
    pub fn terms(&self, text: &str) -> Vec<String> {
        self.filter.filter(self.tokenizer.tokenize(text))
    }

    /// Raw term counts of `text`
    pub fn analyze(&self, text: &str) -> TermFrequency {
        let terms = self.terms(text);
        TermFrequency::from(&terms[..])
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn filter(&self) -> &StopwordFilter {
        &self.filter
    }
}
