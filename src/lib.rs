//! This crate scores a directory of Chinese documents with TF-IDF and draws
//! the result as word clouds.

pub mod analysis;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;
pub mod vectorizer;
pub mod wordcloud;

/// TF-IDF Vectorizer
/// Collects per-document term counts and scores them in one pass.
///
/// `TfIdfVectorizer<N, E>` has the following generic parameters:
/// - `N`: weight type (`f32`, `f64`)
/// - `E`: TF-IDF calculation engine (e.g., `DefaultTfIdfEngine`)
///
/// Documents with no surviving terms still count towards the number of
/// documents used in the IDF formula.
pub use vectorizer::TfIdfVectorizer;

/// Scores produced by [`TfIdfVectorizer::fit`]
pub use vectorizer::TfIdfModel;

/// Term Frequency structure
/// Raw occurrence counts of each term in one document, in first-seen order.
pub use vectorizer::term::TermFrequency;

/// Document frequencies and the discovered document count
pub use vectorizer::corpus::Corpus;

/// TF-IDF Engine trait
/// Defines how IDF and TF-IDF weights are computed.
/// The default is `DefaultTfIdfEngine`: `idf = ln(N / (df + 1))`, weight = count x idf.
pub use vectorizer::tfidf::{DefaultTfIdfEngine, IdfPolicy, TfIdfEngine};

/// Text analysis entry point
pub use analysis::Analyzer;

/// Run configuration
pub use config::PipelineConfig;

/// Crate error and result types
pub use error::{Error, Result};

/// Word cloud renderer trait and the SVG implementation
pub use wordcloud::{SvgWordCloud, WordCloudRenderer};
