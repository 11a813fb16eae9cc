pub mod corpus;
pub mod term;
pub mod tfidf;
pub mod weights;

use std::marker::PhantomData;

use indexmap::IndexMap;

use crate::error::Result;
use crate::vectorizer::{
    corpus::Corpus,
    term::TermFrequency,
    tfidf::{DefaultTfIdfEngine, IdfPolicy, IdfVector, TfIdfEngine, Weight},
    weights::{CombinedWeights, DocumentWeights},
};

/// TF-IDF Vectorizer
/// Collects the term counts of every discovered document, then scores them
/// all at once in [`TfIdfVectorizer::fit`].
///
/// `TfIdfVectorizer<N, E>` has the following generic parameters:
/// - `N`: weight type (`f32`, `f64`)
/// - `E`: TF-IDF calculation engine
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer<N = f64, E = DefaultTfIdfEngine>
where
    N: Weight,
    E: TfIdfEngine<N>,
{
    /// term counts of surviving documents, in discovery order
    documents: IndexMap<String, TermFrequency>,
    /// every document seen, empty ones included
    discovered: u64,
    _marker: PhantomData<(N, E)>,
}

/// Result of one scoring pass
/// Immutable: every field is derived from the documents at fit time.
#[derive(Debug, Clone)]
pub struct TfIdfModel<N>
where
    N: Weight,
{
    pub corpus: Corpus,
    pub idf: IdfVector<N>,
    /// per surviving document, in discovery order
    pub documents: Vec<DocumentWeights<N>>,
    pub combined: CombinedWeights<N>,
}

impl<N, E> Default for TfIdfVectorizer<N, E>
where
    N: Weight,
    E: TfIdfEngine<N>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> TfIdfVectorizer<N, E>
where
    N: Weight,
    E: TfIdfEngine<N>,
{
    /// Create a new TfIdfVectorizer instance
    pub fn new() -> Self {
        Self {
            documents: IndexMap::new(),
            discovered: 0,
            _marker: PhantomData,
        }
    }

    /// Add a discovered document
    /// A document without terms only counts towards the discovered total.
    /// Adding the same key twice replaces the earlier counts.
    ///
    /// # Returns
    /// * `bool` - whether the document takes part in scoring
    pub fn add_doc<K: Into<String>>(&mut self, key: K, freq: TermFrequency) -> bool {
        let key = key.into();
        if self.documents.contains_key(&key) {
            log::warn!("document {key} added twice, replacing earlier counts");
            if freq.is_empty() {
                self.documents.shift_remove(&key);
                return false;
            }
            self.documents.insert(key, freq);
            return true;
        }

        self.discovered += 1;
        if freq.is_empty() {
            log::debug!("document {key} has no terms after filtering, dropped");
            return false;
        }
        self.documents.insert(key, freq);
        true
    }

    /// Number of documents taking part in scoring
    pub fn doc_num(&self) -> usize {
        self.documents.len()
    }

    /// Number of documents added, empty ones included
    pub fn discovered(&self) -> u64 {
        self.discovered
    }

    pub fn contains_doc(&self, key: &str) -> bool {
        self.documents.contains_key(key)
    }

    pub fn get_tf(&self, key: &str) -> Option<&TermFrequency> {
        self.documents.get(key)
    }

    /// Raw term counts summed over every surviving document
    pub fn corpus_frequency(&self) -> TermFrequency {
        self.documents
            .values()
            .fold(TermFrequency::new(), |mut total, tf| {
                total.add_terms_from_freq(tf);
                total
            })
    }

    /// Compute document frequencies, IDF, per-document and combined weights
    pub fn fit(&self, policy: IdfPolicy) -> Result<TfIdfModel<N>> {
        let corpus = Corpus::from_documents(self.documents.values(), self.discovered)?;
        let idf = E::idf_vec(&corpus, policy);
        let documents: Vec<DocumentWeights<N>> = self
            .documents
            .iter()
            .map(|(key, tf)| E::tf_idf_vec(key, tf, &idf))
            .collect();
        let combined = CombinedWeights::from_documents(&documents);
        log::info!(
            "scored {} of {} documents over a vocabulary of {} terms",
            documents.len(),
            corpus.doc_num(),
            corpus.vocab_size()
        );
        Ok(TfIdfModel {
            corpus,
            idf,
            documents,
            combined,
        })
    }
}
