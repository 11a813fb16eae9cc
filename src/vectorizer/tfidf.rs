use std::fmt::{Debug, Display};

use indexmap::IndexMap;
use num::{Float, FromPrimitive};
use serde::{Deserialize, Serialize};

use crate::vectorizer::{corpus::Corpus, term::TermFrequency, weights::{DocumentWeights, TermWeight}};

/// Numeric type a TF-IDF weight can be stored in (`f32`, `f64`)
pub trait Weight: Float + FromPrimitive + Display + Debug + Send + Sync {}
impl<T> Weight for T where T: Float + FromPrimitive + Display + Debug + Send + Sync {}

/// How IDF values below zero are treated
///
/// `ln(N / (df + 1))` turns negative once a term appears in every discovered
/// document, which then lowers that term's combined weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdfPolicy {
    /// keep the formula as is, negative values included
    #[default]
    Raw,
    /// clamp negative IDF to 0
    ClampZero,
}

/// IDF weight for every vocabulary term, in vocabulary order
#[derive(Debug, Clone, PartialEq)]
pub struct IdfVector<N>
where
    N: Weight,
{
    pub idf: IndexMap<String, N>,
    /// discovered document count used as the numerator
    pub doc_num: u64,
}

impl<N> IdfVector<N>
where
    N: Weight,
{
    /// IDF of `term`, 0 for terms outside the vocabulary
    #[inline]
    pub fn get(&self, term: &str) -> N {
        self.idf.get(term).copied().unwrap_or_else(N::zero)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, N)> {
        self.idf.iter().map(|(term, &idf)| (term.as_str(), idf))
    }

    pub fn len(&self) -> usize {
        self.idf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idf.is_empty()
    }
}

/// TF-IDF calculation engine
/// Implementors decide how a corpus becomes IDF weights and how a document's
/// counts become TF-IDF weights.
pub trait TfIdfEngine<N>
where
    N: Weight,
{
    /// Build the IDF vector over the corpus vocabulary
    /// # Arguments
    /// * `corpus` - document frequency statistics
    /// * `policy` - treatment of negative IDF
    fn idf_vec(corpus: &Corpus, policy: IdfPolicy) -> IdfVector<N>;

    /// Build the dense TF-IDF weights of one document over the vocabulary
    /// # Arguments
    /// * `key` - document name
    /// * `freq` - raw term counts of the document
    /// * `idf` - corpus IDF vector
    fn tf_idf_vec(key: &str, freq: &TermFrequency, idf: &IdfVector<N>) -> DocumentWeights<N>;
}

/// Default engine
/// raw count TF times `ln(doc_num / (df + 1))`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTfIdfEngine;

impl DefaultTfIdfEngine {
    pub fn new() -> Self {
        DefaultTfIdfEngine
    }

    /// IDF for a term found in `doc_freq` of `doc_num` discovered documents
    #[inline]
    pub fn idf_calc(doc_num: u64, doc_freq: u64) -> f64 {
        (doc_num as f64 / (doc_freq as f64 + 1.0)).ln()
    }
}

impl<N> TfIdfEngine<N> for DefaultTfIdfEngine
where
    N: Weight,
{
    fn idf_vec(corpus: &Corpus, policy: IdfPolicy) -> IdfVector<N> {
        let doc_num = corpus.doc_num();
        let mut negative = 0usize;
        let idf = corpus
            .document_frequency_iter()
            .map(|(term, doc_freq)| {
                let mut idf = Self::idf_calc(doc_num, doc_freq);
                if idf < 0.0 {
                    negative += 1;
                    if policy == IdfPolicy::ClampZero {
                        idf = 0.0;
                    }
                }
                (term.to_string(), N::from_f64(idf).unwrap_or_else(N::zero))
            })
            .collect();

        if negative > 0 {
            match policy {
                IdfPolicy::Raw => log::warn!(
                    "{negative} terms have negative IDF (present in nearly every one of {doc_num} documents)"
                ),
                IdfPolicy::ClampZero => {
                    log::debug!("clamped {negative} negative IDF values to 0")
                }
            }
        }
        IdfVector { idf, doc_num }
    }

    fn tf_idf_vec(key: &str, freq: &TermFrequency, idf: &IdfVector<N>) -> DocumentWeights<N> {
        let weights = idf
            .iter()
            .map(|(term, idf)| {
                let count = freq.term_count(term);
                // absent terms weigh exactly zero, never -0.0
                let weight = if count == 0 {
                    N::zero()
                } else {
                    N::from_u64(count).unwrap_or_else(N::zero) * idf
                };
                (term.to_string(), TermWeight { count, weight })
            })
            .collect();
        DocumentWeights::new(key, weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(docs: &[&[&str]], discovered: u64) -> Corpus {
        let freqs: Vec<TermFrequency> = docs.iter().map(|d| TermFrequency::from(*d)).collect();
        Corpus::from_documents(freqs.iter(), discovered).unwrap()
    }

    #[test]
    fn idf_formula_uses_discovered_count() {
        assert!((DefaultTfIdfEngine::idf_calc(10, 1) - (5.0f64).ln()).abs() < 1e-12);
        assert!((DefaultTfIdfEngine::idf_calc(2, 1)).abs() < 1e-12);
    }

    #[test]
    fn idf_non_negative_when_df_below_total() {
        for doc_num in 1..50u64 {
            for doc_freq in 0..doc_num {
                assert!(DefaultTfIdfEngine::idf_calc(doc_num, doc_freq) >= 0.0);
            }
        }
    }

    #[test]
    fn raw_policy_keeps_negative_idf() {
        let corpus = corpus(&[&["苹果", "苹果", "香蕉"], &["苹果", "橘子"]], 2);
        let idf: IdfVector<f64> = DefaultTfIdfEngine::idf_vec(&corpus, IdfPolicy::Raw);
        assert!((idf.get("苹果") - (2.0f64 / 3.0).ln()).abs() < 1e-12);
        assert!(idf.get("苹果") < 0.0);
        assert_eq!(idf.get("香蕉"), 0.0);
        assert_eq!(idf.get("橘子"), 0.0);
    }

    #[test]
    fn clamp_policy_zeroes_negative_idf() {
        let corpus = corpus(&[&["苹果", "苹果", "香蕉"], &["苹果", "橘子"]], 2);
        let idf: IdfVector<f32> = DefaultTfIdfEngine::idf_vec(&corpus, IdfPolicy::ClampZero);
        assert_eq!(idf.get("苹果"), 0.0);
        assert!(idf.iter().all(|(_, v)| v >= 0.0));
    }

    #[test]
    fn tf_idf_is_count_times_idf() {
        let corpus = corpus(&[&["苹果", "苹果", "香蕉"], &["橘子"]], 4);
        let idf: IdfVector<f64> = DefaultTfIdfEngine::idf_vec(&corpus, IdfPolicy::Raw);
        let doc = TermFrequency::from(&["苹果", "苹果", "香蕉"][..]);
        let weights = DefaultTfIdfEngine::tf_idf_vec("a.txt", &doc, &idf);

        let expected = 2.0 * (4.0f64 / 2.0).ln();
        assert!((weights.weight("苹果") - expected).abs() < 1e-12);
        // dense over the vocabulary, absent term is exactly zero
        assert_eq!(weights.len(), 3);
        assert_eq!(weights.weight("橘子"), 0.0);
        assert!(weights.weight("橘子").is_sign_positive());
    }
}
