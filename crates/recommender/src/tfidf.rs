//! TF-IDF vector space over a set of documents.
//!
//! ## Weighting
//! For `n` documents and a term appearing in `df` of them:
//! - tf = raw count of the term in the document
//! - idf = ln((1 + n) / (1 + df)) + 1
//! - weight = tf * idf, then each document row is scaled to unit length
//!
//! The vocabulary is sorted, so vector positions do not depend on hash order.

use crate::text::tokenize;
use crate::vector::normalize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Document-term matrix with one dense, L2-normalized row per document.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    vocabulary: Vec<String>,
    idf: Vec<f64>,
    rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    /// Build the vector space for `documents`, keeping their order.
    ///
    /// Documents with no usable terms (empty text, only stop words) get a
    /// zero row. If no document has a usable term the vocabulary is empty
    /// and every row has length 0.
    pub fn fit<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let tokenized: Vec<Vec<String>> = documents.into_iter().map(tokenize).collect();

        let vocabulary: Vec<String> = tokenized
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let n_terms = vocabulary.len();
        let mut doc_freq = vec![0usize; n_terms];
        let mut counts: Vec<BTreeMap<usize, f64>> = Vec::with_capacity(tokenized.len());

        for tokens in &tokenized {
            let mut tf: BTreeMap<usize, f64> = BTreeMap::new();
            for token in tokens {
                // Every token is in the vocabulary by construction
                if let Ok(idx) = vocabulary.binary_search(token) {
                    *tf.entry(idx).or_insert(0.0) += 1.0;
                }
            }
            for &idx in tf.keys() {
                doc_freq[idx] += 1;
            }
            counts.push(tf);
        }

        let n_docs = tokenized.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .into_iter()
            .map(|tf| {
                let mut row = vec![0.0; n_terms];
                for (idx, count) in tf {
                    row[idx] = count * idf[idx];
                }
                normalize(&mut row);
                row
            })
            .collect::<Vec<_>>();

        debug!(
            "Built TF-IDF space: {} documents, {} terms",
            rows.len(),
            n_terms
        );

        Self {
            vocabulary,
            idf,
            rows,
        }
    }

    pub fn n_docs(&self) -> usize {
        self.rows.len()
    }

    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }

    /// Sorted vocabulary; position `i` is component `i` of every row
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|i| self.idf[i])
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|t| t.as_str().cmp(term))
            .ok()
    }

    /// Vector of document `doc`.
    ///
    /// # Panics
    /// If `doc >= self.n_docs()`.
    pub fn row(&self, doc: usize) -> &[f64] {
        &self.rows[doc]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::norm;

    #[test]
    fn test_vocabulary_is_sorted_and_filtered() {
        let m = TfidfMatrix::fit(["the trail", "a cinema and a trail"]);
        assert_eq!(m.vocabulary(), &["cinema".to_string(), "trail".to_string()]);
        assert_eq!(m.n_docs(), 2);
    }

    #[test]
    fn test_smoothed_idf() {
        let m = TfidfMatrix::fit(["trail nature", "trail cinema", "trail"]);
        // "trail" is everywhere: ln(4/4) + 1
        assert!((m.idf("trail").unwrap() - 1.0).abs() < 1e-12);
        // "nature" is in one of three: ln(4/2) + 1
        assert!((m.idf("nature").unwrap() - (2.0f64.ln() + 1.0)).abs() < 1e-12);
        assert!(m.idf("missing").is_none());
    }

    #[test]
    fn test_rows_are_unit_length() {
        let m = TfidfMatrix::fit(["outdoor trail walking nature", "indoor film cinema", ""]);
        assert!((norm(m.row(0)) - 1.0).abs() < 1e-12);
        assert!((norm(m.row(1)) - 1.0).abs() < 1e-12);
        // Empty description -> zero row
        assert_eq!(norm(m.row(2)), 0.0);
    }

    #[test]
    fn test_term_counts_weight_rows() {
        let m = TfidfMatrix::fit(["pizza pizza beer", "beer"]);
        let pizza = m.term_index("pizza").unwrap();
        let beer = m.term_index("beer").unwrap();
        assert!(m.row(0)[pizza] > m.row(0)[beer]);
        assert_eq!(m.row(1)[pizza], 0.0);
    }

    #[test]
    fn test_empty_vocabulary_is_not_an_error() {
        let m = TfidfMatrix::fit(["", "the of and"]);
        assert_eq!(m.n_terms(), 0);
        assert_eq!(m.n_docs(), 2);
        assert!(m.row(0).is_empty());
    }

    #[test]
    fn test_no_documents() {
        let m = TfidfMatrix::fit(std::iter::empty::<&str>());
        assert_eq!(m.n_docs(), 0);
        assert_eq!(m.rows().count(), 0);
    }
}
