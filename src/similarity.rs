//! Traits and trait implementations for similarity queries.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use ndarray::{ArrayView1, Axis};
use ordered_float::NotNan;

use crate::embeddings::Embeddings;
use crate::storage::StorageView;
use crate::util::l2_normalize;
use crate::vocab::Vocab;

/// A word with its similarity.
///
/// This data structure is used to store a pair consisting of a word and
/// its similarity to a query.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WordSimilarityResult<'a> {
    similarity: NotNan<f32>,
    word: &'a str,
}

impl<'a> WordSimilarityResult<'a> {
    /// Construct a result from a word and its cosine similarity.
    ///
    /// Panics when `similarity` is NaN.
    pub fn new(word: &'a str, similarity: f32) -> Self {
        WordSimilarityResult {
            word,
            similarity: NotNan::new(similarity).expect("Encountered NaN"),
        }
    }

    /// Get the word's similarity in cosine similarity.
    pub fn cosine_similarity(&self) -> f32 {
        *self.similarity
    }

    pub fn word(&self) -> &'a str {
        self.word
    }
}

impl<'a> fmt::Display for WordSimilarityResult<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}", self.word, self.similarity)
    }
}

impl<'a> Ord for WordSimilarityResult<'a> {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.similarity.cmp(&self.similarity) {
            Ordering::Equal => self.word.cmp(other.word),
            ordering => ordering,
        }
    }
}

impl<'a> PartialOrd for WordSimilarityResult<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Trait for embedding similarity queries.
pub trait EmbeddingSimilarity {
    /// Find words that are similar to the query embedding.
    ///
    /// The similarity between the query embedding and other embeddings is
    /// defined by the dot product of the embeddings. The embeddings in the
    /// storage are l2-normalized, this method l2-normalizes the input query,
    /// therefore the dot product is equivalent to the cosine similarity.
    ///
    /// If `batch_size` is `None`, the query will be performed on all
    /// word embeddings at once. This is typically the most efficient, but
    /// can require a large amount of memory. The query is performed on batches
    /// of size `n` when `batch_size` is `Some(n)`.
    fn embedding_similarity(
        &self,
        query: ArrayView1<f32>,
        limit: usize,
        batch_size: Option<usize>,
    ) -> Vec<WordSimilarityResult>;
}

impl<V, S> EmbeddingSimilarity for Embeddings<V, S>
where
    V: Vocab,
    S: StorageView,
{
    fn embedding_similarity(
        &self,
        query: ArrayView1<f32>,
        limit: usize,
        batch_size: Option<usize>,
    ) -> Vec<WordSimilarityResult> {
        if limit == 0 {
            return Vec::new();
        }

        let mut query = query.to_owned();
        l2_normalize(query.view_mut());

        // A zero batch size would never make progress.
        let batch_size = batch_size.unwrap_or_else(|| self.len()).max(1);

        let mut results = BinaryHeap::with_capacity(limit.min(self.len()));

        for (batch_idx, batch) in self
            .storage()
            .view()
            .axis_chunks_iter(Axis(0), batch_size)
            .enumerate()
        {
            let sims = batch.dot(&query);

            for (idx, &sim) in sims.iter().enumerate() {
                let word = &self.vocab().words()[(batch_idx * batch_size) + idx];

                let word_similarity = WordSimilarityResult::new(word, sim);

                if results.len() < limit {
                    results.push(word_similarity);
                } else {
                    let mut peek = results.peek_mut().expect("Cannot peek non-empty heap");
                    if word_similarity < *peek {
                        *peek = word_similarity
                    }
                }
            }
        }

        results.into_sorted_vec()
    }
}
