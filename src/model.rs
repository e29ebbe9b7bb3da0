//! The embedding model interface used by the evaluations.

use ndarray::{Array1, ArrayView1};

use crate::embeddings::Embeddings;
use crate::error::{Error, Result};
use crate::similarity::{EmbeddingSimilarity, WordSimilarityResult};
use crate::storage::StorageView;
use crate::vocab::Vocab;

/// Capabilities of an embedding model.
///
/// The evaluations only depend on this trait, so any embedding backend
/// can be evaluated by implementing it.
pub trait EmbeddingModel {
    /// Get the vector of a word.
    ///
    /// Returns `Error::UnknownWord` if the word is not in the vocabulary.
    fn vector_of(&self, word: &str) -> Result<Array1<f32>>;

    /// Get at most `limit` words nearest to the query vector.
    ///
    /// The results are sorted by descending cosine similarity.
    fn nearest(&self, query: ArrayView1<f32>, limit: usize) -> Vec<WordSimilarityResult>;

    /// Cosine similarity of two words.
    fn similarity(&self, word1: &str, word2: &str) -> Result<f32>;

    /// Check whether a word is in the vocabulary.
    fn contains(&self, word: &str) -> bool {
        self.vector_of(word).is_ok()
    }
}

impl<V, S> EmbeddingModel for Embeddings<V, S>
where
    V: Vocab,
    S: StorageView,
{
    fn vector_of(&self, word: &str) -> Result<Array1<f32>> {
        self.embedding_unnormalized(word)
            .ok_or_else(|| Error::unknown_word(word))
    }

    fn nearest(&self, query: ArrayView1<f32>, limit: usize) -> Vec<WordSimilarityResult> {
        self.embedding_similarity(query, limit, None)
    }

    fn similarity(&self, word1: &str, word2: &str) -> Result<f32> {
        let embedding1 = self
            .embedding(word1)
            .ok_or_else(|| Error::unknown_word(word1))?;
        let embedding2 = self
            .embedding(word2)
            .ok_or_else(|| Error::unknown_word(word2))?;

        Ok(embedding1.dot(&embedding2))
    }

    fn contains(&self, word: &str) -> bool {
        self.vocab().idx(word).is_some()
    }
}
