//! Word embeddings.

use ndarray::{Array1, Array2, CowArray, Ix1};

use crate::norms::{NdNorms, Norms};
use crate::storage::{NdArray, Storage, StorageViewMut};
use crate::util::l2_normalize_array;
use crate::vocab::{SimpleVocab, Vocab};

/// Word embeddings.
///
/// This data structure stores word embeddings (also known as *word
/// vectors*). The embeddings are stored l2-normalized together with
/// their original norms. Similarity and analogy queries are provided
/// through the [`EmbeddingModel`](crate::model::EmbeddingModel) trait.
#[derive(Clone, Debug)]
pub struct Embeddings<V, S> {
    vocab: V,
    storage: S,
    norms: NdNorms,
}

impl<V, S> Embeddings<V, S>
where
    V: Vocab,
    S: Storage,
{
    /// Construct embeddings from a vocabulary, l2-normalized storage,
    /// and the norms of the original vectors.
    ///
    /// Panics when the vocabulary size, the number of storage rows, and
    /// the number of norms differ.
    pub fn new(vocab: V, storage: S, norms: NdNorms) -> Self {
        assert_eq!(
            vocab.len(),
            storage.shape().0,
            "Vocab and storage have different lengths"
        );
        assert_eq!(
            vocab.len(),
            norms.0.len(),
            "Vocab and norms have different lengths"
        );

        Embeddings {
            vocab,
            storage,
            norms,
        }
    }

    /// Return the length (in vector components) of the word embeddings.
    pub fn dims(&self) -> usize {
        self.storage.shape().1
    }

    /// Get the l2-normalized embedding of a word.
    pub fn embedding(&self, word: &str) -> Option<CowArray<f32, Ix1>> {
        self.vocab.idx(word).map(|idx| self.storage.embedding(idx))
    }

    /// Get the original, unnormalized embedding of a word.
    pub fn embedding_unnormalized(&self, word: &str) -> Option<Array1<f32>> {
        self.vocab.idx(word).map(|idx| {
            let mut embedding = self.storage.embedding(idx).to_owned();
            embedding *= self.norms.norm(idx);
            embedding
        })
    }

    /// Get the number of words.
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the embedding storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Get the vocabulary.
    pub fn vocab(&self) -> &V {
        &self.vocab
    }
}

impl Embeddings<SimpleVocab, NdArray> {
    /// Construct embeddings from unnormalized vectors.
    ///
    /// The rows of `matrix` are the vectors of `words`, in order. The
    /// vectors are l2-normalized, their norms are retained.
    ///
    /// Panics when `words` contains duplicates or its length differs
    /// from the number of rows.
    pub fn from_unnormalized(words: impl Into<Vec<String>>, matrix: Array2<f32>) -> Self {
        let mut storage = NdArray::new(matrix);
        let norms = l2_normalize_array(storage.view_mut());
        Embeddings::new(SimpleVocab::new(words), storage, NdNorms::new(norms))
    }
}

#[cfg(test)]
mod tests {
    use approx::AbsDiffEq;
    use ndarray::{arr1, arr2};

    use super::Embeddings;

    fn words(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn stores_normalized_and_restores_original() {
        let embeds = Embeddings::from_unnormalized(
            words(&["hombre", "mujer"]),
            arr2(&[[3., 4.], [0., 2.]]),
        );

        assert_eq!(embeds.len(), 2);
        assert_eq!(embeds.dims(), 2);
        assert!(embeds
            .embedding("hombre")
            .unwrap()
            .abs_diff_eq(&arr1(&[0.6f32, 0.8]), 1e-6));
        assert!(embeds
            .embedding_unnormalized("hombre")
            .unwrap()
            .abs_diff_eq(&arr1(&[3f32, 4.]), 1e-5));
        assert!(embeds
            .embedding_unnormalized("mujer")
            .unwrap()
            .abs_diff_eq(&arr1(&[0f32, 2.]), 1e-6));
        assert!(embeds.embedding("rey").is_none());
    }

    #[test]
    #[should_panic]
    fn mismatched_vocab_and_storage_panics() {
        Embeddings::from_unnormalized(words(&["a"]), arr2(&[[1., 0.], [0., 1.]]));
    }
}
