use ndarray::Array1;

/// Trait for embedding norms.
pub trait Norms {
    /// Return the norm for the word at the given index.
    fn norm(&self, idx: usize) -> f32;
}

/// Embedding l2 norms.
///
/// Embeddings are stored l2-normalized, so that similarity queries
/// reduce to dot products. The norms are kept so that the original
/// vector of a word can be reconstructed by multiplying the normalized
/// embedding by its l2 norm.
#[derive(Clone, Debug)]
pub struct NdNorms(pub Array1<f32>);

impl NdNorms {
    pub fn new(norms: impl Into<Array1<f32>>) -> Self {
        NdNorms(norms.into())
    }
}

impl Norms for NdNorms {
    fn norm(&self, idx: usize) -> f32 {
        self.0[idx]
    }
}
