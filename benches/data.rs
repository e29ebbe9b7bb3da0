use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use wordeval::prelude::*;

pub const N_WORDS: usize = 20_000;

pub const DIMS: usize = 300;

/// Random embeddings with words `w0` to `w{N_WORDS - 1}`.
pub fn synthetic_embeddings() -> Embeddings<SimpleVocab, NdArray> {
    let mut rng = XorShiftRng::seed_from_u64(42);
    let words = (0..N_WORDS).map(|idx| format!("w{}", idx)).collect();
    let matrix = Array2::from_shape_fn((N_WORDS, DIMS), |_| rng.gen_range(-1f32..1f32));
    Embeddings::from_unnormalized(words, matrix)
}

/// Random word from the vocabulary of the synthetic embeddings.
pub fn random_word(rng: &mut impl Rng) -> String {
    format!("w{}", rng.gen_range(0..N_WORDS))
}

pub fn seeded_rng() -> XorShiftRng {
    XorShiftRng::seed_from_u64(7)
}
