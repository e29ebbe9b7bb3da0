//! A library for the intrinsic evaluation of word embeddings.
//!
//! wordeval evaluates embedding models on two kinds of benchmarks:
//!
//! * *analogies* (*a is to b as c is to ?*), solved by vector offsets
//!   over groups of words (see [`analogy`]);
//! * *word similarity*, the correlation between the cosine similarities
//!   of word pairs and human judgements (see [`wordsim`]).
//!
//! The evaluations work with any model that implements
//! [`EmbeddingModel`](model::EmbeddingModel). The [`Embeddings`]
//! type provides an in-memory implementation that can be read from the
//! word2vec and GloVe formats (see [`compat`]).

pub mod analogy;

pub mod compat;

pub mod config;

pub mod correlation;

pub mod embeddings;
pub use embeddings::Embeddings;

pub mod error;

pub mod model;

pub mod normalize;

pub mod norms;

pub mod prelude;

pub mod similarity;

pub mod storage;

pub(crate) mod util;

pub mod vocab;

pub mod wordsim;

#[cfg(test)]
mod tests;
