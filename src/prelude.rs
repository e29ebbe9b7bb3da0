//! Prelude exports the most commonly-used types and traits.

pub use crate::analogy::{
    evaluate_analogy, evaluate_analogy_set, solve_analogy, AnalogyEvaluator, AnalogyRecord,
    AnalogyReport, AnswerMatch, WordGroup,
};

pub use crate::compat::text::{ReadText, ReadTextDims};

pub use crate::compat::word2vec::ReadWord2Vec;

pub use crate::config::{EvalConfig, OovPolicy};

pub use crate::embeddings::Embeddings;

pub use crate::model::EmbeddingModel;

pub use crate::normalize::normalize;

pub use crate::similarity::{EmbeddingSimilarity, WordSimilarityResult};

pub use crate::storage::{NdArray, Storage, StorageView};

pub use crate::vocab::{SimpleVocab, Vocab};

pub use crate::wordsim::{pair_similarity, Correlation, SimilarityCorrelator, SimilarityRecord};
