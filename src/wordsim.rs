//! Word similarity evaluation.
//!
//! Word similarity benchmarks consist of word pairs with a similarity
//! score assigned by human annotators. A model is evaluated by the
//! correlation between the cosine similarities of the pairs and the
//! human scores.

use log::{info, warn};

use crate::config::OovPolicy;
use crate::correlation::{pearson, spearman};
use crate::error::{Error, Result};
use crate::model::EmbeddingModel;
use crate::normalize::normalize;

/// A row of a word similarity benchmark.
#[derive(Clone, Debug, PartialEq)]
pub struct SimilarityRecord {
    pub term1: String,
    pub term2: String,
    /// Mean similarity assigned by the annotators.
    pub mean: f64,
}

impl SimilarityRecord {
    pub fn new(term1: impl Into<String>, term2: impl Into<String>, mean: f64) -> Self {
        SimilarityRecord {
            term1: term1.into(),
            term2: term2.into(),
            mean,
        }
    }

    /// Normalize both words of the record.
    ///
    /// Words are normalized with [`normalize`] and stripped of leading
    /// and trailing spaces.
    pub fn normalized(&self, remove_tildes: bool) -> Self {
        SimilarityRecord {
            term1: normalize(&self.term1, remove_tildes).trim().to_owned(),
            term2: normalize(&self.term2, remove_tildes).trim().to_owned(),
            mean: self.mean,
        }
    }
}

/// Correlation between model similarities and human judgements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Correlation {
    /// Pearson's *r*.
    pub pearson: f64,

    /// Spearman's *ρ*.
    pub spearman: f64,

    /// Number of pairs that the coefficients were computed from.
    pub n_pairs: usize,

    /// Number of pairs skipped because of unknown words.
    pub n_skipped: usize,
}

/// Correlate model similarities with human judgements.
///
/// Returns Pearson's *r* and Spearman's *ρ* between the cosine
/// similarities of the word pairs and their mean scores. Fails with
/// `Error::UnknownWord` if a word is not in the vocabulary and with
/// `Error::InvalidArgument` if there are fewer than two records.
pub fn pair_similarity<M>(model: &M, records: &[SimilarityRecord]) -> Result<(f64, f64)>
where
    M: EmbeddingModel + ?Sized,
{
    SimilarityCorrelator::new()
        .correlate(model, records)
        .map(|correlation| (correlation.pearson, correlation.spearman))
}

/// Evaluator for word similarity benchmarks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimilarityCorrelator {
    oov: OovPolicy,
    normalization: Option<bool>,
}

impl SimilarityCorrelator {
    /// Construct a correlator that aborts on unknown words and does
    /// not normalize the records.
    pub fn new() -> Self {
        SimilarityCorrelator::default()
    }

    /// Set the policy for records with out-of-vocabulary words.
    pub fn oov_policy(mut self, oov: OovPolicy) -> Self {
        self.oov = oov;
        self
    }

    /// Normalize the words of each record before lookup.
    ///
    /// `None` disables normalization, `Some(remove_tildes)` normalizes
    /// with [`normalize`].
    pub fn normalization(mut self, normalization: Option<bool>) -> Self {
        self.normalization = normalization;
        self
    }

    /// Compute the model similarity of a record.
    pub fn score<M>(&self, model: &M, record: &SimilarityRecord) -> Result<f64>
    where
        M: EmbeddingModel + ?Sized,
    {
        let similarity = match self.normalization {
            Some(remove_tildes) => {
                let record = record.normalized(remove_tildes);
                model.similarity(&record.term1, &record.term2)?
            }
            None => model.similarity(&record.term1, &record.term2)?,
        };

        Ok(similarity as f64)
    }

    /// Correlate the model similarities of the records with their mean
    /// scores.
    pub fn correlate<M>(&self, model: &M, records: &[SimilarityRecord]) -> Result<Correlation>
    where
        M: EmbeddingModel + ?Sized,
    {
        if records.len() < 2 {
            return Err(Error::invalid_argument(format!(
                "similarity evaluation requires at least 2 records, got {}",
                records.len()
            )));
        }

        let mut model_scores = Vec::with_capacity(records.len());
        let mut gold_scores = Vec::with_capacity(records.len());
        let mut n_skipped = 0;

        for (idx, record) in records.iter().enumerate() {
            match self.score(model, record) {
                Ok(score) => {
                    model_scores.push(score);
                    gold_scores.push(record.mean);
                }
                Err(err) if err.is_unknown_word() && self.oov == OovPolicy::Skip => {
                    warn!("Skipping word pair {}: {}", idx, err);
                    n_skipped += 1;
                }
                Err(err) => return Err(err.in_row(idx)),
            }
        }

        let correlation = Correlation {
            pearson: pearson(&model_scores, &gold_scores)?,
            spearman: spearman(&model_scores, &gold_scores)?,
            n_pairs: model_scores.len(),
            n_skipped,
        };

        info!(
            "Word similarity: pearson: {:.4}, spearman: {:.4}, pairs: {}, skipped: {}",
            correlation.pearson,
            correlation.spearman,
            correlation.n_pairs,
            correlation.n_skipped
        );

        Ok(correlation)
    }
}
