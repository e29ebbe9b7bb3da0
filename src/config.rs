//! Evaluation configuration.
//!
//! The configuration is read from TOML, for example:
//!
//! ```toml
//! k = 5
//! oov = "skip"
//! answer_match = "any"
//! parallel = true
//! normalize = true
//! remove_tildes = true
//! ```
//!
//! Every option has a default, so an empty configuration is valid.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analogy::{AnalogyEvaluator, AnswerMatch};
use crate::error::{Error, Result};
use crate::wordsim::SimilarityCorrelator;

/// Policy for benchmark rows with out-of-vocabulary words.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OovPolicy {
    /// Abort the evaluation with an error naming the row and word.
    Abort,

    /// Skip the row. Skipped rows are counted separately.
    Skip,
}

impl Default for OovPolicy {
    fn default() -> Self {
        OovPolicy::Abort
    }
}

/// Evaluation configuration.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalConfig {
    /// Number of analogy answers to consider.
    pub k: usize,

    /// Policy for rows with out-of-vocabulary words.
    pub oov: OovPolicy,

    /// Policy for matching analogy answers.
    pub answer_match: AnswerMatch,

    /// Evaluate analogies in parallel.
    pub parallel: bool,

    /// Normalize benchmark words before lookup.
    pub normalize: bool,

    /// Replace accented vowels by their base forms when normalizing.
    pub remove_tildes: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            k: 1,
            oov: OovPolicy::Abort,
            answer_match: AnswerMatch::Any,
            parallel: false,
            normalize: false,
            remove_tildes: true,
        }
    }
}

impl EvalConfig {
    /// Read the configuration from a TOML file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| {
            Error::io_error(
                format!("Cannot read configuration from {}", path.display()),
                e,
            )
        })?;
        data.parse()
    }

    /// Construct the analogy evaluator for this configuration.
    pub fn analogy_evaluator(&self) -> AnalogyEvaluator {
        AnalogyEvaluator::new(self.k)
            .answer_match(self.answer_match)
            .oov_policy(self.oov)
            .parallel(self.parallel)
            .normalization(self.normalization())
    }

    /// Construct the word similarity correlator for this configuration.
    pub fn similarity_correlator(&self) -> SimilarityCorrelator {
        SimilarityCorrelator::new()
            .oov_policy(self.oov)
            .normalization(self.normalization())
    }

    fn normalization(&self) -> Option<bool> {
        if self.normalize {
            Some(self.remove_tildes)
        } else {
            None
        }
    }

    fn validate(self) -> Result<Self> {
        if self.k < 1 {
            return Err(Error::invalid_argument("k must be at least 1"));
        }

        Ok(self)
    }
}

impl FromStr for EvalConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str::<EvalConfig>(s)
            .map_err(|e| Error::Format(format!("Cannot parse configuration: {}", e)))?
            .validate()
    }
}
