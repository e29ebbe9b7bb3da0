//! Analogy solving and evaluation.
//!
//! An analogy query has the form *a is to b as c is to ?*. Each slot of
//! the query is a [`WordGroup`], e.g. a set of synonyms, that is
//! represented by the element-wise median of its word vectors. The
//! answer is searched in the neighborhood of
//!
//! *median(b) - median(a) + median(c)*
//!
//! A query is solved when one of the accepted answers is among the `k`
//! nearest words.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::iter::FromIterator;
use std::slice;

use itertools::Itertools;
use log::{debug, info, warn};
use ndarray::Array1;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::OovPolicy;
use crate::error::{Error, Result};
use crate::model::EmbeddingModel;
use crate::normalize::normalize;
use crate::similarity::WordSimilarityResult;
use crate::util::median;

/// The words of one slot of an analogy query.
///
/// The order of the words is irrelevant.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WordGroup(Vec<String>);

impl WordGroup {
    pub fn new(words: impl Into<Vec<String>>) -> Self {
        WordGroup(words.into())
    }

    /// Check whether `word` is literally one of the group's words.
    pub fn contains(&self, word: &str) -> bool {
        self.0.iter().any(|w| w == word)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn words(&self) -> &[String] {
        &self.0
    }

    /// The element-wise median of the group's word vectors.
    fn vector<M>(&self, model: &M, slot: &str) -> Result<Array1<f32>>
    where
        M: EmbeddingModel + ?Sized,
    {
        if self.is_empty() {
            return Err(Error::invalid_argument(format!(
                "word group {} is empty",
                slot
            )));
        }

        let vectors = self
            .iter()
            .map(|word| model.vector_of(word))
            .collect::<Result<Vec<_>>>()?;
        let views = vectors.iter().map(|v| v.view()).collect::<Vec<_>>();

        median(&views)
    }

    fn normalized(&self, remove_tildes: bool) -> Self {
        self.iter()
            .map(|word| normalize(word, remove_tildes).trim().to_owned())
            .collect()
    }
}

impl<S> FromIterator<S> for WordGroup
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        WordGroup(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a WordGroup {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A row of an analogy benchmark.
///
/// *term1* is to *term2* as *term3* is to one of the words in *term4*.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnalogyRecord {
    /// Optional section of the benchmark, such as *capital-country*.
    pub section: Option<String>,
    pub term1: WordGroup,
    pub term2: WordGroup,
    pub term3: WordGroup,
    /// Accepted answers.
    pub term4: HashSet<String>,
}

impl AnalogyRecord {
    pub fn new<A, S>(term1: WordGroup, term2: WordGroup, term3: WordGroup, answers: A) -> Self
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnalogyRecord {
            section: None,
            term1,
            term2,
            term3,
            term4: answers.into_iter().map(Into::into).collect(),
        }
    }

    /// Assign the record to a benchmark section.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Normalize every word of the record.
    ///
    /// Words are normalized with [`normalize`] and stripped of leading
    /// and trailing spaces.
    pub fn normalized(&self, remove_tildes: bool) -> Self {
        AnalogyRecord {
            section: self.section.clone(),
            term1: self.term1.normalized(remove_tildes),
            term2: self.term2.normalized(remove_tildes),
            term3: self.term3.normalized(remove_tildes),
            term4: self
                .term4
                .iter()
                .map(|word| normalize(word, remove_tildes).trim().to_owned())
                .collect(),
        }
    }
}

/// Solve the analogy *a is to b as c is to ?*.
///
/// Returns at most `k` words nearest to *median(b) - median(a) +
/// median(c)*, sorted by descending similarity. Words of `c` are never
/// part of the answer: `k + |c|` neighbors are retrieved, the words of
/// `c` are removed, and the remainder is truncated to `k`.
///
/// Fails with `Error::InvalidArgument` if `k` is zero, a group is
/// empty, or the query vector has NaN or infinite components, and with
/// `Error::UnknownWord` if a word of a group is not in the vocabulary
/// of the model.
pub fn solve_analogy<'a, M>(
    model: &'a M,
    k: usize,
    a: &WordGroup,
    b: &WordGroup,
    c: &WordGroup,
) -> Result<Vec<WordSimilarityResult<'a>>>
where
    M: EmbeddingModel + ?Sized,
{
    if k < 1 {
        return Err(Error::invalid_argument("k must be at least 1"));
    }

    let a_vector = a.vector(model, "a")?;
    let b_vector = b.vector(model, "b")?;
    let c_vector = c.vector(model, "c")?;

    let query = (&b_vector - &a_vector) + &c_vector;
    if query.iter().any(|v| !v.is_finite()) {
        return Err(Error::invalid_argument("analogy query vector is not finite"));
    }

    Ok(model
        .nearest(query.view(), k.saturating_add(c.len()))
        .into_iter()
        .filter(|result| !c.contains(result.word()))
        .take(k)
        .collect())
}

/// Policy for matching query answers against accepted answers.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerMatch {
    /// Solved when any accepted answer is among the query answers.
    Any,

    /// Solved when all accepted answers are among the query answers.
    All,
}

impl Default for AnswerMatch {
    fn default() -> Self {
        AnswerMatch::Any
    }
}

impl AnswerMatch {
    fn matches(self, accepted: &HashSet<String>, answers: &[WordSimilarityResult]) -> bool {
        let found = |word: &String| answers.iter().any(|answer| answer.word() == word);

        match self {
            AnswerMatch::Any => accepted.iter().any(found),
            AnswerMatch::All => accepted.iter().all(found),
        }
    }
}

/// Check whether the model solves an analogy record.
///
/// The record is solved when any of the accepted answers is among the
/// `k` answers of [`solve_analogy`]. Fails with `Error::UnknownWord` if
/// a query word or an accepted answer is not in the vocabulary.
pub fn evaluate_analogy<M>(model: &M, k: usize, record: &AnalogyRecord) -> Result<bool>
where
    M: EmbeddingModel + ?Sized,
{
    AnalogyEvaluator::new(k).evaluate_record(model, record)
}

/// Count the analogy records that are solved by the model.
///
/// Evaluation stops at the first record that cannot be evaluated, the
/// error carries the index of that record.
pub fn evaluate_analogy_set<M>(model: &M, k: usize, records: &[AnalogyRecord]) -> Result<usize>
where
    M: EmbeddingModel + ?Sized,
{
    AnalogyEvaluator::new(k)
        .evaluate_sequential(model, records)
        .map(|report| report.hits())
}

/// Analogy evaluation counts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Counts {
    pub n_correct: usize,
    pub n_instances: usize,
    pub n_skipped: usize,
}

impl Counts {
    /// Share of evaluated instances that were solved.
    ///
    /// Returns `None` when no instance was evaluated.
    pub fn accuracy(&self) -> Option<f64> {
        if self.n_instances == 0 {
            None
        } else {
            Some(self.n_correct as f64 / self.n_instances as f64)
        }
    }

    fn add(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Correct => {
                self.n_correct += 1;
                self.n_instances += 1;
            }
            Outcome::Incorrect => self.n_instances += 1,
            Outcome::Skipped => self.n_skipped += 1,
        }
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.accuracy() {
            Some(accuracy) => write!(
                f,
                "{}/{} correct, accuracy: {:.2}, skipped: {}",
                self.n_correct,
                self.n_instances,
                accuracy * 100.,
                self.n_skipped
            ),
            None => write!(f, "no evaluation instances, skipped: {}", self.n_skipped),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Outcome {
    Correct,
    Incorrect,
    Skipped,
}

/// Result of evaluating an analogy benchmark.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AnalogyReport {
    total: Counts,
    sections: BTreeMap<String, Counts>,
}

impl AnalogyReport {
    /// Number of solved records.
    pub fn hits(&self) -> usize {
        self.total.n_correct
    }

    /// Counts of records with the given section.
    pub fn section(&self, section: &str) -> Option<&Counts> {
        self.sections.get(section)
    }

    /// Counts per section, ordered by section name.
    pub fn sections(&self) -> &BTreeMap<String, Counts> {
        &self.sections
    }

    /// Counts over all records.
    pub fn total(&self) -> &Counts {
        &self.total
    }

    fn add(&mut self, section: Option<&str>, outcome: Outcome) {
        self.total.add(outcome);
        if let Some(section) = section {
            self.sections
                .entry(section.to_owned())
                .or_default()
                .add(outcome);
        }
    }
}

impl fmt::Display for AnalogyReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (section, counts) in &self.sections {
            writeln!(f, "{}: {}", section, counts)?;
        }

        write!(f, "Total: {}", self.total)
    }
}

/// Evaluator for analogy benchmarks.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalogyEvaluator {
    k: usize,
    answer_match: AnswerMatch,
    oov: OovPolicy,
    parallel: bool,
    normalization: Option<bool>,
}

impl AnalogyEvaluator {
    /// Construct an evaluator that accepts an answer among the `k`
    /// nearest words.
    ///
    /// By default, a record is solved when any accepted answer is found,
    /// records with unknown words abort the evaluation, and records are
    /// evaluated sequentially without normalization.
    pub fn new(k: usize) -> Self {
        AnalogyEvaluator {
            k,
            answer_match: AnswerMatch::Any,
            oov: OovPolicy::Abort,
            parallel: false,
            normalization: None,
        }
    }

    /// Set the answer matching policy.
    pub fn answer_match(mut self, answer_match: AnswerMatch) -> Self {
        self.answer_match = answer_match;
        self
    }

    /// Set the policy for records with out-of-vocabulary words.
    pub fn oov_policy(mut self, oov: OovPolicy) -> Self {
        self.oov = oov;
        self
    }

    /// Evaluate records in parallel.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Normalize the words of each record before evaluation.
    ///
    /// `None` disables normalization, `Some(remove_tildes)` normalizes
    /// with [`normalize`].
    pub fn normalization(mut self, normalization: Option<bool>) -> Self {
        self.normalization = normalization;
        self
    }

    /// Check whether the model solves a single record.
    pub fn evaluate_record<M>(&self, model: &M, record: &AnalogyRecord) -> Result<bool>
    where
        M: EmbeddingModel + ?Sized,
    {
        let record = match self.normalization {
            Some(remove_tildes) => Cow::Owned(record.normalized(remove_tildes)),
            None => Cow::Borrowed(record),
        };

        // A record without accepted answers cannot be solved.
        if record.term4.is_empty() {
            debug!("Analogy without accepted answers");
            return Ok(false);
        }

        // Sort, so that the reported word does not depend on hashing.
        let mut accepted = record.term4.iter().collect::<Vec<_>>();
        accepted.sort();
        if let Some(unknown) = accepted.into_iter().find(|word| !model.contains(word)) {
            return Err(Error::unknown_word(unknown.as_str()));
        }

        let answers = solve_analogy(
            model,
            self.k,
            &record.term1,
            &record.term2,
            &record.term3,
        )?;
        debug!("Answers: {}", answers.iter().join(", "));

        Ok(self.answer_match.matches(&record.term4, &answers))
    }

    /// Evaluate the records of an analogy benchmark.
    ///
    /// When parallel evaluation is enabled, records are evaluated with
    /// rayon. The report is identical to that of sequential evaluation.
    pub fn evaluate<M>(&self, model: &M, records: &[AnalogyRecord]) -> Result<AnalogyReport>
    where
        M: EmbeddingModel + Sync + ?Sized,
    {
        if self.parallel {
            let outcomes = records
                .par_iter()
                .map(|record| self.evaluate_record(model, record))
                .collect::<Vec<_>>();
            self.tally(records, outcomes)
        } else {
            self.evaluate_sequential(model, records)
        }
    }

    /// Evaluate the records of an analogy benchmark sequentially.
    pub fn evaluate_sequential<M>(
        &self,
        model: &M,
        records: &[AnalogyRecord],
    ) -> Result<AnalogyReport>
    where
        M: EmbeddingModel + ?Sized,
    {
        self.tally(
            records,
            records
                .iter()
                .map(|record| self.evaluate_record(model, record)),
        )
    }

    fn tally(
        &self,
        records: &[AnalogyRecord],
        outcomes: impl IntoIterator<Item = Result<bool>>,
    ) -> Result<AnalogyReport> {
        let mut report = AnalogyReport::default();

        for (idx, (record, outcome)) in records.iter().zip(outcomes).enumerate() {
            let outcome = match outcome {
                Ok(true) => Outcome::Correct,
                Ok(false) => Outcome::Incorrect,
                Err(err) if err.is_unknown_word() && self.oov == OovPolicy::Skip => {
                    warn!("Skipping analogy {}: {}", idx, err);
                    Outcome::Skipped
                }
                Err(err) => return Err(err.in_row(idx)),
            };

            debug!("Analogy {}: {:?}", idx, outcome);
            report.add(record.section.as_deref(), outcome);
        }

        info!("Analogies: {}", report.total());

        Ok(report)
    }
}
