//! Embedding vocabularies

use std::collections::HashMap;

/// Embedding vocabularies.
#[allow(clippy::len_without_is_empty)]
pub trait Vocab {
    /// Get the index of a token.
    fn idx(&self, word: &str) -> Option<usize>;

    /// Get the vocabulary size.
    fn len(&self) -> usize;

    /// Get the words in the vocabulary.
    fn words(&self) -> &[String];
}

/// Vocabulary of whole words.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SimpleVocab {
    indices: HashMap<String, usize>,
    words: Vec<String>,
}

impl SimpleVocab {
    /// Construct a new simple vocabulary.
    ///
    /// Words are assigned indices in the given order.
    ///
    /// Panics when there are duplicate words.
    pub fn new(words: impl Into<Vec<String>>) -> Self {
        let words = words.into();

        let indices: HashMap<_, _> = words
            .iter()
            .enumerate()
            .map(|(idx, word)| (word.to_owned(), idx))
            .collect();
        assert_eq!(
            words.len(),
            indices.len(),
            "words contained duplicate entries."
        );

        SimpleVocab { words, indices }
    }
}

impl Vocab for SimpleVocab {
    fn idx(&self, word: &str) -> Option<usize> {
        self.indices.get(word).cloned()
    }

    fn len(&self) -> usize {
        self.words.len()
    }

    fn words(&self) -> &[String] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::{SimpleVocab, Vocab};

    #[test]
    fn lookup_in_insertion_order() {
        let vocab = SimpleVocab::new(vec!["rey".to_owned(), "reina".to_owned()]);
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.idx("rey"), Some(0));
        assert_eq!(vocab.idx("reina"), Some(1));
        assert_eq!(vocab.idx("príncipe"), None);
    }

    #[test]
    #[should_panic]
    fn duplicate_words_panic() {
        SimpleVocab::new(vec![
            "rey".to_owned(),
            "reina".to_owned(),
            "rey".to_owned(),
        ]);
    }
}
