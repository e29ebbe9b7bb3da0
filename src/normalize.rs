//! Normalization of benchmark text.
//!
//! Benchmark datasets are usually written with capitalization,
//! punctuation, and (for Spanish) accented vowels, whereas embedding
//! vocabularies are often lowercased and stripped of diacritics. The
//! [`normalize`] function folds text onto such a vocabulary.

/// Normalize text.
///
/// The text is lowercased and every character that is not one of
/// `a`-`z`, `ñ`, `á`, `é`, `í`, `ó`, or `ú` is replaced by a single
/// space. Runs of spaces are not collapsed. If `remove_tildes` is
/// `true`, the accented vowels are replaced by their base forms. `ñ` is
/// kept in both cases.
///
/// ```
/// use wordeval::normalize::normalize;
///
/// assert_eq!(normalize("Café", true), "cafe");
/// assert_eq!(normalize("Café", false), "café");
/// ```
pub fn normalize(text: &str, remove_tildes: bool) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'ñ' => c,
            'á' | 'é' | 'í' | 'ó' | 'ú' if !remove_tildes => c,
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            _ => ' ',
        })
        .collect()
}

/// Normalize text, removing tildes from accented vowels.
pub fn normalize_default(text: &str) -> String {
    normalize(text, true)
}
