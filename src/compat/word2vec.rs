//! Reader for the word2vec binary format.
//!
//! The file starts with a line containing the vocabulary size and
//! the dimensionality of the embeddings. Every word is followed by a
//! space and its embedding as little-endian `f32` components. word2vec
//! writes a newline after each embedding, which is ignored.

use std::io::BufRead;

use byteorder::{LittleEndian, ReadBytesExt};
use ndarray::Array2;

use crate::embeddings::Embeddings;
use crate::error::{Error, Result};
use crate::storage::NdArray;
use crate::util::{check_unique_words, read_number, read_string};
use crate::vocab::SimpleVocab;

/// Method to construct `Embeddings` from a word2vec binary file.
///
/// This trait defines an extension to `Embeddings` to read the word embeddings
/// from a file in word2vec binary format.
pub trait ReadWord2Vec<R>
where
    Self: Sized,
    R: BufRead,
{
    /// Read the embeddings from the given buffered reader.
    fn read_word2vec_binary(reader: &mut R) -> Result<Self>;

    /// Read the embeddings from the given buffered reader.
    ///
    /// In contrast to `read_word2vec_binary`, this constructor does not
    /// fail if a token contains invalid UTF-8. Instead, it will replace
    /// invalid UTF-8 characters by the replacement character.
    fn read_word2vec_binary_lossy(reader: &mut R) -> Result<Self>;
}

impl<R> ReadWord2Vec<R> for Embeddings<SimpleVocab, NdArray>
where
    R: BufRead,
{
    fn read_word2vec_binary(reader: &mut R) -> Result<Self> {
        read_word2vec_binary_raw(reader, false)
    }

    fn read_word2vec_binary_lossy(reader: &mut R) -> Result<Self> {
        read_word2vec_binary_raw(reader, true)
    }
}

fn read_word2vec_binary_raw<R>(
    reader: &mut R,
    lossy: bool,
) -> Result<Embeddings<SimpleVocab, NdArray>>
where
    R: BufRead,
{
    let n_words = read_number(reader, b' ')?;
    let embed_len = read_number(reader, b'\n')?;

    let mut data = vec![0f32; n_words * embed_len];
    let mut words = Vec::with_capacity(n_words);

    for embedding in data.chunks_exact_mut(embed_len.max(1)).take(n_words) {
        let word = read_string(reader, b' ', lossy)?;
        let word = word.trim();
        if word.is_empty() {
            return Err(Error::Format(format!(
                "Empty token after {} words",
                words.len()
            )));
        }
        words.push(word.to_owned());

        reader
            .read_f32_into::<LittleEndian>(&mut embedding[..embed_len])
            .map_err(|e| Error::io_error("Cannot read word embedding", e))?;

        if embedding[..embed_len].iter().any(|v| !v.is_finite()) {
            return Err(Error::Format(format!(
                "Non-finite vector component for '{}'",
                word
            )));
        }
    }

    if words.len() != n_words {
        return Err(Error::Format(format!(
            "Incorrect vocabulary size, expected: {}, got: {}",
            n_words,
            words.len()
        )));
    }

    check_unique_words(&words)?;

    let matrix = Array2::from_shape_vec((n_words, embed_len), data)?;

    Ok(Embeddings::from_unnormalized(words, matrix))
}
