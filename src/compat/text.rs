//! Readers for text formats.
//!
//! This module provides two readers:
//!
//! 1. `ReadText`: word embeddings in text format. In this format, each
//!    line contains a word followed by its embedding. The word and the
//!    embedding vector components are separated by a space. This format
//!    is used by GloVe.
//! 2. `ReadTextDims`: this format is the same as (1), but the data is
//!    preceded by a line with the shape of the embedding matrix. This
//!    format is used by word2vec's text output.
//!
//! For example:
//!
//! ```
//! use std::io::Cursor;
//!
//! use wordeval::prelude::*;
//!
//! let mut reader = Cursor::new("2 3\nrey 1 0 0\nreina 0 1 0\n");
//! let embeddings = Embeddings::read_text_dims(&mut reader).unwrap();
//!
//! assert!(embeddings.contains("reina"));
//! ```

use std::io::BufRead;

use ndarray::Array2;

use crate::embeddings::Embeddings;
use crate::error::{Error, Result};
use crate::storage::NdArray;
use crate::util::{check_unique_words, read_number};
use crate::vocab::SimpleVocab;

/// Method to construct `Embeddings` from a text file.
///
/// This trait defines an extension to `Embeddings` to read the word embeddings
/// from a text stream. The text should contain one word embedding per line in
/// the following format:
///
/// *word0 component_1 component_2 ... component_n*
pub trait ReadText<R>
where
    Self: Sized,
    R: BufRead,
{
    /// Read the embeddings from the given buffered reader.
    fn read_text(reader: &mut R) -> Result<Self>;

    /// Read the embeddings from the given buffered reader.
    ///
    /// In contrast to `read_text`, this constructor does not
    /// fail if a token contains invalid UTF-8. Instead, it will
    /// replace invalid UTF-8 characters by the replacement
    /// character.
    fn read_text_lossy(reader: &mut R) -> Result<Self>;
}

impl<R> ReadText<R> for Embeddings<SimpleVocab, NdArray>
where
    R: BufRead,
{
    fn read_text(reader: &mut R) -> Result<Self> {
        read_embeds(reader, None, false)
    }

    fn read_text_lossy(reader: &mut R) -> Result<Self> {
        read_embeds(reader, None, true)
    }
}

/// Method to construct `Embeddings` from a text file with dimensions.
///
/// This trait defines an extension to `Embeddings` to read the word embeddings
/// from a text stream. The text must contain as the first line the shape of
/// the embedding matrix:
///
/// *vocab_size n_components*
///
/// The remainder of the stream should contain one word embedding per line in
/// the following format:
///
/// *word0 component_1 component_2 ... component_n*
pub trait ReadTextDims<R>
where
    Self: Sized,
    R: BufRead,
{
    /// Read the embeddings from the given buffered reader.
    fn read_text_dims(reader: &mut R) -> Result<Self>;

    /// Read the embeddings from the given buffered reader.
    ///
    /// In contrast to `read_text_dims`, this constructor does not
    /// fail if a token contains invalid UTF-8. Instead, it will
    /// replace invalid UTF-8 characters by the replacement
    /// character.
    fn read_text_dims_lossy(reader: &mut R) -> Result<Self>;
}

impl<R> ReadTextDims<R> for Embeddings<SimpleVocab, NdArray>
where
    R: BufRead,
{
    fn read_text_dims(reader: &mut R) -> Result<Self> {
        let n_words = read_number(reader, b' ')?;
        let embed_len = read_number(reader, b'\n')?;

        read_embeds(reader, Some((n_words, embed_len)), false)
    }

    fn read_text_dims_lossy(reader: &mut R) -> Result<Self> {
        let n_words = read_number(reader, b' ')?;
        let embed_len = read_number(reader, b'\n')?;

        read_embeds(reader, Some((n_words, embed_len)), true)
    }
}

fn read_embeds<R>(
    reader: &mut R,
    shape: Option<(usize, usize)>,
    lossy: bool,
) -> Result<Embeddings<SimpleVocab, NdArray>>
where
    R: BufRead,
{
    let (mut words, mut data) = if let Some((n_words, dims)) = shape {
        (
            Vec::with_capacity(n_words),
            Vec::with_capacity(n_words * dims),
        )
    } else {
        (Vec::new(), Vec::new())
    };

    let mut dims = shape.map(|(_, dims)| dims);

    loop {
        let mut buf = Vec::new();
        match reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| Error::io_error("Cannot read line from embedding file", e))?
        {
            0 => break,
            n => {
                if buf[n - 1] == b'\n' {
                    buf.pop();
                }
            }
        };

        let line = if lossy {
            String::from_utf8_lossy(&buf).into_owned()
        } else {
            String::from_utf8(buf)
                .map_err(|e| Error::Format(format!("Token contains invalid UTF-8: {}", e)))?
        };

        let mut parts = line
            .split(|c: char| c.is_ascii_whitespace())
            .filter(|part| !part.is_empty());

        let word = parts
            .next()
            .ok_or_else(|| Error::Format(String::from("Spurious empty line")))?;
        words.push(word.to_owned());

        let len_before = data.len();
        for part in parts {
            let component: f32 = part.parse().map_err(|e| {
                Error::Format(format!("Cannot parse vector component '{}': {}", part, e))
            })?;
            if !component.is_finite() {
                return Err(Error::Format(format!(
                    "Non-finite vector component '{}' for '{}'",
                    part, word
                )));
            }
            data.push(component);
        }

        let line_dims = data.len() - len_before;
        match dims {
            Some(dims) if dims != line_dims => {
                return Err(Error::Format(format!(
                    "Incorrect embedding dimensionality for '{}', expected: {}, got: {}",
                    word, dims, line_dims
                )))
            }
            Some(_) => (),
            None => dims = Some(line_dims),
        }
    }

    if let Some((n_words, _)) = shape {
        if words.len() != n_words {
            return Err(Error::Format(format!(
                "Incorrect vocabulary size, expected: {}, got: {}",
                n_words,
                words.len()
            )));
        }
    }

    check_unique_words(&words)?;

    let matrix = Array2::from_shape_vec((words.len(), dims.unwrap_or(0)), data)?;

    Ok(Embeddings::from_unnormalized(words, matrix))
}
