use std::collections::HashSet;
use std::io::BufRead;

use ndarray::{Array1, ArrayView1, ArrayViewMut1, ArrayViewMut2};
use ordered_float::NotNan;

use crate::error::{Error, Result};

pub fn l2_normalize(mut v: ArrayViewMut1<f32>) -> f32 {
    let norm = v.dot(&v).sqrt();

    if norm != 0. {
        v /= norm;
    }

    norm
}

pub fn l2_normalize_array(mut v: ArrayViewMut2<f32>) -> Array1<f32> {
    let mut norms = Vec::with_capacity(v.nrows());
    for embedding in v.outer_iter_mut() {
        norms.push(l2_normalize(embedding));
    }

    norms.into()
}

/// Element-wise median of equal-length vectors.
///
/// For an even number of vectors, each component is the mean of the
/// two middle values. Fails with `Error::InvalidArgument` when
/// `vectors` is empty or a component is NaN.
pub fn median(vectors: &[ArrayView1<f32>]) -> Result<Array1<f32>> {
    let n = vectors.len();
    if n == 0 {
        return Err(Error::invalid_argument(
            "cannot compute the median of zero vectors",
        ));
    }

    let dims = vectors[0].len();
    if vectors.iter().any(|v| v.len() != dims) {
        return Err(Error::invalid_argument(
            "cannot compute the median of vectors with different lengths",
        ));
    }

    let mut median = Array1::zeros(dims);
    let mut column = Vec::with_capacity(n);

    for (d, component) in median.iter_mut().enumerate() {
        column.clear();
        for v in vectors {
            column.push(
                NotNan::new(v[d])
                    .map_err(|_| Error::invalid_argument("vector component is NaN"))?,
            );
        }
        column.sort_unstable();

        *component = if n % 2 == 1 {
            *column[n / 2]
        } else {
            (*column[n / 2 - 1] + *column[n / 2]) / 2.
        };
    }

    Ok(median)
}

/// Check that every word occurs once.
pub fn check_unique_words(words: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(words.len());
    match words.iter().find(|&word| !seen.insert(word)) {
        Some(word) => Err(Error::Format(format!("Duplicate word: {}", word))),
        None => Ok(()),
    }
}

pub fn read_number(reader: &mut dyn BufRead, delim: u8) -> Result<usize> {
    let field_str = read_string(reader, delim, false)?;
    field_str.trim().parse().map_err(|e| {
        Error::Format(format!(
            "Cannot parse shape component '{}': {}",
            field_str, e
        ))
    })
}

pub fn read_string(reader: &mut dyn BufRead, delim: u8, lossy: bool) -> Result<String> {
    let mut buf = Vec::new();
    reader
        .read_until(delim, &mut buf)
        .map_err(|e| Error::io_error("Cannot read string", e))?;
    if buf.last() == Some(&delim) {
        buf.pop();
    }

    let s = if lossy {
        String::from_utf8_lossy(&buf).into_owned()
    } else {
        String::from_utf8(buf)
            .map_err(|e| Error::Format(format!("Token contains invalid UTF-8: {}", e)))?
    };

    Ok(s)
}
