//! Readers for common embedding formats.

pub mod text;

pub mod word2vec;
