//! Word-level inverted index over a set of titled text documents.
//!
//! An [`InvertedIndex`] is built once from `(texts, titles)`, written in a
//! line-oriented text format, read back, and queried with phrases that
//! return per-title hit counts.

pub mod codec;
pub mod error;
pub mod index;
pub mod persist;
pub mod store;
pub mod tokenizer;

pub use error::{Error, Result};
pub use index::{DocId, DocSet, InvertedIndex};
