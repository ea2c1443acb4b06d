//! Word corpus loading
//!
//! This module contains the word list reader and the length-bucketed corpus
//! that every later stage of generation reads from.

/// Word list loading and length bucketing
pub mod corpus;

pub use corpus::{WordCorpus, load_words};
