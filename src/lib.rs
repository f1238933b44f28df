//! Dictionary- and Viterbi-based word segmenter for Khmer text.
//!
//! Build a [`Segmenter`] once from a word list (and, optionally, a word
//! frequency table), then call [`Segmenter::segment`] as many times as
//! needed — construction is the only place that touches the filesystem.

pub mod classify;
pub mod cost;
pub mod dict;
pub mod error;
pub mod postprocess;
pub mod scan;
mod segmenter;
pub mod trie;
pub mod viterbi;

pub use dict::Dictionary;
pub use error::SegmenterError;
pub use segmenter::{Segmenter, SegmenterConfig};
