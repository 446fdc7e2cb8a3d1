//! wordsplit - split shell-like command lines into words.
//!
//! Two dialects are supported: a simple one where only spaces and a single
//! escape character are special, and a quote-aware one that adds Go-style
//! double-quoted literals and verbatim backtick regions.

pub mod audit;
pub mod config;
pub mod output;
pub mod split;

pub use config::{Config, Settings};
pub use split::{Mode, Options, SplitError, split, tokenize_quoted, tokenize_simple};
