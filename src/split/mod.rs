//! Word splitting for shell-like command lines.

mod quoted;
mod simple;
mod unquote;

use serde::{Deserialize, Serialize};

pub use quoted::{Quote, SplitError, tokenize_quoted};
pub use simple::{tokenize_simple, tokenize_simple_with};
pub use unquote::{UnquoteError, quote, unquote};

/// The escape character used when none is configured.
pub const DEFAULT_ESCAPE: char = '\\';

/// The only character that separates words.
pub const SEPARATOR: char = ' ';

/// Which splitting dialect to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Spaces and a single escape character; never fails.
    Simple,
    /// Double-quoted and backtick regions in addition to escapes.
    #[default]
    Quoted,
}

/// Options for [`split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// The splitting dialect.
    pub mode: Mode,
    /// Escape character for [`Mode::Simple`]. Quoted mode always uses `\`.
    pub escape: char,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            escape: DEFAULT_ESCAPE,
        }
    }
}

/// Split a line into words using the given options.
pub fn split(input: &str, options: &Options) -> Result<Vec<String>, SplitError> {
    match options.mode {
        Mode::Simple => Ok(tokenize_simple_with(input, options.escape)),
        Mode::Quoted => tokenize_quoted(input),
    }
}
