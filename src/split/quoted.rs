//! Quote-aware splitting.
//!
//! Double-quoted regions are unescaped as Go-style string literals, backtick
//! regions are taken verbatim. Outside quotes, `\` may escape a double quote,
//! a backtick, a space or itself; escaping anything else is an error.

use std::fmt;

use thiserror::Error;
use tracing::trace;

use super::unquote::{UnquoteError, unquote};
use super::{DEFAULT_ESCAPE, SEPARATOR};

const ESCAPE: char = DEFAULT_ESCAPE;

/// A quoting dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    /// `"..."`, unescaped after the region closes.
    Double,
    /// `` `...` ``, taken verbatim.
    Backtick,
}

impl Quote {
    /// The character opening and closing this kind of region.
    pub fn delimiter(self) -> char {
        match self {
            Quote::Double => '"',
            Quote::Backtick => '`',
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.delimiter())
    }
}

/// Errors that can occur when splitting with quotes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("missing terminating {0}")]
    UnterminatedQuote(Quote),

    #[error("unknown escape {escape}{found}")]
    InvalidEscape { escape: char, found: char },

    #[error("unquoting {literal:?}: {source}")]
    MalformedQuotedLiteral {
        literal: String,
        #[source]
        source: UnquoteError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Region {
    #[default]
    Bare,
    Quoted(Quote),
}

#[derive(Debug, Default)]
struct Splitter {
    region: Region,
    escaped: bool,
    /// The word being built.
    word: String,
    /// Raw text of the open quote region. Holds the opening `"` for double
    /// quotes so it can be parsed as a literal once closed.
    quoted: String,
    words: Vec<String>,
}

impl Splitter {
    fn feed(&mut self, c: char) -> Result<(), SplitError> {
        let escaped = std::mem::take(&mut self.escaped);

        match (self.region, c) {
            (Region::Quoted(Quote::Backtick), '`') => self.close_backtick(),
            (Region::Quoted(Quote::Backtick), _) => self.push_quoted(escaped, c),

            // A doubled escape inside double quotes stays doubled in the raw
            // literal; the unquoter turns it into one.
            (Region::Quoted(Quote::Double), ESCAPE) if escaped => {
                self.quoted.push(ESCAPE);
                self.quoted.push(ESCAPE);
            }
            (Region::Quoted(Quote::Double), ESCAPE) => self.escaped = true,
            (Region::Quoted(Quote::Double), '"') if !escaped => self.close_double()?,
            (Region::Quoted(Quote::Double), _) => self.push_quoted(escaped, c),

            (Region::Bare, ESCAPE | '"' | '`' | SEPARATOR) if escaped => self.push_word(c),
            (Region::Bare, ESCAPE) => self.escaped = true,
            (Region::Bare, '"') => self.open(Quote::Double),
            (Region::Bare, '`') => self.open(Quote::Backtick),
            (Region::Bare, SEPARATOR) => self.finish_word(),
            (Region::Bare, found) if escaped => {
                return Err(SplitError::InvalidEscape {
                    escape: ESCAPE,
                    found,
                });
            }
            (Region::Bare, _) => self.push_word(c),
        }

        Ok(())
    }

    fn push_word(&mut self, c: char) {
        self.word.push(c);
    }

    fn push_quoted(&mut self, escaped: bool, c: char) {
        if escaped {
            self.quoted.push(ESCAPE);
        }
        self.quoted.push(c);
    }

    fn open(&mut self, quote: Quote) {
        trace!(%quote, "opening quote");
        if quote == Quote::Double {
            self.quoted.push('"');
        }
        self.region = Region::Quoted(quote);
    }

    fn close_double(&mut self) -> Result<(), SplitError> {
        self.quoted.push('"');
        let unquoted =
            unquote(&self.quoted).map_err(|source| SplitError::MalformedQuotedLiteral {
                literal: self.quoted.clone(),
                source,
            })?;
        self.word.push_str(&unquoted);
        self.close();
        Ok(())
    }

    fn close_backtick(&mut self) {
        self.word.push_str(&self.quoted);
        self.close();
    }

    fn close(&mut self) {
        trace!(region = ?self.region, "closing quote");
        self.quoted.clear();
        self.region = Region::Bare;
    }

    fn finish_word(&mut self) {
        if self.word.is_empty() {
            return;
        }
        trace!(word = %self.word, "word complete");
        self.words.push(std::mem::take(&mut self.word));
    }

    fn finish(mut self) -> Result<Vec<String>, SplitError> {
        if let Region::Quoted(quote) = self.region {
            return Err(SplitError::UnterminatedQuote(quote));
        }
        // A dangling escape outside quotes has nothing to escape and is dropped.
        self.finish_word();
        Ok(self.words)
    }
}

/// Split a line on spaces, honouring double-quoted and backtick regions.
///
/// Adjacent quoted and unquoted text joins into one word. Empty words are
/// dropped, except that an input of exactly `""` or ``` `` ``` yields one.
pub fn tokenize_quoted(input: &str) -> Result<Vec<String>, SplitError> {
    let mut splitter = Splitter::default();
    for c in input.chars() {
        splitter.feed(c)?;
    }
    let words = splitter.finish()?;
    if words.is_empty() && is_empty_quote(input) {
        return Ok(vec![String::new()]);
    }
    Ok(words)
}

fn is_empty_quote(input: &str) -> bool {
    input == "\"\"" || input == "``"
}
