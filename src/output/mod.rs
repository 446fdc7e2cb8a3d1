//! Output formatting for split results.

mod response;

pub use response::format_words;
