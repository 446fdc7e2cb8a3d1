//! Splitting on spaces with a single escape character.

use super::{DEFAULT_ESCAPE, SEPARATOR};

/// Split a line on spaces, using `\` as the escape character.
pub fn tokenize_simple(input: &str) -> Vec<String> {
    tokenize_simple_with(input, DEFAULT_ESCAPE)
}

/// Split a line on spaces, using `escape` as the escape character.
///
/// An escaped space or escape character is kept literally. Escaping anything
/// else drops the escape and keeps the character. Runs of spaces never
/// produce empty words.
pub fn tokenize_simple_with(input: &str, escape: char) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut escape_next = false;

    for c in input.chars() {
        if c == escape {
            if !escape_next {
                escape_next = true;
                continue;
            }
            current.push(c);
        } else if c == SEPARATOR {
            if escape_next {
                current.push(c);
            } else if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
        escape_next = false;
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_split() {
        assert_eq!(tokenize_simple("a b"), vec!["a", "b"]);
    }

    #[test]
    fn test_collapse_spaces() {
        assert_eq!(tokenize_simple("a  b"), vec!["a", "b"]);
        assert_eq!(tokenize_simple("   a   "), vec!["a"]);
        assert!(tokenize_simple("    ").is_empty());
        assert!(tokenize_simple("").is_empty());
    }

    #[test]
    fn test_escaped_space() {
        assert_eq!(tokenize_simple(r"a\ b"), vec!["a b"]);
        assert_eq!(
            tokenize_simple(r"a\ b c\  \ d   e"),
            vec!["a b", "c ", " d", "e"]
        );
    }

    #[test]
    fn test_escaped_escape() {
        assert_eq!(tokenize_simple(r"a\\b c"), vec![r"a\b", "c"]);
        assert_eq!(
            tokenize_simple(r"a\\b c\\\ d e\\ f"),
            vec![r"a\b", r"c\ d", r"e\", "f"]
        );
    }

    #[test]
    fn test_escape_other_is_dropped() {
        assert_eq!(tokenize_simple(r"\q\uux"), vec!["quux"]);
        assert_eq!(tokenize_simple(r#"say \"hi\""#), vec!["say", "\"hi\""]);
    }

    #[test]
    fn test_trailing_escape_dropped() {
        assert_eq!(tokenize_simple(r"foo\"), vec!["foo"]);
        assert_eq!(tokenize_simple(r"foo \"), vec!["foo"]);
    }

    #[test]
    fn test_quotes_are_plain() {
        assert_eq!(tokenize_simple(r#""a b""#), vec!["\"a", "b\""]);
    }

    #[test]
    fn test_custom_escape() {
        assert_eq!(
            tokenize_simple_with(r"arg1 arg2a^ arg2b arg3a^^arg3b \n", '^'),
            vec!["arg1", "arg2a arg2b", "arg3a^arg3b", r"\n"]
        );
    }

    #[test]
    fn test_unicode_words() {
        assert_eq!(tokenize_simple("héllo wörld\\ 日本"), vec!["héllo", "wörld 日本"]);
    }
}
