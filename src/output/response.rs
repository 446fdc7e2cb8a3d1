//! Rendering of one line's words.

use crate::config::OutputFormat;

/// Format the words of one input line, including the trailing newline.
pub fn format_words(words: &[String], format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => {
            let mut out = serde_json::to_string(words)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Lines => {
            let mut out = String::new();
            for word in words {
                out.push_str(word);
                out.push('\n');
            }
            out.push('\n');
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_json() {
        let out = format_words(&words(&["echo", "a b", "\"q\""]), OutputFormat::Json).unwrap();
        assert_eq!(out, "[\"echo\",\"a b\",\"\\\"q\\\"\"]\n");
    }

    #[test]
    fn test_format_json_empty() {
        assert_eq!(format_words(&[], OutputFormat::Json).unwrap(), "[]\n");
        assert_eq!(format_words(&words(&[""]), OutputFormat::Json).unwrap(), "[\"\"]\n");
    }

    #[test]
    fn test_format_lines() {
        let out = format_words(&words(&["ls", "-l"]), OutputFormat::Lines).unwrap();
        assert_eq!(out, "ls\n-l\n\n");
    }
}
