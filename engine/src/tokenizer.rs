use crate::error::{Result, SearchError};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref VALID_WORD: Regex = Regex::new(r"^[^\x00-\x1f]+$").expect("valid regex");
}

/// A word is valid if it contains no C0 control characters.
pub fn is_valid_word(word: &str) -> bool {
    VALID_WORD.is_match(word)
}

/// Split text on runs of whitespace, discarding empty fragments and
/// preserving order.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Build the immutable stop-word set from a token collection, rejecting any
/// token with a control character. Empty tokens are dropped.
pub fn make_stop_words<S, I>(source: I) -> Result<HashSet<String>>
where
    S: AsRef<str>,
    I: IntoIterator<Item = S>,
{
    let mut stop_words = HashSet::new();
    for word in source {
        let word = word.as_ref();
        if word.is_empty() {
            continue;
        }
        if !is_valid_word(word) {
            return Err(SearchError::InvalidStopWord(word.to_string()));
        }
        stop_words.insert(word.to_string());
    }
    Ok(stop_words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_runs() {
        assert_eq!(split_into_words("  white \t cat  "), vec!["white", "cat"]);
        assert!(split_into_words("   ").is_empty());
    }

    #[test]
    fn control_characters_are_invalid() {
        assert!(is_valid_word("cat"));
        assert!(is_valid_word("self-driving"));
        assert!(!is_valid_word("ca\u{1}t"));
        assert!(!is_valid_word("\t"));
    }

    #[test]
    fn stop_words_deduplicate_and_validate() {
        let set = make_stop_words(["and", "in", "on", "and"]).unwrap();
        assert_eq!(set.len(), 3);

        let err = make_stop_words(["and", "i\u{2}n"]).unwrap_err();
        assert_eq!(err, SearchError::InvalidStopWord("i\u{2}n".to_string()));
    }
}
