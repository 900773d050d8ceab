use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_word, split_into_words};
use std::collections::{BTreeSet, HashSet};

/// A parsed query: deduplicated, stop-word-free plus and minus terms.
/// `BTreeSet` keeps iteration deterministic, which makes matched-word lists
/// and relevance accumulation reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
}

fn parse_query_word(token: &str) -> Result<QueryWord<'_>> {
    let (data, is_minus) = match token.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (token, false),
    };
    if data.is_empty() || data.starts_with('-') || !is_valid_word(data) {
        return Err(SearchError::InvalidQueryWord(token.to_string()));
    }
    Ok(QueryWord { data, is_minus })
}

/// Parse a raw query into plus and minus term sets. Any malformed token
/// fails the whole parse; nothing is silently dropped except stop words,
/// which are filtered both as raw tokens and after minus-marker stripping.
pub fn parse_query(raw: &str, stop_words: &HashSet<String>) -> Result<Query> {
    let mut query = Query::default();
    for token in split_into_words(raw) {
        if stop_words.contains(token) {
            continue;
        }
        let word = parse_query_word(token)?;
        if stop_words.contains(word.data) {
            continue;
        }
        if word.is_minus {
            query.minus_words.insert(word.data.to_string());
        } else {
            query.plus_words.insert(word.data.to_string());
        }
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::make_stop_words;

    fn stops() -> HashSet<String> {
        make_stop_words(["and", "in", "on"]).unwrap()
    }

    #[test]
    fn classifies_and_deduplicates() {
        let q = parse_query("fluffy cat fluffy -tail", &stops()).unwrap();
        assert_eq!(q.plus_words.len(), 2);
        assert!(q.plus_words.contains("fluffy"));
        assert!(q.plus_words.contains("cat"));
        assert_eq!(q.minus_words.len(), 1);
        assert!(q.minus_words.contains("tail"));
    }

    #[test]
    fn stop_words_filtered_in_both_forms() {
        let q = parse_query("cat and -in on", &stops()).unwrap();
        assert_eq!(q.plus_words.len(), 1);
        assert!(q.minus_words.is_empty());
    }

    #[test]
    fn malformed_tokens_fail_the_parse() {
        for raw in ["cat -", "cat --tail", "-", "--", "ca\u{1}t"] {
            assert!(
                matches!(
                    parse_query(raw, &stops()),
                    Err(SearchError::InvalidQueryWord(_))
                ),
                "expected parse failure for {raw:?}"
            );
        }
    }

    #[test]
    fn interior_and_trailing_hyphens_are_allowed() {
        let q = parse_query("self-driving cat- -x-y", &stops()).unwrap();
        assert!(q.plus_words.contains("self-driving"));
        assert!(q.plus_words.contains("cat-"));
        assert!(q.minus_words.contains("x-y"));
    }

    #[test]
    fn term_in_both_forms_lands_in_both_sets() {
        let q = parse_query("cat -cat", &stops()).unwrap();
        assert!(q.plus_words.contains("cat"));
        assert!(q.minus_words.contains("cat"));
    }
}
