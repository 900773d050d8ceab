use crate::error::{Result, SearchError};
use crate::query::{parse_query, Query};
use crate::tokenizer::{is_valid_word, make_stop_words, split_into_words};
use crate::{DocId, Document, DocumentStatus};
use lazy_static::lazy_static;
use std::collections::{BTreeMap, HashMap, HashSet};

lazy_static! {
    static ref EMPTY_FREQS: HashMap<String, f64> = HashMap::new();
}

#[derive(Debug, Clone, Copy)]
struct DocumentData {
    rating: i32,
    status: DocumentStatus,
}

/// The canonical engine: owns the stop-word set, the inverted index, the
/// per-document metadata, and the insertion-ordered id list. Single logical
/// writer; wrap in [`crate::SharedSearchEngine`] for cross-thread access.
pub struct SearchEngine {
    stop_words: HashSet<String>,
    word_to_document_freqs: HashMap<String, HashMap<DocId, f64>>,
    document_to_word_freqs: HashMap<DocId, HashMap<String, f64>>,
    documents: HashMap<DocId, DocumentData>,
    document_ids: Vec<DocId>,
    max_results: usize,
}

impl SearchEngine {
    pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
    pub const EPSILON: f64 = 1e-6;

    /// Build an engine from a stop-word token collection. Fails if any stop
    /// word contains a control character; the set is immutable afterwards.
    pub fn new<S, I>(stop_words: I) -> Result<Self>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        Ok(Self {
            stop_words: make_stop_words(stop_words)?,
            word_to_document_freqs: HashMap::new(),
            document_to_word_freqs: HashMap::new(),
            documents: HashMap::new(),
            document_ids: Vec::new(),
            max_results: Self::MAX_RESULT_DOCUMENT_COUNT,
        })
    }

    /// Build an engine from a whitespace-separated stop-word line.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Self::new(split_into_words(text))
    }

    /// Override the result limit used by the `find_top_documents` family.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Ingest a document. All validation happens before any mutation, so a
    /// failure leaves no partial postings or metadata behind.
    pub fn add_document(
        &mut self,
        document_id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if self.documents.contains_key(&document_id) {
            return Err(SearchError::DuplicateDocument(document_id));
        }
        if ratings.is_empty() {
            return Err(SearchError::EmptyRatings);
        }
        let words = self.split_into_words_no_stop(text)?;

        let mut word_freqs: HashMap<String, f64> = HashMap::new();
        if !words.is_empty() {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for &word in &words {
                *counts.entry(word).or_insert(0) += 1;
            }
            let total = words.len() as f64;
            for (word, count) in counts {
                word_freqs.insert(word.to_string(), count as f64 / total);
            }
        }

        for (word, tf) in &word_freqs {
            self.word_to_document_freqs
                .entry(word.clone())
                .or_default()
                .insert(document_id, *tf);
        }
        self.documents.insert(
            document_id,
            DocumentData {
                rating: compute_average_rating(ratings),
                status,
            },
        );
        self.document_to_word_freqs.insert(document_id, word_freqs);
        self.document_ids.push(document_id);
        tracing::debug!(document_id, words = words.len(), "document added");
        Ok(())
    }

    /// Remove a document and all of its postings. Removing an absent id is
    /// a no-op, which keeps duplicate removal idempotent.
    pub fn remove_document(&mut self, document_id: DocId) {
        let word_freqs = match self.document_to_word_freqs.remove(&document_id) {
            Some(freqs) => freqs,
            None => return,
        };
        for word in word_freqs.keys() {
            if let Some(postings) = self.word_to_document_freqs.get_mut(word) {
                postings.remove(&document_id);
                if postings.is_empty() {
                    self.word_to_document_freqs.remove(word);
                }
            }
        }
        self.documents.remove(&document_id);
        self.document_ids.retain(|&id| id != document_id);
        tracing::debug!(document_id, "document removed");
    }

    /// The document's term -> tf view; empty for an absent or removed id.
    pub fn word_frequencies(&self, document_id: DocId) -> &HashMap<String, f64> {
        self.document_to_word_freqs
            .get(&document_id)
            .unwrap_or(&EMPTY_FREQS)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// The id at `position` in the insertion-ordered id list.
    pub fn document_id(&self, position: usize) -> Result<DocId> {
        self.document_ids
            .get(position)
            .copied()
            .ok_or(SearchError::PositionOutOfRange {
                position,
                count: self.document_ids.len(),
            })
    }

    /// Live document ids in insertion order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.document_ids.iter().copied()
    }

    /// Top documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Top documents whose status equals `status`.
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with_predicate(raw_query, |_id, document_status, _rating| {
            document_status == status
        })
    }

    /// Top documents accepted by a caller-supplied predicate over
    /// `(id, status, rating)`, ordered by relevance descending with a
    /// rating tie-break, truncated to the configured limit.
    pub fn find_top_documents_with_predicate<P>(
        &self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let query = parse_query(raw_query, &self.stop_words)?;
        let mut matched = self.find_all_documents(&query, predicate);

        matched.sort_by(|lhs, rhs| {
            if (lhs.relevance - rhs.relevance).abs() < Self::EPSILON {
                rhs.rating.cmp(&lhs.rating)
            } else {
                rhs.relevance
                    .partial_cmp(&lhs.relevance)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }
        });
        matched.truncate(self.max_results);
        Ok(matched)
    }

    /// The query's plus words present in one document, together with that
    /// document's status. If any minus word hits the document, the word
    /// list is empty.
    pub fn match_document(
        &self,
        raw_query: &str,
        document_id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = parse_query(raw_query, &self.stop_words)?;
        let data = self
            .documents
            .get(&document_id)
            .ok_or(SearchError::DocumentNotFound(document_id))?;
        let word_freqs = self.word_frequencies(document_id);

        if query
            .minus_words
            .iter()
            .any(|word| word_freqs.contains_key(word))
        {
            return Ok((Vec::new(), data.status));
        }
        let matched = query
            .plus_words
            .iter()
            .filter(|word| word_freqs.contains_key(*word))
            .cloned()
            .collect();
        Ok((matched, data.status))
    }

    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            if !is_valid_word(word) || word == "-" || word.starts_with("--") {
                return Err(SearchError::InvalidWord(word.to_string()));
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }

    fn inverse_document_freq(&self, postings: &HashMap<DocId, f64>) -> f64 {
        (self.documents.len() as f64 / postings.len() as f64).ln()
    }

    fn find_all_documents<P>(&self, query: &Query, predicate: P) -> Vec<Document>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        // BTreeMap keeps candidate emission deterministic before the sort.
        let mut document_to_relevance: BTreeMap<DocId, f64> = BTreeMap::new();
        for word in &query.plus_words {
            let postings = match self.word_to_document_freqs.get(word) {
                Some(postings) => postings,
                None => continue,
            };
            let idf = self.inverse_document_freq(postings);
            for (&document_id, &tf) in postings {
                let data = &self.documents[&document_id];
                if predicate(document_id, data.status, data.rating) {
                    *document_to_relevance.entry(document_id).or_insert(0.0) += tf * idf;
                }
            }
        }
        for word in &query.minus_words {
            if let Some(postings) = self.word_to_document_freqs.get(word) {
                for document_id in postings.keys() {
                    document_to_relevance.remove(document_id);
                }
            }
        }

        document_to_relevance
            .into_iter()
            .map(|(id, relevance)| Document {
                id,
                relevance,
                rating: self.documents[&id].rating,
            })
            .collect()
    }
}

/// Truncating integer average of a non-empty ratings sequence.
fn compute_average_rating(ratings: &[i32]) -> i32 {
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}
