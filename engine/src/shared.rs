use crate::error::Result;
use crate::index::SearchEngine;
use crate::{DocId, Document, DocumentStatus};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Cheaply clonable engine handle for cross-thread access. The store and
/// the inverted index must mutate together, so a single `RwLock` guards
/// both: queries and lookups take read locks, add/remove/dedup take the
/// write lock.
#[derive(Clone)]
pub struct SharedSearchEngine {
    inner: Arc<RwLock<SearchEngine>>,
}

impl SharedSearchEngine {
    pub fn new(engine: SearchEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    pub fn add_document(
        &self,
        document_id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        self.inner
            .write()
            .add_document(document_id, text, status, ratings)
    }

    pub fn remove_document(&self, document_id: DocId) {
        self.inner.write().remove_document(document_id);
    }

    pub fn remove_duplicates(&self) -> Vec<DocId> {
        crate::dedup::remove_duplicates(&mut self.inner.write())
    }

    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.inner.read().find_top_documents(raw_query)
    }

    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.inner
            .read()
            .find_top_documents_with_status(raw_query, status)
    }

    pub fn match_document(
        &self,
        raw_query: &str,
        document_id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        self.inner.read().match_document(raw_query, document_id)
    }

    pub fn word_frequencies(&self, document_id: DocId) -> HashMap<String, f64> {
        self.inner.read().word_frequencies(document_id).clone()
    }

    pub fn document_count(&self) -> usize {
        self.inner.read().document_count()
    }

    pub fn document_id(&self, position: usize) -> Result<DocId> {
        self.inner.read().document_id(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readers_see_writes_across_threads() {
        let shared = SharedSearchEngine::new(
            SearchEngine::from_stop_words_text("the").unwrap(),
        );
        let writer = shared.clone();
        let handle = std::thread::spawn(move || {
            for id in 0..20 {
                writer
                    .add_document(id, "shared cat", DocumentStatus::Actual, &[1])
                    .unwrap();
            }
        });
        handle.join().unwrap();

        assert_eq!(shared.document_count(), 20);
        let top = shared.find_top_documents("cat").unwrap();
        assert!(!top.is_empty());
        // A term in every live document carries zero idf.
        assert!(top.iter().all(|d| d.relevance == 0.0));
    }
}
