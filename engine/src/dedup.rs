use crate::index::SearchEngine;
use crate::DocId;
use std::collections::{BTreeMap, BTreeSet};

/// Remove every document whose set of distinct words duplicates an earlier
/// document's. Frequencies are ignored; the first document to exhibit a
/// signature is retained. Returns the removed ids in scan order.
pub fn remove_duplicates(engine: &mut SearchEngine) -> Vec<DocId> {
    let mut seen: BTreeMap<BTreeSet<String>, DocId> = BTreeMap::new();
    let mut duplicates = Vec::new();

    for document_id in engine.document_ids().collect::<Vec<_>>() {
        let signature: BTreeSet<String> = engine
            .word_frequencies(document_id)
            .keys()
            .cloned()
            .collect();
        if seen.contains_key(&signature) {
            duplicates.push(document_id);
        } else {
            seen.insert(signature, document_id);
        }
    }

    for &document_id in &duplicates {
        tracing::debug!(document_id, "found duplicate document");
        engine.remove_document(document_id);
    }
    duplicates
}
