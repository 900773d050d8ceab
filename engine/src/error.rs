use crate::DocId;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors returned by the engine. Every failure is a normal typed outcome;
/// no operation mutates state before failing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A stop word supplied at construction contains a control character.
    #[error("invalid stop word {0:?}")]
    InvalidStopWord(String),
    /// A document word contains a control character.
    #[error("invalid word {0:?}")]
    InvalidWord(String),
    /// A query token is malformed: a bare `-`, a doubled `--`, or a word
    /// with a control character.
    #[error("invalid query word {0:?}")]
    InvalidQueryWord(String),
    /// A document with this id is already live.
    #[error("document {0} already exists")]
    DuplicateDocument(DocId),
    /// The ratings sequence was empty; an average cannot be computed.
    #[error("ratings must not be empty")]
    EmptyRatings,
    /// Lookup of a document id that is not live.
    #[error("document {0} not found")]
    DocumentNotFound(DocId),
    /// A position argument outside `[0, document_count)`.
    #[error("position {position} out of range for {count} documents")]
    PositionOutOfRange { position: usize, count: usize },
}
