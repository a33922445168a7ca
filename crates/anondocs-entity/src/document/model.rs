//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use anondocs_core::types::DocumentId;

/// Title given to documents that have none.
pub const UNTITLED: &str = "Untitled";

/// A rich-text document kept in the local document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier.
    pub id: DocumentId,
    /// Display title.
    pub title: String,
    /// Body markup.
    pub content: String,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last saved.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Creates an empty document with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::new(),
            title: title.into(),
            content: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the document as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Word and character counts of a document's visible text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Whitespace-separated words.
    pub words: usize,
    /// Non-whitespace characters.
    pub chars: usize,
}
