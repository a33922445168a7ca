//! Document CRUD service.

use tracing::info;

use anondocs_core::error::AppError;
use anondocs_core::types::DocumentId;
use anondocs_entity::document::model::UNTITLED;
use anondocs_entity::document::{Document, DocumentStats};
use anondocs_entity::share::DocumentSnapshot;
use anondocs_storage::DocumentStore;

use super::{export, markup};

/// Title for a local copy of a shared document that had none.
const SHARED_FALLBACK_TITLE: &str = "Shared Document";

/// Manages documents in the document store.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Document store.
    store: DocumentStore,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Creates an empty document.
    pub async fn create(&self, title: Option<&str>) -> Result<Document, AppError> {
        let title = non_blank(title).unwrap_or(UNTITLED);
        let doc = Document::new(title);
        self.store.put(&doc.id, &doc).await?;

        info!(doc_id = %doc.id, "Document created");
        Ok(doc)
    }

    /// Lists all documents, most recently saved first.
    pub async fn list(&self) -> Result<Vec<Document>, AppError> {
        let mut docs = self.store.list_all().await?;
        docs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(docs)
    }

    /// Gets a document by ID.
    pub async fn get(&self, id: DocumentId) -> Result<Document, AppError> {
        self.store
            .get(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))
    }

    /// Saves new body content.
    ///
    /// Scripts are stripped from `content`. The title is, in order of
    /// preference: `title`, the current title unless it is blank or the
    /// placeholder, the first line of the body text, the placeholder.
    pub async fn save(
        &self,
        id: DocumentId,
        title: Option<&str>,
        content: &str,
    ) -> Result<Document, AppError> {
        let mut doc = self.get(id).await?;

        doc.content = markup::sanitize(content);
        doc.title = match non_blank(title) {
            Some(title) => title.to_string(),
            None if !doc.title.trim().is_empty() && doc.title != UNTITLED => doc.title,
            None => markup::derive_title(&doc.content).unwrap_or_else(|| UNTITLED.to_string()),
        };
        doc.touch();

        self.store.put(&doc.id, &doc).await?;

        info!(doc_id = %doc.id, bytes = doc.content.len(), "Document saved");
        Ok(doc)
    }

    /// Changes a document's title. A blank title becomes the placeholder.
    pub async fn rename(&self, id: DocumentId, title: &str) -> Result<Document, AppError> {
        let mut doc = self.get(id).await?;
        doc.title = non_blank(Some(title)).unwrap_or(UNTITLED).to_string();
        doc.touch();
        self.store.put(&doc.id, &doc).await?;
        Ok(doc)
    }

    /// Deletes a document.
    pub async fn delete(&self, id: DocumentId) -> Result<(), AppError> {
        if !self.store.delete(&id).await? {
            return Err(AppError::not_found(format!("Document {id} not found")));
        }
        info!(doc_id = %id, "Document deleted");
        Ok(())
    }

    /// Word and character counts of a document.
    pub async fn stats(&self, id: DocumentId) -> Result<DocumentStats, AppError> {
        Ok(markup::stats(&self.get(id).await?.content))
    }

    /// Character offset of the next occurrence of `term` after `after`.
    pub async fn find(
        &self,
        id: DocumentId,
        term: &str,
        after: Option<usize>,
    ) -> Result<Option<usize>, AppError> {
        if term.is_empty() {
            return Err(AppError::validation("Search term must not be empty"));
        }
        Ok(markup::find(&self.get(id).await?.content, term, after))
    }

    /// Renders a document as a standalone printable HTML page.
    pub async fn export_html(&self, id: DocumentId) -> Result<String, AppError> {
        Ok(export::printable_html(&self.get(id).await?))
    }

    /// Stores a decoded share snapshot as a new, independent document.
    pub async fn import_snapshot(&self, snapshot: &DocumentSnapshot) -> Result<Document, AppError> {
        let title = non_blank(Some(snapshot.title.as_str())).unwrap_or(SHARED_FALLBACK_TITLE);
        let mut doc = Document::new(title);
        doc.content = markup::sanitize(&snapshot.body);
        self.store.put(&doc.id, &doc).await?;

        info!(doc_id = %doc.id, "Saved local copy of shared document");
        Ok(doc)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
