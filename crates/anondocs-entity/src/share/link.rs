//! Share link record kept in the link registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use anondocs_core::types::{DocumentId, LinkId};

use super::mode::ShareMode;

/// Metadata about a generated share link. The document content itself
/// only lives inside `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Unique link identifier.
    pub id: LinkId,
    /// The full shareable URL containing the envelope.
    pub url: String,
    /// Whether the envelope is readable without a password.
    pub is_public: bool,
    /// When the link was first created.
    pub created_at: DateTime<Utc>,
    /// When the link stops opening (if set).
    pub expires_at: Option<DateTime<Utc>>,
    /// The document the link was generated from.
    pub source_doc_id: Option<DocumentId>,
}

impl LinkRecord {
    /// Current visibility of the link.
    pub fn mode(&self) -> ShareMode {
        ShareMode::from_public_flag(self.is_public)
    }

    /// Check if the link's expiry is at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires| expires <= now)
    }

    /// Replaces the URL and visibility together.
    pub fn set_envelope(&mut self, url: String, mode: ShareMode) {
        self.url = url;
        self.is_public = mode.is_public();
    }
}
