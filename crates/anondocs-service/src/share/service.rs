//! Share link service: create, list, convert, revoke, and open links.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use anondocs_core::config::ShareConfig;
use anondocs_core::error::AppError;
use anondocs_core::types::{DocumentId, LinkId};
use anondocs_entity::document::Document;
use anondocs_entity::share::{DocumentSnapshot, ExpiryPolicy, LinkRecord, ShareMode};
use anondocs_share::{
    EnvelopeDecoder, EnvelopeEncoder, EnvelopeTag, ShareError, ShareUrl, build_snapshot_at,
    build_snapshot_expiring_at,
};
use anondocs_storage::{DocumentStore, LinkRegistry, Stores};

/// A link record together with the current title of its source document.
#[derive(Debug, Clone, Serialize)]
pub struct LinkSummary {
    /// The registry record.
    pub record: LinkRecord,
    /// Title of the source document, `None` if it has been deleted.
    pub document_title: Option<String>,
}

/// Manages share links for stored documents.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Document store, read for the content being shared.
    documents: DocumentStore,
    /// Link registry.
    links: LinkRegistry,
    /// Envelope encoder.
    encoder: EnvelopeEncoder,
    /// Envelope decoder.
    decoder: EnvelopeDecoder,
    /// Share URL builder.
    urls: ShareUrl,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        documents: DocumentStore,
        links: LinkRegistry,
        encoder: EnvelopeEncoder,
        decoder: EnvelopeDecoder,
        urls: ShareUrl,
    ) -> Self {
        Self {
            documents,
            links,
            encoder,
            decoder,
            urls,
        }
    }

    /// Creates a share service over `stores` using the share configuration.
    pub fn from_config(stores: &Stores, config: &ShareConfig) -> Result<Self, AppError> {
        Ok(Self::new(
            stores.documents.clone(),
            stores.links.clone(),
            EnvelopeEncoder::from_config(config)?,
            EnvelopeDecoder::new(),
            ShareUrl::from_config(config)?,
        ))
    }

    /// Generates a share link for the current content of a document and
    /// records it in the registry.
    pub async fn create_link(
        &self,
        doc_id: DocumentId,
        mode: ShareMode,
        password: Option<&str>,
        expiry: ExpiryPolicy,
    ) -> Result<LinkRecord, AppError> {
        require_password(mode, password)?;

        let doc = self.source_document(doc_id).await?;
        let snapshot =
            build_snapshot_at(&doc.title, &doc.content, Some(doc.id.to_string()), expiry, Utc::now());
        let url = self.encode_url(&snapshot, mode, password)?;

        let record = LinkRecord {
            id: LinkId::new(),
            url,
            is_public: mode.is_public(),
            created_at: snapshot.created_at,
            expires_at: snapshot.expires_at,
            source_doc_id: Some(doc.id),
        };
        self.links.put(&record.id, &record).await?;

        info!(
            link_id = %record.id,
            doc_id = %doc.id,
            mode = %mode,
            expires_at = ?record.expires_at,
            "Share link created"
        );

        Ok(record)
    }

    /// Lists all recorded links, newest first.
    pub async fn list_links(&self) -> Result<Vec<LinkSummary>, AppError> {
        let mut records = self.links.list_all().await?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut summaries = Vec::with_capacity(records.len());
        for record in records {
            let document_title = match record.source_doc_id {
                Some(id) => self.documents.get(&id).await?.map(|doc| doc.title),
                None => None,
            };
            summaries.push(LinkSummary {
                record,
                document_title,
            });
        }
        Ok(summaries)
    }

    /// Gets a link record by ID.
    pub async fn get_link(&self, link_id: LinkId) -> Result<LinkRecord, AppError> {
        self.links
            .get(&link_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Share link {link_id} not found")))
    }

    /// Flips a link between public and private.
    ///
    /// Making a link private needs a new password. Making it public needs
    /// none, and anyone holding the new URL can read the document.
    pub async fn toggle_visibility(
        &self,
        link_id: LinkId,
        password: Option<&str>,
    ) -> Result<LinkRecord, AppError> {
        let record = self.get_link(link_id).await?;
        self.set_visibility(link_id, record.mode().toggled(), password)
            .await
    }

    /// Re-encodes a link in `mode` from the current content of its source
    /// document.
    ///
    /// The old envelope is never opened. The original expiry is kept so the
    /// link's time bound does not change with its visibility. Setting the
    /// mode a link already has re-encodes it anyway, which for private links
    /// replaces the password.
    pub async fn set_visibility(
        &self,
        link_id: LinkId,
        mode: ShareMode,
        password: Option<&str>,
    ) -> Result<LinkRecord, AppError> {
        require_password(mode, password)?;

        let mut record = self.get_link(link_id).await?;
        let doc_id = record.source_doc_id.ok_or(ShareError::SourceDocumentMissing)?;
        let doc = self.source_document(doc_id).await?;

        let snapshot = build_snapshot_expiring_at(
            &doc.title,
            &doc.content,
            Some(doc.id.to_string()),
            record.expires_at,
            Utc::now(),
        );
        let url = self.encode_url(&snapshot, mode, password)?;
        record.set_envelope(url, mode);
        self.links.put(&record.id, &record).await?;

        if mode.is_public() {
            warn!(link_id = %record.id, "Share link is now public; anyone with the URL can read it");
        } else {
            info!(link_id = %record.id, "Share link is now private");
        }

        Ok(record)
    }

    /// Removes a link from the registry.
    ///
    /// URLs already handed out keep decoding; the registry only tracks
    /// which links were made.
    pub async fn revoke(&self, link_id: LinkId) -> Result<(), AppError> {
        if !self.links.delete(&link_id).await? {
            return Err(AppError::not_found(format!("Share link {link_id} not found")));
        }
        info!(link_id = %link_id, "Share link revoked");
        Ok(())
    }

    /// Opens a pasted share URL (or bare envelope). Never writes anything.
    pub fn open_shared(
        &self,
        input: &str,
        password: Option<&str>,
    ) -> Result<DocumentSnapshot, ShareError> {
        self.open_shared_at(input, password, Utc::now())
    }

    /// Opens a share URL, checking expiry against `now`.
    pub fn open_shared_at(
        &self,
        input: &str,
        password: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<DocumentSnapshot, ShareError> {
        let envelope = self.urls.extract(input)?;
        self.decoder.decode_at(&envelope, password, now)
    }

    /// Whether a share input carries a private envelope, so a caller can
    /// ask for the password up front.
    pub fn is_private_link(&self, input: &str) -> bool {
        self.urls
            .extract(input)
            .ok()
            .and_then(|envelope| EnvelopeTag::split(&envelope).map(|(tag, _)| tag))
            .is_some_and(|tag| tag == EnvelopeTag::Private)
    }

    async fn source_document(&self, doc_id: DocumentId) -> Result<Document, AppError> {
        match self.documents.get(&doc_id).await? {
            Some(doc) => Ok(doc),
            None => Err(ShareError::SourceDocumentMissing.into()),
        }
    }

    fn encode_url(
        &self,
        snapshot: &DocumentSnapshot,
        mode: ShareMode,
        password: Option<&str>,
    ) -> Result<String, AppError> {
        let envelope = self.encoder.encode(snapshot, mode, password)?;
        Ok(self.urls.build(&envelope))
    }
}

fn require_password(mode: ShareMode, password: Option<&str>) -> Result<(), ShareError> {
    match (mode, password) {
        (ShareMode::Private, None) | (ShareMode::Private, Some("")) => {
            Err(ShareError::InvalidRequest)
        }
        _ => Ok(()),
    }
}
