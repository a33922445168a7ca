//! Integration tests for creating, converting, revoking, and opening
//! share links over real stores.

use chrono::Duration;

use anondocs_core::error::ErrorKind;
use anondocs_entity::share::{ExpiryPolicy, ShareMode};
use anondocs_service::{DocumentService, ShareService};
use anondocs_share::{EnvelopeDecoder, EnvelopeEncoder, KdfParams, ShareError, ShareUrl};
use anondocs_storage::Stores;

struct TestApp {
    documents: DocumentService,
    shares: ShareService,
}

impl TestApp {
    fn new() -> Self {
        Self::with_stores(Stores::in_memory())
    }

    fn with_stores(stores: Stores) -> Self {
        let encoder = EnvelopeEncoder::new(KdfParams::new(256, 1, 1).expect("kdf params"));
        let urls = ShareUrl::new("https://docs.example/", "shared").expect("share url");
        Self {
            documents: DocumentService::new(stores.documents.clone()),
            shares: ShareService::new(
                stores.documents,
                stores.links,
                encoder,
                EnvelopeDecoder::new(),
                urls,
            ),
        }
    }

    async fn document(&self, title: &str, body: &str) -> anondocs_entity::document::Document {
        let doc = self.documents.create(Some(title)).await.expect("create");
        self.documents.save(doc.id, None, body).await.expect("save")
    }
}

fn share_error(err: &anondocs_core::AppError) -> ShareError {
    ShareError::from_app_error(err)
        .cloned()
        .unwrap_or_else(|| panic!("expected a share error, got {err}"))
}

#[tokio::test]
async fn test_public_link_opens_without_password() {
    let app = TestApp::new();
    let doc = app.document("Notes", "<p>hi</p>").await;

    let link = app
        .shares
        .create_link(doc.id, ShareMode::Public, None, ExpiryPolicy::from_days(7))
        .await
        .expect("create link");

    assert!(link.is_public);
    assert!(link.url.starts_with("https://docs.example/?shared=PUB%3A"));
    assert_eq!(link.source_doc_id, Some(doc.id));
    let expires = link.expires_at.expect("expiry");
    assert_eq!(expires - link.created_at, Duration::days(7));

    let snapshot = app.shares.open_shared(&link.url, None).expect("open");
    assert_eq!(snapshot.title, "Notes");
    assert_eq!(snapshot.body, "<p>hi</p>");
    assert_eq!(snapshot.expires_at, link.expires_at);
    assert_eq!(snapshot.source_doc_id, Some(doc.id.to_string()));
    assert!(!app.shares.is_private_link(&link.url));
}

#[tokio::test]
async fn test_private_link_requires_the_right_password() {
    let app = TestApp::new();
    let doc = app.document("Secret", "<p>plan</p>").await;

    let link = app
        .shares
        .create_link(doc.id, ShareMode::Private, Some("correct-horse"), ExpiryPolicy::Never)
        .await
        .expect("create link");
    assert!(!link.is_public);
    assert!(link.expires_at.is_none());
    assert!(app.shares.is_private_link(&link.url));

    assert_eq!(
        app.shares.open_shared(&link.url, None),
        Err(ShareError::PasswordRequired)
    );
    assert_eq!(
        app.shares.open_shared(&link.url, Some("wrong-horse")),
        Err(ShareError::IncorrectPasswordOrCorrupt)
    );
    let snapshot = app
        .shares
        .open_shared(&link.url, Some("correct-horse"))
        .expect("open");
    assert_eq!(snapshot.body, "<p>plan</p>");
}

#[tokio::test]
async fn test_private_link_without_password_is_refused() {
    let app = TestApp::new();
    let doc = app.document("Secret", "<p>plan</p>").await;

    for password in [None, Some("")] {
        let err = app
            .shares
            .create_link(doc.id, ShareMode::Private, password, ExpiryPolicy::Never)
            .await
            .unwrap_err();
        assert_eq!(share_error(&err), ShareError::InvalidRequest);
        assert_eq!(err.kind, ErrorKind::Validation);
    }
    assert!(app.shares.list_links().await.expect("list").is_empty());
}

#[tokio::test]
async fn test_sharing_a_missing_document() {
    let app = TestApp::new();
    let err = app
        .shares
        .create_link(
            anondocs_core::types::DocumentId::new(),
            ShareMode::Public,
            None,
            ExpiryPolicy::Never,
        )
        .await
        .unwrap_err();
    assert_eq!(share_error(&err), ShareError::SourceDocumentMissing);
}

#[tokio::test]
async fn test_expired_link_reports_expired() {
    let app = TestApp::new();
    let doc = app.document("Notes", "<p>hi</p>").await;
    let link = app
        .shares
        .create_link(doc.id, ShareMode::Private, Some("pw"), ExpiryPolicy::from_days(1))
        .await
        .expect("create link");

    let later = link.expires_at.expect("expiry") + Duration::milliseconds(1);
    assert_eq!(
        app.shares.open_shared_at(&link.url, Some("pw"), later),
        Err(ShareError::Expired)
    );
    assert_eq!(
        app.shares.open_shared_at(&link.url, Some("nope"), later),
        Err(ShareError::IncorrectPasswordOrCorrupt)
    );
}

#[tokio::test]
async fn test_toggle_reencodes_current_content_and_keeps_expiry() {
    let app = TestApp::new();
    let doc = app.document("Notes", "<p>v1</p>").await;
    let link = app
        .shares
        .create_link(doc.id, ShareMode::Public, None, ExpiryPolicy::from_days(3))
        .await
        .expect("create link");

    app.documents
        .save(doc.id, None, "<p>v2</p>")
        .await
        .expect("save");

    // Public -> private needs a password.
    let err = app.shares.toggle_visibility(link.id, None).await.unwrap_err();
    assert_eq!(share_error(&err), ShareError::InvalidRequest);

    let private = app
        .shares
        .toggle_visibility(link.id, Some("new-secret"))
        .await
        .expect("toggle");
    assert!(!private.is_public);
    assert_ne!(private.url, link.url);
    assert_eq!(private.expires_at, link.expires_at);
    assert_eq!(private.created_at, link.created_at);

    let snapshot = app
        .shares
        .open_shared(&private.url, Some("new-secret"))
        .expect("open");
    assert_eq!(snapshot.body, "<p>v2</p>");
    assert_eq!(snapshot.expires_at, link.expires_at);

    // Private -> public needs nothing.
    let public = app
        .shares
        .toggle_visibility(link.id, None)
        .await
        .expect("toggle");
    assert!(public.is_public);
    assert!(app.shares.open_shared(&public.url, None).is_ok());

    let stored = app.shares.get_link(link.id).await.expect("get");
    assert_eq!(stored, public);
}

#[tokio::test]
async fn test_toggle_after_source_deleted() {
    let app = TestApp::new();
    let doc = app.document("Notes", "<p>hi</p>").await;
    let link = app
        .shares
        .create_link(doc.id, ShareMode::Private, Some("pw"), ExpiryPolicy::Never)
        .await
        .expect("create link");
    app.documents.delete(doc.id).await.expect("delete");

    let err = app.shares.toggle_visibility(link.id, None).await.unwrap_err();
    assert_eq!(share_error(&err), ShareError::SourceDocumentMissing);
    assert_eq!(err.kind, ErrorKind::NotFound);

    let listed = app.shares.list_links().await.expect("list");
    assert_eq!(listed.len(), 1);
    assert!(listed[0].document_title.is_none());

    // The URL itself still opens.
    assert!(app.shares.open_shared(&link.url, Some("pw")).is_ok());
}

#[tokio::test]
async fn test_list_newest_first_and_revoke() {
    let app = TestApp::new();
    let doc = app.document("Notes", "<p>hi</p>").await;

    let first = app
        .shares
        .create_link(doc.id, ShareMode::Public, None, ExpiryPolicy::Never)
        .await
        .expect("create link");
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = app
        .shares
        .create_link(doc.id, ShareMode::Public, None, ExpiryPolicy::Never)
        .await
        .expect("create link");

    let listed = app.shares.list_links().await.expect("list");
    let ids: Vec<_> = listed.iter().map(|s| s.record.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert_eq!(listed[0].document_title.as_deref(), Some("Notes"));

    app.shares.revoke(first.id).await.expect("revoke");
    let err = app.shares.revoke(first.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(app.shares.list_links().await.expect("list").len(), 1);
}

#[tokio::test]
async fn test_open_garbage_inputs() {
    let app = TestApp::new();
    assert_eq!(
        app.shares.open_shared("https://docs.example/?other=1", None),
        Err(ShareError::UnrecognizedFormat)
    );
    assert_eq!(
        app.shares.open_shared("hello world", None),
        Err(ShareError::UnrecognizedFormat)
    );
    assert_eq!(
        app.shares.open_shared("https://docs.example/?shared=PUB%3A%40%40", None),
        Err(ShareError::CorruptPayload)
    );
}

#[tokio::test]
async fn test_opened_copy_is_saved_only_on_request() {
    let app = TestApp::new();
    let doc = app.document("Notes", "<p>hi</p>").await;
    let link = app
        .shares
        .create_link(doc.id, ShareMode::Public, None, ExpiryPolicy::Never)
        .await
        .expect("create link");

    let snapshot = app.shares.open_shared(&link.url, None).expect("open");
    assert_eq!(app.documents.list().await.expect("list").len(), 1);

    let copy = app
        .documents
        .import_snapshot(&snapshot)
        .await
        .expect("import");
    assert_ne!(copy.id, doc.id);
    assert_eq!(copy.title, "Notes");
    assert_eq!(app.documents.list().await.expect("list").len(), 2);
}

#[tokio::test]
async fn test_file_backed_links_survive_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = anondocs_core::config::StorageConfig {
        data_dir: dir.path().to_string_lossy().into_owned(),
        ..Default::default()
    };

    let link = {
        let app = TestApp::with_stores(Stores::open(&config).await.expect("open"));
        let doc = app.document("Notes", "<p>hi</p>").await;
        app.shares
            .create_link(doc.id, ShareMode::Private, Some("pw"), ExpiryPolicy::Never)
            .await
            .expect("create link")
    };

    let app = TestApp::with_stores(Stores::open(&config).await.expect("reopen"));
    let listed = app.shares.list_links().await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].record, link);
    assert_eq!(listed[0].document_title.as_deref(), Some("Notes"));

    let toggled = app
        .shares
        .toggle_visibility(link.id, None)
        .await
        .expect("toggle");
    assert!(toggled.is_public);
}

#[tokio::test]
async fn test_huge_expiry_creates_a_link_that_opens() {
    let app = TestApp::new();
    let doc = app.document("Notes", "<p>hi</p>").await;

    let link = app
        .shares
        .create_link(doc.id, ShareMode::Public, None, ExpiryPolicy::from_days(u32::MAX))
        .await
        .expect("create link");
    assert!(link.expires_at.expect("expiry") > link.created_at);

    let snapshot = app.shares.open_shared(&link.url, None).expect("open");
    assert_eq!(snapshot.expires_at, link.expires_at);
}
