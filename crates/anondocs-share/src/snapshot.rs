//! Snapshot construction from live document fields.

use chrono::{DateTime, Utc};
use serde_json::Map;

use anondocs_entity::share::{DocumentSnapshot, ExpiryPolicy};

/// Builds a snapshot taken now.
pub fn build_snapshot(
    title: &str,
    body: &str,
    source_doc_id: Option<String>,
    expiry: ExpiryPolicy,
) -> DocumentSnapshot {
    build_snapshot_at(title, body, source_doc_id, expiry, Utc::now())
}

/// Builds a snapshot taken at `now`.
///
/// `created_at` is truncated to whole milliseconds, the precision of the
/// envelope schema, so that decoding yields an identical snapshot.
pub fn build_snapshot_at(
    title: &str,
    body: &str,
    source_doc_id: Option<String>,
    expiry: ExpiryPolicy,
    now: DateTime<Utc>,
) -> DocumentSnapshot {
    let created_at = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);

    DocumentSnapshot {
        title: title.to_string(),
        body: body.to_string(),
        created_at,
        expires_at: expiry.expires_at(created_at),
        source_doc_id,
        extensions: Map::new(),
    }
}

/// Builds a snapshot taken at `now` that keeps an already-decided expiry.
///
/// Used when a link is re-encoded: the content is fresh but the original
/// time bound of the share still applies.
pub fn build_snapshot_expiring_at(
    title: &str,
    body: &str,
    source_doc_id: Option<String>,
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> DocumentSnapshot {
    DocumentSnapshot {
        expires_at,
        ..build_snapshot_at(title, body, source_doc_id, ExpiryPolicy::Never, now)
    }
}
