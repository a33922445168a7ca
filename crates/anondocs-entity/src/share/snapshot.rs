//! Document snapshot value object embedded in share envelopes.

use std::num::NonZeroU32;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How long a share link stays readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpiryPolicy {
    /// The link never expires.
    #[default]
    Never,
    /// The link expires this many days after creation.
    Days(NonZeroU32),
}

impl ExpiryPolicy {
    /// Builds a policy from a day count, where `0` means never.
    pub fn from_days(days: u32) -> Self {
        NonZeroU32::new(days).map_or(Self::Never, Self::Days)
    }

    /// The expiry instant for a snapshot created at `created_at`.
    ///
    /// A day count past the end of the representable calendar saturates to
    /// the latest whole millisecond chrono can hold.
    pub fn expires_at(self, created_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Never => None,
            Self::Days(days) => Some(
                created_at
                    .checked_add_signed(Duration::days(i64::from(days.get())))
                    .unwrap_or_else(latest_expiry),
            ),
        }
    }
}

fn latest_expiry() -> DateTime<Utc> {
    let max = DateTime::<Utc>::MAX_UTC;
    DateTime::from_timestamp_millis(max.timestamp_millis()).unwrap_or(max)
}

/// An immutable copy of a document's shareable fields, taken at share time.
///
/// Serializes to the canonical envelope schema: camelCase keys with
/// millisecond timestamps and an explicit `null` for a missing expiry.
/// Older payloads spelled some keys differently (`html`, `expires`,
/// `docId`); those are accepted on read. Keys this version does not know
/// are kept in `extensions` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    /// Display title.
    pub title: String,
    /// Body markup, opaque to the codec.
    #[serde(alias = "html")]
    pub body: String,
    /// When the snapshot was taken.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// When the snapshot stops decoding (`None` = never).
    #[serde(default, alias = "expires", with = "chrono::serde::ts_milliseconds_option")]
    pub expires_at: Option<DateTime<Utc>>,
    /// The stored document this snapshot was taken from.
    #[serde(default, alias = "docId", skip_serializing_if = "Option::is_none")]
    pub source_doc_id: Option<String>,
    /// Fields not part of the current schema.
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

impl DocumentSnapshot {
    /// Check if the snapshot's expiry is at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires| expires <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(value).expect("valid timestamp")
    }

    #[test]
    fn test_expiry_policy_from_days() {
        assert_eq!(ExpiryPolicy::from_days(0), ExpiryPolicy::Never);
        let created = ms(1_700_000_000_000);
        assert_eq!(ExpiryPolicy::Never.expires_at(created), None);
        assert_eq!(
            ExpiryPolicy::from_days(7).expires_at(created),
            Some(ms(1_700_604_800_000))
        );
    }

    #[test]
    fn test_expiry_policy_saturates_far_future() {
        let created = ms(1_700_000_000_000);
        let expires = ExpiryPolicy::from_days(u32::MAX)
            .expires_at(created)
            .expect("expiry");
        assert!(expires > created);
        assert_eq!(expires.timestamp_subsec_nanos() % 1_000_000, 0);
        assert_eq!(
            DateTime::from_timestamp_millis(expires.timestamp_millis()),
            Some(expires)
        );

        let snapshot = DocumentSnapshot {
            title: "Forever".into(),
            body: String::new(),
            created_at: created,
            expires_at: Some(expires),
            source_doc_id: None,
            extensions: Default::default(),
        };
        let json = serde_json::to_string(&snapshot).expect("serialize");
        let back: DocumentSnapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, snapshot);
        assert!(!back.is_expired_at(created));
    }

    #[test]
    fn test_canonical_json_has_null_expiry() {
        let snapshot = DocumentSnapshot {
            title: "Notes".into(),
            body: "<p>hi</p>".into(),
            created_at: ms(1_700_000_000_000),
            expires_at: None,
            source_doc_id: None,
            extensions: Map::new(),
        };
        let json = serde_json::to_value(&snapshot).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Notes",
                "body": "<p>hi</p>",
                "createdAt": 1_700_000_000_000_i64,
                "expiresAt": null,
            })
        );
    }

    #[test]
    fn test_legacy_field_names_are_accepted() {
        let json = r#"{"title":"Old","html":"<b>x</b>","createdAt":1700000000000,"expires":1700604800000,"docId":"1699999999999"}"#;
        let snapshot: DocumentSnapshot = serde_json::from_str(json).expect("deserialize");
        assert_eq!(snapshot.body, "<b>x</b>");
        assert_eq!(snapshot.expires_at, Some(ms(1_700_604_800_000)));
        assert_eq!(snapshot.source_doc_id.as_deref(), Some("1699999999999"));
        assert!(snapshot.extensions.is_empty());
    }

    #[test]
    fn test_unknown_fields_survive_a_round_trip() {
        let json = r#"{"title":"T","body":"","createdAt":1,"expiresAt":null,"theme":"light"}"#;
        let snapshot: DocumentSnapshot = serde_json::from_str(json).expect("deserialize");
        assert_eq!(snapshot.extensions.get("theme"), Some(&Value::from("light")));

        let back = serde_json::to_value(&snapshot).expect("serialize");
        assert_eq!(back["theme"], "light");
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let snapshot = DocumentSnapshot {
            title: String::new(),
            body: String::new(),
            created_at: ms(0),
            expires_at: Some(ms(10)),
            source_doc_id: None,
            extensions: Map::new(),
        };
        assert!(!snapshot.is_expired_at(ms(9)));
        assert!(snapshot.is_expired_at(ms(10)));
        assert!(snapshot.is_expired_at(ms(11)));
    }
}
