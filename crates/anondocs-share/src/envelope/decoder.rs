//! Envelope decoding with password and expiry enforcement.

use chrono::{DateTime, Utc};
use tracing::debug;

use anondocs_entity::share::DocumentSnapshot;

use super::tag::EnvelopeTag;
use super::transport;
use crate::crypto::PasswordCipher;
use crate::error::ShareError;

/// Turns envelope strings back into snapshots.
///
/// Decoding is a pure function of the envelope, the password and the
/// clock. Any input, including arbitrary garbage, yields either a
/// snapshot or a [`ShareError`].
#[derive(Debug, Clone, Default)]
pub struct EnvelopeDecoder {
    /// Cipher for private envelopes. Costs come from each envelope's header.
    cipher: PasswordCipher,
}

impl EnvelopeDecoder {
    /// Creates a new decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `envelope`, checking expiry against the current time.
    pub fn decode(
        &self,
        envelope: &str,
        password: Option<&str>,
    ) -> Result<DocumentSnapshot, ShareError> {
        self.decode_at(envelope, password, Utc::now())
    }

    /// Decodes `envelope`, checking expiry against `now`.
    ///
    /// Order of checks:
    /// 1. Tag (`UnrecognizedFormat`)
    /// 2. Payload: public base64/JSON (`CorruptPayload`), or private
    ///    password presence (`PasswordRequired`) then decryption and JSON
    ///    (`IncorrectPasswordOrCorrupt`)
    /// 3. Expiry (`Expired`)
    ///
    /// Expiry is only checked on a fully decoded snapshot, so an expired
    /// private link reveals nothing, not even that it expired, without the
    /// right password.
    pub fn decode_at(
        &self,
        envelope: &str,
        password: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<DocumentSnapshot, ShareError> {
        let (tag, payload) = EnvelopeTag::split(envelope).ok_or(ShareError::UnrecognizedFormat)?;

        let snapshot = match tag {
            EnvelopeTag::Public => self.decode_public(payload)?,
            EnvelopeTag::Private => {
                let password = password
                    .filter(|p| !p.is_empty())
                    .ok_or(ShareError::PasswordRequired)?;
                self.decode_private(payload, password)?
            }
        };

        if snapshot.is_expired_at(now) {
            debug!(tag = %tag, "Envelope decoded but expired");
            return Err(ShareError::Expired);
        }

        Ok(snapshot)
    }

    fn decode_public(&self, payload: &str) -> Result<DocumentSnapshot, ShareError> {
        let json = transport::decode(payload).map_err(|e| {
            debug!(error = %e, "Public payload is not valid base64");
            ShareError::CorruptPayload
        })?;

        serde_json::from_slice(&json).map_err(|e| {
            debug!(error = %e, "Public payload is not a snapshot");
            ShareError::CorruptPayload
        })
    }

    fn decode_private(
        &self,
        payload: &str,
        password: &str,
    ) -> Result<DocumentSnapshot, ShareError> {
        let sealed = transport::decode(payload).map_err(|e| {
            debug!(error = %e, "Private payload is not valid base64");
            ShareError::IncorrectPasswordOrCorrupt
        })?;

        let json = self.cipher.open(password, &sealed).map_err(|e| {
            debug!(error = %e, "Private payload did not open");
            ShareError::IncorrectPasswordOrCorrupt
        })?;

        serde_json::from_slice(&json).map_err(|e| {
            debug!(error = %e, "Private plaintext is not a snapshot");
            ShareError::IncorrectPasswordOrCorrupt
        })
    }
}
