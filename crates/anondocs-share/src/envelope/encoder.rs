//! Envelope encoding for public and private share links.

use tracing::debug;

use anondocs_core::config::ShareConfig;
use anondocs_core::error::AppError;
use anondocs_entity::share::{DocumentSnapshot, ShareMode};

use super::tag::EnvelopeTag;
use super::transport;
use crate::crypto::{KdfParams, PasswordCipher};
use crate::error::ShareError;

/// Turns snapshots into envelope strings.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeEncoder {
    /// Cipher for private envelopes.
    cipher: PasswordCipher,
}

impl EnvelopeEncoder {
    /// Creates an encoder that seals private envelopes with the given costs.
    pub fn new(params: KdfParams) -> Self {
        Self {
            cipher: PasswordCipher::new(params),
        }
    }

    /// Creates an encoder from the share configuration.
    pub fn from_config(config: &ShareConfig) -> Result<Self, AppError> {
        Ok(Self::new(KdfParams::from_config(config)?))
    }

    /// Encodes `snapshot` in the requested mode.
    ///
    /// `password` is required and must be non-empty for
    /// [`ShareMode::Private`]; it is ignored for [`ShareMode::Public`].
    pub fn encode(
        &self,
        snapshot: &DocumentSnapshot,
        mode: ShareMode,
        password: Option<&str>,
    ) -> Result<String, ShareError> {
        let password = match (mode, password) {
            (ShareMode::Public, _) => None,
            (ShareMode::Private, Some(p)) if !p.is_empty() => Some(p),
            (ShareMode::Private, _) => return Err(ShareError::InvalidRequest),
        };

        let json = serde_json::to_vec(snapshot)
            .map_err(|e| ShareError::Internal(format!("snapshot serialization: {e}")))?;

        let payload = match password {
            None => transport::encode(&json),
            Some(password) => {
                let sealed = self
                    .cipher
                    .seal(password, &json)
                    .map_err(|e| ShareError::Internal(e.to_string()))?;
                transport::encode(&sealed)
            }
        };

        debug!(mode = %mode, payload_len = payload.len(), "Envelope encoded");

        Ok(EnvelopeTag::from(mode).wrap(&payload))
    }
}
