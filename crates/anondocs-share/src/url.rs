//! Embedding envelopes in share URLs and extracting them again.
//!
//! A share URL is `base + "?" + param + "=" + percentEncode(envelope)`
//! with no other query parameters.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use url::Url;

use anondocs_core::config::ShareConfig;
use anondocs_core::error::AppError;

use crate::envelope::EnvelopeTag;
use crate::error::ShareError;

/// Characters left unescaped, matching a URI component encoder.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds and parses share URLs for one base address.
#[derive(Debug, Clone)]
pub struct ShareUrl {
    /// Origin and path, without query or fragment.
    base: String,
    /// Query parameter carrying the envelope.
    param_name: String,
}

impl ShareUrl {
    /// Creates a builder for `base_url`. Any query or fragment on the base
    /// is dropped.
    pub fn new(base_url: &str, param_name: &str) -> Result<Self, AppError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| AppError::configuration(format!("Invalid share base URL '{base_url}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "Share base URL '{base_url}' cannot carry a query"
            )));
        }
        if param_name.is_empty() {
            return Err(AppError::configuration("Share parameter name must not be empty"));
        }

        base.set_query(None);
        base.set_fragment(None);

        Ok(Self {
            base: base.to_string(),
            param_name: param_name.to_string(),
        })
    }

    /// Creates a builder from the share configuration.
    pub fn from_config(config: &ShareConfig) -> Result<Self, AppError> {
        Self::new(&config.base_url, &config.param_name)
    }

    /// The query parameter name.
    pub fn param_name(&self) -> &str {
        &self.param_name
    }

    /// Builds the full share URL for `envelope`.
    pub fn build(&self, envelope: &str) -> String {
        format!(
            "{}?{}={}",
            self.base,
            utf8_percent_encode(&self.param_name, COMPONENT),
            utf8_percent_encode(envelope, COMPONENT)
        )
    }

    /// Pulls the envelope out of a pasted share URL.
    ///
    /// Accepts a full URL, a bare query string (`?shared=...`), or the
    /// envelope itself, percent-encoded or not. A URL without the share
    /// parameter is an [`ShareError::UnrecognizedFormat`].
    pub fn extract(&self, input: &str) -> Result<String, ShareError> {
        let input = input.trim();

        if EnvelopeTag::split(input).is_some() {
            return Ok(input.to_string());
        }

        if let Some(query) = input.strip_prefix('?') {
            return self.find_param(query);
        }

        if let Ok(url) = Url::parse(input) {
            if url.has_host() {
                return self.find_param(url.query().unwrap_or_default());
            }
        }

        percent_decode_str(input)
            .decode_utf8()
            .map(|decoded| decoded.into_owned())
            .map_err(|_| ShareError::UnrecognizedFormat)
    }

    fn find_param(&self, query: &str) -> Result<String, ShareError> {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == self.param_name.as_str())
            .map(|(_, value)| value.into_owned())
            .ok_or(ShareError::UnrecognizedFormat)
    }
}
