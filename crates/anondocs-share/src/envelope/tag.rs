//! Envelope mode tags.

use std::fmt;

use anondocs_entity::share::ShareMode;

/// Separator between the tag and the payload.
pub const TAG_SEPARATOR: char = ':';

/// The literal prefix identifying an envelope's mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeTag {
    /// `PUB`: base64 plaintext payload.
    Public,
    /// `PRV`: password-sealed payload.
    Private,
}

impl EnvelopeTag {
    /// The literal tag text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "PUB",
            Self::Private => "PRV",
        }
    }

    /// Splits an envelope into its tag and payload.
    ///
    /// Returns `None` when the string does not start with a known tag
    /// followed by the separator.
    pub fn split(envelope: &str) -> Option<(Self, &str)> {
        let (tag, payload) = envelope.split_once(TAG_SEPARATOR)?;
        let tag = match tag {
            "PUB" => Self::Public,
            "PRV" => Self::Private,
            _ => return None,
        };
        Some((tag, payload))
    }

    /// Joins this tag with a payload.
    pub fn wrap(self, payload: &str) -> String {
        format!("{}{}{}", self.as_str(), TAG_SEPARATOR, payload)
    }
}

impl From<ShareMode> for EnvelopeTag {
    fn from(mode: ShareMode) -> Self {
        match mode {
            ShareMode::Public => Self::Public,
            ShareMode::Private => Self::Private,
        }
    }
}

impl From<EnvelopeTag> for ShareMode {
    fn from(tag: EnvelopeTag) -> Self {
        match tag {
            EnvelopeTag::Public => Self::Public,
            EnvelopeTag::Private => Self::Private,
        }
    }
}

impl fmt::Display for EnvelopeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
