//! Share codec error taxonomy.

use anondocs_core::error::{AppError, ErrorKind};

/// Every expected way a share operation can fail.
///
/// The `Display` text of each variant is the message shown to end users.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShareError {
    /// A private envelope was requested without a password.
    #[error("Private links require a password")]
    InvalidRequest,
    /// The envelope carries neither the public nor the private tag.
    #[error("Invalid share format")]
    UnrecognizedFormat,
    /// A public envelope's payload could not be decoded into a snapshot.
    #[error("Invalid share link")]
    CorruptPayload,
    /// A private envelope was opened without a password.
    #[error("A password is required to open this shared document")]
    PasswordRequired,
    /// A private envelope did not open with the given password.
    #[error("Incorrect password or corrupted link")]
    IncorrectPasswordOrCorrupt,
    /// The envelope decoded, but its expiry has passed.
    #[error("This shared link has expired")]
    Expired,
    /// The document a link was generated from is gone.
    #[error("Original document no longer available")]
    SourceDocumentMissing,
    /// A cryptographic primitive failed while building an envelope.
    #[error("Share encoding failed: {0}")]
    Internal(String),
}

impl ShareError {
    /// Check if asking the user for a (different) password may help.
    pub fn is_password_retryable(&self) -> bool {
        matches!(self, Self::PasswordRequired | Self::IncorrectPasswordOrCorrupt)
    }

    /// The application error kind this failure is reported as.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest | Self::UnrecognizedFormat | Self::CorruptPayload => {
                ErrorKind::Validation
            }
            Self::PasswordRequired | Self::IncorrectPasswordOrCorrupt => ErrorKind::Authentication,
            Self::Expired => ErrorKind::Expired,
            Self::SourceDocumentMissing => ErrorKind::NotFound,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Recovers the share error carried by an [`AppError`], if any.
    pub fn from_app_error(err: &AppError) -> Option<&ShareError> {
        err.source.as_deref()?.downcast_ref::<ShareError>()
    }
}

impl From<ShareError> for AppError {
    fn from(err: ShareError) -> Self {
        AppError::with_source(err.kind(), err.to_string(), err)
    }
}
