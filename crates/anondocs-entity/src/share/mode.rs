//! Share visibility modes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Who can read a share link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareMode {
    /// Anyone holding the URL can read the document.
    Public,
    /// The URL only opens with the password chosen at share time.
    Private,
}

impl ShareMode {
    /// Returns the mode for the `is_public` flag of a link record.
    pub fn from_public_flag(is_public: bool) -> Self {
        if is_public { Self::Public } else { Self::Private }
    }

    /// Check if this is the public mode.
    pub fn is_public(self) -> bool {
        self == Self::Public
    }

    /// The opposite mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Public => Self::Private,
            Self::Private => Self::Public,
        }
    }
}

impl fmt::Display for ShareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Private => write!(f, "private"),
        }
    }
}
