//! # anondocs-share
//!
//! The share envelope codec. A [`DocumentSnapshot`] is turned into a
//! tagged string (`PUB:` or `PRV:`) that travels inside a share URL, and
//! turned back into a snapshot when the link is opened.
//!
//! ## Modules
//!
//! - `snapshot`: building snapshots from live document fields
//! - `envelope`: the encoder, the decoder, tags, and transport encoding
//! - `crypto`: Argon2id key derivation and XChaCha20-Poly1305 sealing
//! - `url`: embedding envelopes in share URLs and extracting them again
//! - `error`: the [`ShareError`] taxonomy
//!
//! Nothing in this crate performs I/O or touches a store.
//!
//! [`DocumentSnapshot`]: anondocs_entity::share::DocumentSnapshot

pub mod crypto;
pub mod envelope;
pub mod error;
pub mod snapshot;
pub mod url;

pub use crypto::{KdfParams, PasswordCipher};
pub use envelope::{EnvelopeDecoder, EnvelopeEncoder, EnvelopeTag};
pub use error::ShareError;
pub use snapshot::{build_snapshot, build_snapshot_at, build_snapshot_expiring_at};
pub use url::ShareUrl;
