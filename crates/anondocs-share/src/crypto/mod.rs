//! Password-keyed authenticated encryption for private envelopes.

pub mod cipher;
pub mod kdf;

pub use cipher::{CipherError, PasswordCipher};
pub use kdf::KdfParams;
