//! XChaCha20-Poly1305 sealing under a password-derived key.
//!
//! Sealed layout:
//!
//! ```text
//! version (1) | memory_kib (4, BE) | iterations (4, BE) | parallelism (4, BE)
//!   | salt (16) | nonce (24) | ciphertext + tag
//! ```
//!
//! Everything before the nonce is authenticated as associated data, so a
//! modified cost parameter fails the same way a modified ciphertext does.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use chacha20poly1305::aead::{Aead, AeadCore, KeyInit, Payload};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};

use super::kdf::KdfParams;

/// Current sealed-format version.
pub const FORMAT_VERSION: u8 = 1;

const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 24;
const TAG_LEN: usize = 16;
const HEADER_LEN: usize = 1 + 12 + SALT_LEN;

/// Low-level failures of the password cipher.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CipherError {
    /// The sealed bytes are shorter than the fixed layout.
    #[error("sealed data is truncated")]
    Truncated,
    /// The sealed bytes use a format this build does not know.
    #[error("unsupported sealed format version {0}")]
    UnsupportedVersion(u8),
    /// Key derivation costs are outside the accepted bounds.
    #[error("key derivation parameters out of bounds")]
    UnreasonableParams,
    /// Argon2 rejected its inputs.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),
    /// Authentication failed: wrong password or modified data.
    #[error("authentication failed")]
    Rejected,
    /// Encryption itself failed.
    #[error("encryption failed")]
    Encryption,
}

/// Seals and opens byte strings with a password.
#[derive(Debug, Clone, Default)]
pub struct PasswordCipher {
    /// Costs used when sealing.
    params: KdfParams,
}

impl PasswordCipher {
    /// Creates a cipher that seals with the given key derivation costs.
    pub fn new(params: KdfParams) -> Self {
        Self { params }
    }

    /// Encrypts `plaintext` under `password` with a fresh salt and nonce.
    pub fn seal(&self, password: &str, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        let mut header = Vec::with_capacity(HEADER_LEN);
        header.push(FORMAT_VERSION);
        header.extend_from_slice(&self.params.memory_kib.to_be_bytes());
        header.extend_from_slice(&self.params.iterations.to_be_bytes());
        header.extend_from_slice(&self.params.parallelism.to_be_bytes());
        header.extend_from_slice(&salt);

        let key = self.params.derive_key(password, &salt)?;
        let cipher = XChaCha20Poly1305::new(Key::from_slice(&key));
        let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);

        let ciphertext = cipher
            .encrypt(
                &nonce,
                Payload {
                    msg: plaintext,
                    aad: &header,
                },
            )
            .map_err(|_| CipherError::Encryption)?;

        let mut sealed = header;
        sealed.reserve(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    /// Decrypts bytes produced by [`seal`](Self::seal).
    ///
    /// The key derivation costs are read from the header rather than from
    /// `self`, so links sealed under older settings keep opening.
    pub fn open(&self, password: &str, sealed: &[u8]) -> Result<Vec<u8>, CipherError> {
        if sealed.len() < HEADER_LEN + NONCE_LEN + TAG_LEN {
            return Err(CipherError::Truncated);
        }

        let (header, rest) = sealed.split_at(HEADER_LEN);
        if header[0] != FORMAT_VERSION {
            return Err(CipherError::UnsupportedVersion(header[0]));
        }

        let params = KdfParams::new(
            read_u32(&header[1..5]),
            read_u32(&header[5..9]),
            read_u32(&header[9..13]),
        )?;
        let salt = &header[13..];

        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);
        let key = params.derive_key(password, salt)?;
        let cipher = XChaCha20Poly1305::new(Key::from_slice(&key));

        cipher
            .decrypt(
                XNonce::from_slice(nonce),
                Payload {
                    msg: ciphertext,
                    aad: header,
                },
            )
            .map_err(|_| CipherError::Rejected)
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_be_bytes(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> PasswordCipher {
        PasswordCipher::new(KdfParams::new(256, 1, 1).expect("valid"))
    }

    #[test]
    fn test_seal_then_open() {
        let cipher = cipher();
        let sealed = cipher.seal("pw", b"hello").expect("seal");
        assert_eq!(cipher.open("pw", &sealed).expect("open"), b"hello");
    }

    #[test]
    fn test_each_seal_uses_fresh_salt_and_nonce() {
        let cipher = cipher();
        let a = cipher.seal("pw", b"same").expect("seal");
        let b = cipher.seal("pw", b"same").expect("seal");
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let cipher = cipher();
        let sealed = cipher.seal("pw", b"hello").expect("seal");
        assert_eq!(cipher.open("other", &sealed), Err(CipherError::Rejected));
    }

    #[test]
    fn test_modified_header_is_rejected() {
        let cipher = cipher();
        let mut sealed = cipher.seal("pw", b"hello").expect("seal");
        // Flip a salt byte.
        sealed[20] ^= 0x01;
        assert_eq!(cipher.open("pw", &sealed), Err(CipherError::Rejected));
    }

    #[test]
    fn test_truncated_and_unknown_version() {
        let cipher = cipher();
        assert_eq!(cipher.open("pw", &[1, 2, 3]), Err(CipherError::Truncated));

        let mut sealed = cipher.seal("pw", b"hello").expect("seal");
        sealed[0] = 9;
        assert_eq!(
            cipher.open("pw", &sealed),
            Err(CipherError::UnsupportedVersion(9))
        );
    }

    #[test]
    fn test_huge_costs_in_header_are_refused() {
        let cipher = cipher();
        let mut sealed = cipher.seal("pw", b"hello").expect("seal");
        sealed[1..5].copy_from_slice(&u32::MAX.to_be_bytes());
        assert_eq!(
            cipher.open("pw", &sealed),
            Err(CipherError::UnreasonableParams)
        );
    }
}
