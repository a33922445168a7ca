//! Argon2id key derivation with bounded cost parameters.

use argon2::{Algorithm, Argon2, Params, Version};

use anondocs_core::config::ShareConfig;
use anondocs_core::error::AppError;

use super::cipher::CipherError;

/// Length of the derived symmetric key in bytes.
pub const KEY_LEN: usize = 32;

/// Largest memory cost accepted from an envelope header (256 MiB).
pub const MAX_MEMORY_KIB: u32 = 256 * 1024;

/// Largest iteration count accepted from an envelope header.
pub const MAX_ITERATIONS: u32 = 16;

/// Largest lane count accepted from an envelope header.
pub const MAX_PARALLELISM: u32 = 8;

/// Argon2id cost parameters.
///
/// The parameters used to seal an envelope travel in its header, so
/// changing them never breaks links that already exist. Decoding refuses
/// headers outside the `MAX_*` bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Number of lanes.
    pub parallelism: u32,
}

impl KdfParams {
    /// Creates validated parameters.
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, CipherError> {
        let params = Self {
            memory_kib,
            iterations,
            parallelism,
        };
        params.argon2_params()?;
        Ok(params)
    }

    /// Builds parameters from the share configuration.
    pub fn from_config(config: &ShareConfig) -> Result<Self, AppError> {
        Self::new(
            config.kdf_memory_kib,
            config.kdf_iterations,
            config.kdf_parallelism,
        )
        .map_err(|e| AppError::configuration(format!("Invalid key derivation settings: {e}")))
    }

    /// Derives a key from `password` and `salt`.
    pub fn derive_key(&self, password: &str, salt: &[u8]) -> Result<[u8; KEY_LEN], CipherError> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.argon2_params()?);
        let mut key = [0u8; KEY_LEN];
        argon2
            .hash_password_into(password.as_bytes(), salt, &mut key)
            .map_err(|e| CipherError::KeyDerivation(e.to_string()))?;
        Ok(key)
    }

    fn argon2_params(&self) -> Result<Params, CipherError> {
        if self.memory_kib > MAX_MEMORY_KIB
            || self.iterations > MAX_ITERATIONS
            || self.parallelism > MAX_PARALLELISM
        {
            return Err(CipherError::UnreasonableParams);
        }
        Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(KEY_LEN),
        )
        .map_err(|e| CipherError::KeyDerivation(e.to_string()))
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}
