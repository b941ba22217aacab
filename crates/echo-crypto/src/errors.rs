//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption or authentication failed
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Sealed input too short to carry a nonce prefix
    #[error("Sealed input too short: expected at least {expected} bytes, got {actual}")]
    TruncatedInput {
        /// Minimum sealed length in bytes
        expected: usize,
        /// Actual sealed length in bytes
        actual: usize,
    },
}
