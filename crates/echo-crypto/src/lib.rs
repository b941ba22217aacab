//! # Echo Crypto - Envelope Sealing Primitives
//!
//! Symmetric authenticated encryption for the transport envelope.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `symmetric` | XChaCha20-Poly1305 | Envelope sealing |
//!
//! ## Security Properties
//!
//! - **XChaCha20**: 192-bit nonce, constant-time, side-channel immune
//! - **Per-message nonces**: every seal draws a fresh random nonce and
//!   carries it as a prefix of the sealed bytes; a nonce is never reused
//!   under a given key
//! - **Key hygiene**: key material is zeroized on drop and never leaves
//!   this crate

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod symmetric;

// Re-exports
pub use errors::CryptoError;
pub use symmetric::{open, seal, Nonce, SecretKey, NONCE_LEN};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
