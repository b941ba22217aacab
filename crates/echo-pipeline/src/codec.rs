//! # Envelope Codec
//!
//! Turns a [`Message`] into an opaque authenticated [`Envelope`] and
//! back. The codec owns its key material for the lifetime of one
//! pipeline run; there is no persistence or rotation.
//!
//! Error mapping is directional: anything that goes wrong while encoding
//! is a [`PipelineError::Encoding`]; truncation, failed authentication,
//! or an unreadable payload while decoding is a
//! [`PipelineError::Integrity`].

use crate::errors::PipelineError;
use echo_crypto::{open, seal, SecretKey};
use echo_types::{Envelope, Message};

/// Capability interface for turning messages into envelopes and back.
///
/// Stages hold a codec by reference (or `Arc`) instead of a pair of
/// curried closures, so there is no hidden captured state.
pub trait MessageCodec: Send + Sync {
    /// Serialize and seal one message.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Encoding` if the message cannot be
    /// serialized or sealed. Fatal to the run.
    fn encode(&self, message: &Message) -> Result<Envelope, PipelineError>;

    /// Open and deserialize one envelope.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Integrity` if the envelope was tampered
    /// with, sealed under a different key, or carries an unreadable
    /// payload. Fatal to the run.
    fn decode(&self, envelope: &Envelope) -> Result<Message, PipelineError>;
}

/// Authenticated-encryption codec: bincode payload sealed with
/// XChaCha20-Poly1305 under one per-run key.
pub struct EnvelopeCodec {
    key: SecretKey,
}

impl EnvelopeCodec {
    /// Construct a codec with fresh random key material.
    #[must_use]
    pub fn new() -> Self {
        Self {
            key: SecretKey::generate(),
        }
    }

    /// Construct a codec over existing key material.
    #[must_use]
    pub fn with_key(key: SecretKey) -> Self {
        Self { key }
    }
}

impl Default for EnvelopeCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageCodec for EnvelopeCodec {
    fn encode(&self, message: &Message) -> Result<Envelope, PipelineError> {
        let payload =
            bincode::serialize(message).map_err(|e| PipelineError::Encoding(e.to_string()))?;
        let sealed =
            seal(&self.key, &payload).map_err(|e| PipelineError::Encoding(e.to_string()))?;
        Ok(Envelope::from_bytes(sealed))
    }

    fn decode(&self, envelope: &Envelope) -> Result<Message, PipelineError> {
        let payload = open(&self.key, envelope.as_bytes())
            .map_err(|e| PipelineError::Integrity(e.to_string()))?;
        bincode::deserialize(&payload).map_err(|e| PipelineError::Integrity(e.to_string()))
    }
}

/// Pass-through codec for control runs: serializes without sealing.
///
/// No confidentiality and no tamper detection beyond what deserialization
/// happens to catch. Useful for measuring the cost of the AEAD layer and
/// for exercising the stages in isolation.
pub struct PlainCodec;

impl MessageCodec for PlainCodec {
    fn encode(&self, message: &Message) -> Result<Envelope, PipelineError> {
        let payload =
            bincode::serialize(message).map_err(|e| PipelineError::Encoding(e.to_string()))?;
        Ok(Envelope::from_bytes(payload))
    }

    fn decode(&self, envelope: &Envelope) -> Result<Message, PipelineError> {
        bincode::deserialize(envelope.as_bytes())
            .map_err(|e| PipelineError::Integrity(e.to_string()))
    }
}
