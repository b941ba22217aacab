//! Pipeline error types.
//!
//! All variants are unrecoverable: the run aborts and the error
//! propagates to the caller. There is no retry path. The producer does
//! not persist emitted messages, and an integrity failure indicates a
//! logic or security fault rather than a transient condition.

use thiserror::Error;

/// All errors that can abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Message could not be serialized or sealed for transport
    #[error("Message encoding failed: {0}")]
    Encoding(String),

    /// Envelope failed authentication or carried an unreadable payload
    #[error("Envelope integrity check failed: {0}")]
    Integrity(String),

    /// A stage attempted to write to a queue that was already closed
    #[error("Transport queue closed: {0}")]
    ChannelClosed(&'static str),

    /// A stage task died without reporting a pipeline error
    #[error("Internal error: {0} stage aborted")]
    Internal(&'static str),
}
