//! # Shared Types Crate
//!
//! This crate contains the domain types shared across the pipeline stages:
//! the unit-increment [`Message`], the opaque authenticated [`Envelope`]
//! carried by the transport queues, and the aggregator's final
//! [`RunSummary`].
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Opaque Transport**: Queues only ever carry [`Envelope`] bytes; the
//!   message structure is invisible between the codec's encode and decode.

pub mod envelope;
pub mod message;
pub mod report;

pub use envelope::Envelope;
pub use message::{Message, Timestamp, UNIT_VALUE};
pub use report::RunSummary;
