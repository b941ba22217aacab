//! Cross-crate integration flows for the full pipeline.

pub mod backpressure;
pub mod pipeline_flows;
