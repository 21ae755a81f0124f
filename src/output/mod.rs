//! Terminal and structured output.

pub mod json_envelope;
pub mod progress;

pub use json_envelope::{BuildResultPayload, ConfigPayload, emit_json_result};
