//! Event Sink Implementations
//!
//! Provides the NDJSON sink used by `--json`. The console sink lives with
//! the terminal rendering code in the binary.

mod json;

pub use json::{event_to_json, JsonEventSink};
