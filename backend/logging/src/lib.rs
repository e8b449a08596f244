//! Structured logging setup for platescan.
//!
//! Console output (text or JSON) plus an optional daily rolling NDJSON file.

pub mod logger;

pub use logger::{LogOptions, init_logger};
