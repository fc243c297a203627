//! # kpiboard
//!
//! Library half of the kpiboard binary: the HTTP server, the CLI and the
//! launcher settings. Exposed as a library so integration tests can drive
//! the router directly.

pub mod api;
pub mod cli;
pub mod settings;
