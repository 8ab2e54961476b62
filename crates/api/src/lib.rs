//! HTTP API for the stockroom back office.
//!
//! The router is exposed as a library so black-box tests can run the exact
//! same app against an ephemeral port.

pub mod app;
