//! # RefDecl Bench
//!
//! Benchmarking utilities for RefDecl performance testing.

pub mod schema;
