#![warn(missing_docs)]
//! # swingview-benchmarks
//!
//! Holds no runtime code. The `tests/` directory runs lightweight latency
//! smoke checks over the hot client paths (envelope encoding, progress math,
//! and address resolution).
