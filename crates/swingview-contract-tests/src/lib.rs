#![warn(missing_docs)]
//! # swingview-contract-tests
//!
//! Holds no runtime code. The `tests/` directory validates the frozen
//! analyze-response schemas in `contracts/` against their fixtures so a
//! contract drift fails the build rather than a production upload.
