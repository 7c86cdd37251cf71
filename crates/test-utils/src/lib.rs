//! Shared test utilities for the granule validation workspace.
//!
//! This crate provides common testing infrastructure including:
//! - A fixture DEM coverage reference built from 1x1 degree tiles
//! - Named footprints over covered land, coastlines, ocean and poles
//! - A stub CMR client backed by an in-memory catalogue
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../../crates/test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixture_reference, footprints, StubCmrClient};
//! ```

pub mod fixtures;
pub mod stub;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use stub::StubCmrClient;
