//! Infrastructure layer: concrete implementations of the domain traits.
//!
//! - [`remote`] - HTTP client for the college backend and its offline stand-in
//! - [`dataset`] - Bundled college list used by the fallback filter
//! - [`preferences`] - File and in-memory preference stores

pub mod dataset;
pub mod preferences;
pub mod remote;
