//! Vendor Maven dependencies into an Android platform tree.
//!
//! Reads a static package list from `libs.toml`, downloads each remote
//! package into `libs/`, and emits Soong modules for them, keeping the
//! app's `Android.bp` (and optionally its Gradle script) in sync.

pub mod config;
pub mod error;
pub mod fetch;
pub mod package;
pub mod render;
pub mod resolve;
pub mod translate;
pub mod writer;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::{Error, Result};
pub use fetch::{Fetch, HttpFetcher, Response};
pub use writer::{GraphWriter, Summary};
