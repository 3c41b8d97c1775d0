//! barstream Core Library
//!
//! Shared functionality for barstream components:
//! - i3bar protocol schema (header, blocks, status lines)
//! - Infinite-array stream with serialised concurrent writers
//! - Configuration resolution and hierarchy
//! - Common error types

pub mod config;
pub mod error;
pub mod protocol;
pub mod stream;
pub mod tracing_init;

pub use config::Config;
pub use error::{Error, Result};
#[cfg(feature = "tokio")]
pub use stream::AsyncStream;
pub use stream::{Framing, Stream, StreamOptions};
