//! barstream status generator library.
//!
//! Block producers and the tick loop behind the `barstream-status` binary.

pub mod blocks;
pub mod generator;
