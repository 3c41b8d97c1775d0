//! Schema of the i3bar protocol.
//!
//! A stream starts with a [`Header`] and continues with an infinite array of
//! [`StatusLine`]s, each an ordered list of [`Block`]s.

mod alignment;
mod markup;
mod types;

pub use alignment::Alignment;
pub use markup::Markup;
pub use types::*;
