//! Message types for the i3bar protocol.

use serde::{Deserialize, Serialize};

use super::{Alignment, Markup};

/// Protocol version understood by i3bar.
pub const PROTOCOL_VERSION: u32 = 1;

/// Protocol header, sent once before the infinite array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Protocol version of the stream.
    pub version: u32,
    /// Signal the bar should send to pause us. Zero means the bar's default (SIGSTOP).
    #[serde(default, skip_serializing_if = "is_zero")]
    pub stop_signal: i32,
    /// Signal the bar should send to resume us. Zero means the bar's default (SIGCONT).
    #[serde(default, skip_serializing_if = "is_zero")]
    pub cont_signal: i32,
    /// Ask the bar to write an infinite array of click events to our input.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub click_events: bool,
}

impl Default for Header {
    fn default() -> Self {
        Self::new(PROTOCOL_VERSION)
    }
}

impl Header {
    pub const fn new(version: u32) -> Self {
        Self {
            version,
            stop_signal: 0,
            cont_signal: 0,
            click_events: false,
        }
    }

    #[must_use]
    pub const fn with_stop_signal(mut self, signal: i32) -> Self {
        self.stop_signal = signal;
        self
    }

    #[must_use]
    pub const fn with_cont_signal(mut self, signal: i32) -> Self {
        self.cont_signal = signal;
        self
    }

    #[must_use]
    pub const fn with_click_events(mut self, enabled: bool) -> Self {
        self.click_events = enabled;
        self
    }
}

/// A single segment of a status line.
///
/// Only `full_text` is always encoded; every other field is left out of
/// the JSON object while it holds its default value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Block {
    /// Identifies the block in click events. Not rendered.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Instance of the block, for blocks sharing a name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub instance: String,
    pub full_text: String,
    /// Shown instead of `full_text` when the bar runs out of space.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub short_text: String,
    /// Text colour (`#rrggbb`).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub color: String,
    /// Background colour (`#rrggbb`).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub background: String,
    /// Border colour (`#rrggbb`).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub border: String,
    /// Minimum width, either a pixel count or a sample text as wide as the
    /// longest expected value.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub min_width: String,
    #[serde(skip_serializing_if = "Alignment::is_default")]
    pub align: Alignment,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub urgent: bool,
    /// Draw a separator line after this block.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub separator: bool,
    /// Pixels of gap to leave after the block.
    #[serde(skip_serializing_if = "is_zero")]
    pub separator_block_width: u32,
    #[serde(skip_serializing_if = "Markup::is_default")]
    pub markup: Markup,
}

impl Block {
    pub fn new(full_text: impl Into<String>) -> Self {
        Self {
            full_text: full_text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = instance.into();
        self
    }

    #[must_use]
    pub fn with_short_text(mut self, short_text: impl Into<String>) -> Self {
        self.short_text = short_text.into();
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    #[must_use]
    pub fn with_border(mut self, border: impl Into<String>) -> Self {
        self.border = border.into();
        self
    }

    #[must_use]
    pub fn with_min_width(mut self, min_width: impl Into<String>) -> Self {
        self.min_width = min_width.into();
        self
    }

    #[must_use]
    pub const fn with_align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub const fn with_urgent(mut self, urgent: bool) -> Self {
        self.urgent = urgent;
        self
    }

    #[must_use]
    pub const fn with_separator(mut self, separator: bool) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub const fn with_separator_block_width(mut self, pixels: u32) -> Self {
        self.separator_block_width = pixels;
        self
    }

    #[must_use]
    pub const fn with_markup(mut self, markup: Markup) -> Self {
        self.markup = markup;
        self
    }
}

/// One full rendering of the bar: blocks from left to right.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusLine(pub Vec<Block>);

impl StatusLine {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a block at the right end.
    pub fn push(&mut self, block: Block) {
        self.0.push(block);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.0.iter()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.0
    }
}

impl From<Vec<Block>> for StatusLine {
    fn from(blocks: Vec<Block>) -> Self {
        Self(blocks)
    }
}

impl FromIterator<Block> for StatusLine {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for StatusLine {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StatusLine {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
#[path = "types_tests.rs"]
mod tests;
