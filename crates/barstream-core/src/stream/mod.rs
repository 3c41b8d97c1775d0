//! Infinite-array stream for the i3bar protocol.
//!
//! A stream writes the [`Header`](crate::protocol::Header) once, opens a JSON
//! array, appends one [`StatusLine`] per call and closes the array at most
//! once. Writers are serialised by a lock, so any number of threads (or
//! tasks, for [`AsyncStream`]) may send lines concurrently.
//!
//! The source side is kept for click events and is not read yet.

#[cfg(feature = "tokio")]
mod async_stream;
mod blocking;

#[cfg(feature = "tokio")]
pub use async_stream::AsyncStream;
pub use blocking::Stream;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::error::{Error, Result};
use crate::protocol::{Header, StatusLine};

/// How successive status lines are separated inside the infinite array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framing {
    /// One value per line, no separator. Hosts that parse the array
    /// incrementally accept this.
    #[default]
    Newline,
    /// A comma before every line after the first, keeping the whole output
    /// a valid JSON document.
    Comma,
}

impl Framing {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Newline => "newline",
            Self::Comma => "comma",
        }
    }
}

impl std::fmt::Display for Framing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Framing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "newline" => Ok(Self::Newline),
            "comma" => Ok(Self::Comma),
            _ => Err(Error::Config(format!("unknown framing: {s}"))),
        }
    }
}

/// Encoding options for a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamOptions {
    /// Indent nested values by four spaces. Cosmetic only.
    pub pretty: bool,
    pub framing: Framing,
}

impl StreamOptions {
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub const fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }
}

/// Bytes and bookkeeping for the three protocol phases, independent of the
/// sink's I/O flavour.
///
/// Encoding never commits: callers write the returned bytes and only then
/// record the outcome with [`line_written`](Self::line_written) or
/// [`mark_closed`](Self::mark_closed), so a failed write leaves the state
/// untouched.
#[derive(Debug)]
pub(crate) struct Framer {
    options: StreamOptions,
    lines_sent: u64,
    closed: bool,
}

impl Framer {
    pub(crate) const OPEN: &'static [u8] = b"[";
    pub(crate) const CLOSE: &'static [u8] = b"]";

    pub(crate) const fn new(options: StreamOptions) -> Self {
        Self {
            options,
            lines_sent: 0,
            closed: false,
        }
    }

    pub(crate) const fn options(&self) -> StreamOptions {
        self.options
    }

    pub(crate) const fn lines_sent(&self) -> u64 {
        self.lines_sent
    }

    pub(crate) const fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn encode_header(&self, header: &Header) -> Result<Vec<u8>> {
        self.encode(header, false)
            .map_err(|e| Error::SendHeader(e.into()))
    }

    pub(crate) fn encode_line(&self, line: &StatusLine) -> Result<Vec<u8>> {
        self.ensure_open()?;
        let separator = self.options.framing == Framing::Comma && self.lines_sent > 0;
        self.encode(line, separator)
            .map_err(|e| Error::SendLine(e.into()))
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::Closed);
        }
        Ok(())
    }

    pub(crate) const fn line_written(&mut self) {
        self.lines_sent += 1;
    }

    pub(crate) const fn mark_closed(&mut self) {
        self.closed = true;
    }

    /// Serialise `value` into one buffer, terminated by a newline.
    fn encode<T: Serialize>(&self, value: &T, separator: bool) -> serde_json::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(128);
        if separator {
            buf.push(b',');
        }
        if self.options.pretty {
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            value.serialize(&mut ser)?;
        } else {
            serde_json::to_writer(&mut buf, value)?;
        }
        buf.push(b'\n');
        Ok(buf)
    }
}
