//! Blocking stream over `std::io` sinks.

use std::io::{self, Read, Write};

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::{Framer, StreamOptions};
use crate::error::{Error, Result};
use crate::protocol::{Header, StatusLine};

/// i3bar protocol stream over a blocking writer.
///
/// Construction sends the header and opens the infinite array. After that
/// the stream can be shared (e.g. behind an `Arc` or a scoped thread borrow)
/// and [`send_line`](Self::send_line) called from any number of threads.
pub struct Stream<W, R = io::Empty> {
    writer: Mutex<Writer<W>>,
    /// Click-event source. Guarded on its own so a reader never waits on writes.
    source: Mutex<R>,
}

struct Writer<W> {
    sink: W,
    framer: Framer,
}

impl Stream<io::Stdout, io::Stdin> {
    /// Stream on the process's standard output and input, as i3bar expects.
    pub fn stdio(pretty: bool, header: &Header) -> Result<Self> {
        Self::new(io::stdout(), io::stdin(), pretty, header)
    }
}

impl<W: Write, R: Read> Stream<W, R> {
    /// Send `header` to `sink` and open the infinite array.
    ///
    /// `source` is where click events will come from; it is not read.
    /// With `pretty` every value is indented for human readers.
    pub fn new(sink: W, source: R, pretty: bool, header: &Header) -> Result<Self> {
        Self::with_options(
            sink,
            source,
            StreamOptions::default().with_pretty(pretty),
            header,
        )
    }

    /// Like [`Stream::new`] with full control over the encoding.
    pub fn with_options(
        mut sink: W,
        source: R,
        options: StreamOptions,
        header: &Header,
    ) -> Result<Self> {
        let framer = Framer::new(options);

        let bytes = framer.encode_header(header)?;
        write_flush(&mut sink, &bytes).map_err(Error::SendHeader)?;
        write_flush(&mut sink, Framer::OPEN).map_err(Error::StartArray)?;

        debug!(
            version = header.version,
            click_events = header.click_events,
            pretty = options.pretty,
            framing = %options.framing,
            "Sent protocol header, infinite array open"
        );

        Ok(Self {
            writer: Mutex::new(Writer { sink, framer }),
            source: Mutex::new(source),
        })
    }

    /// Append one status line to the array.
    ///
    /// Blocks until no other writer holds the sink. The whole line reaches
    /// the sink in a single write. Failures are returned as-is, nothing is
    /// retried.
    pub fn send_line(&self, line: &StatusLine) -> Result<()> {
        let mut writer = self.writer.lock();
        let bytes = writer.framer.encode_line(line)?;
        write_flush(&mut writer.sink, &bytes).map_err(Error::SendLine)?;
        writer.framer.line_written();
        trace!(
            blocks = line.len(),
            lines_sent = writer.framer.lines_sent(),
            "Sent status line"
        );
        Ok(())
    }

    /// Terminate the infinite array with `]`.
    ///
    /// Once this succeeds, every later `send_line` or `close` fails with
    /// [`Error::Closed`] without touching the sink.
    pub fn close(&self) -> Result<()> {
        let mut writer = self.writer.lock();
        writer.framer.ensure_open()?;
        write_flush(&mut writer.sink, Framer::CLOSE).map_err(Error::CloseArray)?;
        writer.framer.mark_closed();
        debug!(
            lines_sent = writer.framer.lines_sent(),
            "Closed infinite array"
        );
        Ok(())
    }
}

impl<W, R> Stream<W, R> {
    /// Number of status lines successfully written.
    pub fn lines_sent(&self) -> u64 {
        self.writer.lock().framer.lines_sent()
    }

    pub fn is_closed(&self) -> bool {
        self.writer.lock().framer.is_closed()
    }

    pub fn options(&self) -> StreamOptions {
        self.writer.lock().framer.options()
    }

    /// Run `f` with exclusive access to the click-event source.
    pub fn with_source<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        let mut source = self.source.lock();
        f(&mut *source)
    }

    /// Give back the sink and source.
    pub fn into_parts(self) -> (W, R) {
        (
            self.writer.into_inner().sink,
            self.source.into_inner(),
        )
    }
}

impl<W, R> std::fmt::Debug for Stream<W, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("Stream");
        match self.writer.try_lock() {
            Some(writer) => s.field("framer", &writer.framer),
            None => s.field("framer", &"<locked>"),
        };
        s.finish_non_exhaustive()
    }
}

fn write_flush<W: Write>(sink: &mut W, bytes: &[u8]) -> io::Result<()> {
    sink.write_all(bytes)?;
    sink.flush()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#[path = "blocking_tests.rs"]
mod tests;
