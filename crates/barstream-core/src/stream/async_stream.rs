//! Async stream over tokio sinks.

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, trace};

use super::{Framer, StreamOptions};
use crate::error::{Error, Result};
use crate::protocol::{Header, StatusLine};

/// i3bar protocol stream over an async writer.
///
/// Same contract as [`Stream`](super::Stream), but tasks waiting for the
/// sink yield to the runtime instead of blocking their thread.
pub struct AsyncStream<W, R = tokio::io::Empty> {
    writer: Mutex<Writer<W>>,
    source: Mutex<R>,
}

struct Writer<W> {
    sink: W,
    framer: Framer,
}

impl AsyncStream<tokio::io::Stdout, tokio::io::Stdin> {
    /// Stream on the process's standard output and input.
    pub async fn stdio(options: StreamOptions, header: &Header) -> Result<Self> {
        Self::with_options(tokio::io::stdout(), tokio::io::stdin(), options, header).await
    }
}

impl<W, R> AsyncStream<W, R>
where
    W: AsyncWrite + Unpin,
    R: AsyncRead + Unpin,
{
    /// Send `header` to `sink` and open the infinite array.
    pub async fn new(sink: W, source: R, pretty: bool, header: &Header) -> Result<Self> {
        Self::with_options(
            sink,
            source,
            StreamOptions::default().with_pretty(pretty),
            header,
        )
        .await
    }

    pub async fn with_options(
        mut sink: W,
        source: R,
        options: StreamOptions,
        header: &Header,
    ) -> Result<Self> {
        let framer = Framer::new(options);

        let bytes = framer.encode_header(header)?;
        write_flush(&mut sink, &bytes)
            .await
            .map_err(Error::SendHeader)?;
        write_flush(&mut sink, Framer::OPEN)
            .await
            .map_err(Error::StartArray)?;

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
    /// Dropping the future after the lock is taken may leave a partial line
    /// on the sink, as with any other mid-write failure.
    pub async fn send_line(&self, line: &StatusLine) -> Result<()> {
        let mut writer = self.writer.lock().await;
        let bytes = writer.framer.encode_line(line)?;
        write_flush(&mut writer.sink, &bytes)
            .await
            .map_err(Error::SendLine)?;
        writer.framer.line_written();
        trace!(
            blocks = line.len(),
            lines_sent = writer.framer.lines_sent(),
            "Sent status line"
        );
        Ok(())
    }

    /// Terminate the infinite array with `]`.
    pub async fn close(&self) -> Result<()> {
        let mut writer = self.writer.lock().await;
        writer.framer.ensure_open()?;
        write_flush(&mut writer.sink, Framer::CLOSE)
            .await
            .map_err(Error::CloseArray)?;
        writer.framer.mark_closed();
        debug!(
            lines_sent = writer.framer.lines_sent(),
            "Closed infinite array"
        );
        Ok(())
    }
}

impl<W, R> AsyncStream<W, R> {
    pub async fn lines_sent(&self) -> u64 {
        self.writer.lock().await.framer.lines_sent()
    }

    pub async fn is_closed(&self) -> bool {
        self.writer.lock().await.framer.is_closed()
    }

    /// Exclusive access to the click-event source.
    pub async fn source(&self) -> tokio::sync::MutexGuard<'_, R> {
        self.source.lock().await
    }

    pub fn into_parts(self) -> (W, R) {
        (
            self.writer.into_inner().sink,
            self.source.into_inner(),
        )
    }
}

impl<W, R> std::fmt::Debug for AsyncStream<W, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("AsyncStream");
        match self.writer.try_lock() {
            Ok(writer) => s.field("framer", &writer.framer),
            Err(_) => s.field("framer", &"<locked>"),
        };
        s.finish_non_exhaustive()
    }
}

async fn write_flush<W: AsyncWrite + Unpin>(sink: &mut W, bytes: &[u8]) -> std::io::Result<()> {
    sink.write_all(bytes).await?;
    sink.flush().await
}
