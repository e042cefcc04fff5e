use std::{collections::VecDeque, io};

use bytes::Bytes;
use tokio::{
    io::{AsyncRead, AsyncReadExt},
    sync::mpsc,
};

use crate::config::LineConfig;

use super::{CompletedLines, LineAssembler, LineError};

/// Pulls lines out of an [`AsyncRead`] through a [`LineAssembler`]
pub struct LineReader<R> {
    inner: R,
    assembler: LineAssembler,
    chunk: Vec<u8>,
    completed: CompletedLines,
    ready: VecDeque<Bytes>,
    /// Failure to report once every line received ahead of it has been handed out
    failure: Option<LineError>,
    finished: bool,
}

impl<R> LineReader<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(inner: R, config: &LineConfig) -> Self {
        Self {
            inner,
            assembler: LineAssembler::with_max_line_len(config.max_line_len),
            chunk: vec![0; config.read_chunk_size.max(1)],
            completed: CompletedLines::new(),
            ready: VecDeque::new(),
            failure: None,
            finished: false,
        }
    }

    /// Returns the next line, `Ok(None)` once the stream is over.
    ///
    /// An unterminated last line is still returned when the stream ends, even when it ends
    /// with a read error, in which case the error follows that line. Likewise every line
    /// completed ahead of one that is too long comes out before [`LineError::TooLong`].
    pub async fn next_line(&mut self) -> Result<Option<Bytes>, LineError> {
        loop {
            if let Some(line) = self.ready.pop_front() {
                return Ok(Some(line));
            }
            if let Some(err) = self.failure.take() {
                return Err(err);
            }
            if self.finished {
                return Ok(None);
            }

            match self.inner.read(&mut self.chunk).await {
                Ok(0) => {
                    log::trace!("end of stream, {} byte(s) pending", self.assembler.pending());
                    self.finish();
                }
                Ok(n) => {
                    let fed = self.assembler.feed(&self.chunk[..n], &mut self.completed);
                    self.ready.extend(self.completed.drain(..));
                    if let Err(err) = fed {
                        self.failure = Some(err);
                        self.finished = true;
                    }
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    log::debug!("read failed: {err}");
                    self.failure = Some(LineError::Io(err));
                    self.finish();
                }
            }
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        self.ready.extend(self.assembler.flush());
    }
}

/// Receiving half of a line producer task.
///
/// The producer owns the reader and its assembler, and sends every line (then at most one
/// terminal error) in stream order. Dropping `Lines` stops the producer and releases the reader.
pub struct Lines {
    rx: mpsc::Receiver<Result<Bytes, LineError>>,
}

impl Lines {
    pub fn spawn<R>(reader: R, config: &LineConfig) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(config.channel_capacity.max(1));
        let mut reader = LineReader::new(reader, config);

        tokio::spawn(async move {
            loop {
                let item = tokio::select! {
                    item = reader.next_line() => item,
                    _ = tx.closed() => break,
                };
                let item = match item {
                    Ok(Some(line)) => Ok(line),
                    Ok(None) => break,
                    Err(err) => Err(err),
                };
                if tx.send(item).await.is_err() {
                    break;
                }
            }
            log::trace!("line producer done");
        });

        Self { rx }
    }

    /// The next line, `None` once the producer is done
    pub async fn recv(&mut self) -> Option<Result<Bytes, LineError>> {
        self.rx.recv().await
    }
}
