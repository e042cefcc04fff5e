//! Readers for driving the line parsers the way a real socket would:
//! in chunks, with gaps between them, or failing part way through.

use std::{
    io,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

use tokio::{
    io::{AsyncRead, ReadBuf},
    sync::mpsc,
    time::sleep,
};

/// Returns `data` in reads of at most `chunk_size` bytes, then EOF
pub struct ChunkedReader {
    data: Vec<u8>,
    pos: usize,
    chunk_size: usize,
}

impl ChunkedReader {
    pub fn new(data: impl Into<Vec<u8>>, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be non-zero");
        Self {
            data: data.into(),
            pos: 0,
            chunk_size,
        }
    }
}

impl AsyncRead for ChunkedReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let end = self
            .data
            .len()
            .min(self.pos + self.chunk_size.min(buf.remaining()));
        let pos = self.pos;
        buf.put_slice(&self.data[pos..end]);
        self.pos = end;
        Poll::Ready(Ok(()))
    }
}

/// Returns `data` in reads of at most `chunk_size` bytes, then fails with `kind`
pub struct FailingReader {
    inner: ChunkedReader,
    kind: io::ErrorKind,
}

impl FailingReader {
    pub fn new(data: impl Into<Vec<u8>>, chunk_size: usize, kind: io::ErrorKind) -> Self {
        Self {
            inner: ChunkedReader::new(data, chunk_size),
            kind,
        }
    }
}

impl AsyncRead for FailingReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if self.inner.pos >= self.inner.data.len() {
            return Poll::Ready(Err(io::Error::new(self.kind, "connection failed")));
        }
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

/// A reader fed by a channel, each message is delivered as (at most) one read
pub struct ChannelReader {
    rx: mpsc::Receiver<Vec<u8>>,
    pending: Vec<u8>,
}

impl ChannelReader {
    pub fn new(rx: mpsc::Receiver<Vec<u8>>) -> Self {
        Self {
            rx,
            pending: Vec::new(),
        }
    }

    /// Spawns a task sending `data` in `chunk_size` pieces, pausing `delay` before each
    pub fn spawn(data: &[u8], chunk_size: usize, delay: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<Vec<u8>>(32);
        let chunks: Vec<Vec<u8>> = data.chunks(chunk_size).map(Vec::from).collect();
        tokio::spawn(async move {
            for chunk in chunks {
                sleep(delay).await;
                if tx.send(chunk).await.is_err() {
                    break;
                }
            }
        });
        Self::new(rx)
    }
}

impl AsyncRead for ChannelReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if self.pending.is_empty() {
            match self.rx.poll_recv(cx) {
                Poll::Ready(Some(chunk)) => self.pending = chunk,
                // Sender dropped, report EOF
                Poll::Ready(None) => return Poll::Ready(Ok(())),
                Poll::Pending => return Poll::Pending,
            }
        }
        let n = self.pending.len().min(buf.remaining());
        buf.put_slice(&self.pending[..n]);
        self.pending.drain(..n);
        Poll::Ready(Ok(()))
    }
}
