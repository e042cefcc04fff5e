use std::sync::Arc;

use tokio::{
    io::{AsyncWrite, AsyncWriteExt, Stdout},
    sync::Mutex,
};

use crate::{
    http::parser::LineError,
    service::{Connection, Service},
};

#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    #[error(transparent)]
    Line(#[from] LineError),
    #[error("failed to write line: {0}")]
    Output(#[source] std::io::Error),
}

/// Writes every line of a connection to `out`, each followed by `\n`.
///
/// Lines of concurrent connections may interleave, a single line never gets split.
pub struct PrintLines<W> {
    out: Arc<Mutex<W>>,
}

impl<W> PrintLines<W> {
    pub fn new(out: W) -> Self {
        Self::shared(Arc::new(Mutex::new(out)))
    }

    pub fn shared(out: Arc<Mutex<W>>) -> Self {
        Self { out }
    }
}

impl PrintLines<Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W> Service<Connection> for PrintLines<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    /// Number of lines printed
    type Response = usize;
    type Error = PrintError;

    fn call(
        &self,
        mut conn: Connection,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send {
        async move {
            let mut printed = 0;
            while let Some(line) = conn.lines.recv().await {
                let line = line?;
                let mut out = self.out.lock().await;
                out.write_all(&line).await.map_err(PrintError::Output)?;
                out.write_all(b"\n").await.map_err(PrintError::Output)?;
                out.flush().await.map_err(PrintError::Output)?;
                printed += 1;
            }
            log::debug!("{}: printed {printed} line(s)", conn.peer);
            Ok(printed)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use carbon_http_test_suite::{ChunkedReader, FailingReader};

    use super::*;
    use crate::{config::LineConfig, http::parser::Lines};

    fn connection<R>(reader: R) -> Connection
    where
        R: tokio::io::AsyncRead + Unpin + Send + 'static,
    {
        Connection {
            peer: ([127, 0, 0, 1], 4000).into(),
            lines: Lines::spawn(reader, &LineConfig::default().with_read_chunk_size(8)),
        }
    }

    #[tokio::test]
    async fn test_print_lines() {
        let out = Arc::new(Mutex::new(Vec::<u8>::new()));
        let service = PrintLines::shared(out.clone());

        let data = b"GET / HTTP/1.1\r\nHost: localhost:42069\r\n\r\nunterminated";
        let printed = service
            .call(connection(ChunkedReader::new(data.as_slice(), 8)))
            .await
            .unwrap();
        assert_eq!(printed, 4);
        assert_eq!(
            out.lock().await.as_slice(),
            b"GET / HTTP/1.1\r\nHost: localhost:42069\r\n\r\nunterminated\n"
        );
    }

    #[tokio::test]
    async fn test_print_lines_read_failure() {
        let out = Arc::new(Mutex::new(Vec::<u8>::new()));
        let service = PrintLines::shared(out.clone());

        let reader = FailingReader::new(b"one\ntw".as_slice(), 8, io::ErrorKind::ConnectionReset);
        let err = service.call(connection(reader)).await.unwrap_err();
        assert!(matches!(err, PrintError::Line(LineError::Io(_))));
        // Everything received before the failure was still printed
        assert_eq!(out.lock().await.as_slice(), b"one\ntw\n");
    }
}
