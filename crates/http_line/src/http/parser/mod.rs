//! Turning a byte stream into lines, and the first line into a [`RequestLine`]

mod assembler;
mod error;
pub mod line;
mod reader;

pub use assembler::{CompletedLines, LineAssembler};
pub use error::*;
pub use reader::{LineReader, Lines};
use tokio::io::AsyncRead;

use crate::{
    config::LineConfig,
    http::request::{Request, RequestLine},
};

/// Removes the `\r` left over from a CRLF terminator
pub fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Reads up to the first line of `reader` and builds a [`Request`] out of it.
///
/// Nothing past the first line is consumed from the assembler, header fields and bodies are
/// left alone.
pub async fn request_from_reader<R>(reader: R, config: &LineConfig) -> Result<Request, RequestError>
where
    R: AsyncRead + Unpin,
{
    let mut lines = LineReader::new(reader, config);
    let line = lines
        .next_line()
        .await?
        .ok_or(RequestError::UnexpectedEof)?;
    let line = RequestLine::parse(strip_cr(&line))?;
    log::debug!("request line: {line}");
    Ok(Request::new(line))
}
