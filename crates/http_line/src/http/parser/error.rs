use std::fmt::Display;

/// Failure while pulling lines out of a stream
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    /// A line grew past `limit` bytes, terminator excluded
    #[error("line exceeds the limit of {limit} bytes")]
    TooLong { limit: usize },
    #[error("stream read failure: {0}")]
    Io(#[from] std::io::Error),
}

impl PartialEq for LineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::TooLong { limit }, Self::TooLong { limit: limit2 }) => limit == limit2,
            (Self::Io(err1), Self::Io(err2)) => err1.kind() == err2.kind(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The line does not split into exactly three tokens
    MalformedRequestLine,
    /// Empty or unsupported method token
    InvalidMethod,
    /// The target matches none of the request-target forms
    InvalidTarget,
    /// Missing `HTTP/` prefix, empty or unsupported version
    InvalidHttpVersion,
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::MalformedRequestLine => "malformed request line",
            Self::InvalidMethod => "invalid method",
            Self::InvalidTarget => "invalid request target",
            Self::InvalidHttpVersion => "invalid http version",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLineError {
    pub kind: ParseErrorKind,
    /// Byte offset into the line of the token we rejected
    pub offset: usize,
}

impl RequestLineError {
    pub(crate) const fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

impl Display for RequestLineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.offset)
    }
}

impl std::error::Error for RequestLineError {}

/// Failure while building a [`Request`](crate::http::request::Request) from a stream
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Line(#[from] LineError),
    #[error(transparent)]
    RequestLine(#[from] RequestLineError),
    #[error("stream ended before a request line was received")]
    UnexpectedEof,
}

impl RequestError {
    /// The request line kind, if the request line itself was rejected
    pub fn parse_kind(&self) -> Option<ParseErrorKind> {
        match self {
            Self::RequestLine(err) => Some(err.kind),
            _ => None,
        }
    }
}
