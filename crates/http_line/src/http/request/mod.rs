use std::{borrow::Cow, collections::HashMap, fmt, net::SocketAddr};

mod target;
use bytes::Bytes;
pub use target::*;

use crate::http::{HttpVersion, Method};

/// A validated request line
/// See RFC 9112 3 Request Line
/// ABNF: request-line = method SP request-target SP HTTP-version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    pub target: RequestTarget,
    pub version: HttpVersion,
}

impl RequestLine {
    pub fn method_str(&self) -> &'static str {
        self.method.as_str()
    }

    /// The target as text, invalid UTF-8 is replaced with U+FFFD
    pub fn target_str(&self) -> Cow<'_, str> {
        self.target.to_str_lossy()
    }

    /// The version without its `HTTP/` prefix, e.g. `1.1`
    pub fn version_str(&self) -> &'static str {
        self.version.number()
    }
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.method, self.target, self.version)
    }
}

/// A request, only the request line is read off the wire
#[derive(Debug, Clone)]
pub struct Request {
    pub line: RequestLine,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
    pub remote: Option<SocketAddr>,
}

static_assertions::assert_impl_all!(Request: Send, Sync);

impl Request {
    pub fn new(line: RequestLine) -> Self {
        Self {
            line,
            headers: HashMap::new(),
            body: Bytes::new(),
            remote: None,
        }
    }

    pub fn with_remote(mut self, remote: SocketAddr) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn method(&self) -> Method {
        self.line.method
    }

    pub fn target(&self) -> &RequestTarget {
        &self.line.target
    }

    pub fn version(&self) -> HttpVersion {
        self.line.version
    }
}
