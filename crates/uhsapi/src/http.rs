use std::{fmt, str::FromStr};

/// Every method a request line may carry
/// See [RFC 9110 9. Methods](https://httpwg.org/specs/rfc9110.html#methods)
pub const SUPPORTED_METHODS: &[Method] = &[
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::CONNECT,
    Method::OPTIONS,
    Method::TRACE,
];

/// The protocol versions a request line may announce
pub const SUPPORTED_VERSIONS: &[HttpVersion] = &[HttpVersion::HTTP_1_1];

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    PATCH,
    DELETE,
    CONNECT,
    OPTIONS,
    TRACE,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMethod;

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown method")
    }
}

impl std::error::Error for UnknownMethod {}

impl Method {
    /// Looks up a method token, methods are case-sensitive
    pub fn from_bytes(token: &[u8]) -> Option<Self> {
        SUPPORTED_METHODS
            .iter()
            .copied()
            .find(|method| method.as_str().as_bytes() == token)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GET => "GET",
            Self::HEAD => "HEAD",
            Self::POST => "POST",
            Self::PUT => "PUT",
            Self::PATCH => "PATCH",
            Self::DELETE => "DELETE",
            Self::CONNECT => "CONNECT",
            Self::OPTIONS => "OPTIONS",
            Self::TRACE => "TRACE",
        }
    }

    /// Safe methods are read-only, they do not change server state
    /// See [RFC 9110 9.2.1 Safe Methods](https://httpwg.org/specs/rfc9110.html#safe.methods)
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::GET | Self::HEAD | Self::OPTIONS | Self::TRACE)
    }

    /// Idempotent Methods are requests where the side effects are the same if multiple identical
    /// requests are sent
    /// See [RFC 9110 9.2.2 Idempotent Methods](https://httpwg.org/specs/rfc9110.html#idempotent.methods)
    pub fn is_idempotent(&self) -> bool {
        match self {
            Self::PUT | Self::DELETE => true,
            other => other.is_safe(),
        }
    }
}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes()).ok_or(UnknownMethod)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP Version
/// See RFC 9110 - 2.5. Protocol Version
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVersion {
    HTTP_0_9,
    HTTP_1_0,
    HTTP_1_1,
    HTTP_2,
    HTTP_3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidHttpVersion;

impl fmt::Display for InvalidHttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid HTTP version")
    }
}

impl std::error::Error for InvalidHttpVersion {}

impl HttpVersion {
    /// Looks up the part after `HTTP/`, e.g. `1.1`
    pub fn from_number(number: &str) -> Option<Self> {
        Some(match number {
            "0.9" => Self::HTTP_0_9,
            "1.0" => Self::HTTP_1_0,
            "1.1" => Self::HTTP_1_1,
            "2" => Self::HTTP_2,
            "3" => Self::HTTP_3,
            _ => return None,
        })
    }

    /// The version number without the `HTTP/` prefix
    pub const fn number(&self) -> &'static str {
        match self {
            Self::HTTP_0_9 => "0.9",
            Self::HTTP_1_0 => "1.0",
            Self::HTTP_1_1 => "1.1",
            Self::HTTP_2 => "2",
            Self::HTTP_3 => "3",
        }
    }

    pub fn is_supported(&self) -> bool {
        SUPPORTED_VERSIONS.contains(self)
    }
}

impl FromStr for HttpVersion {
    type Err = InvalidHttpVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("HTTP/")
            .and_then(Self::from_number)
            .ok_or(InvalidHttpVersion)
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP/{}", self.number())
    }
}
