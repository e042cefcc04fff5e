use std::{borrow::Cow, num::NonZeroUsize};

use bytes::Bytes;
use memchr::{memchr, memmem};
use unicase::UniCase;

use crate::http::{
    Method,
    uri::{
        UriHost, UrlDecodeError, has_whitespace, is_hostname, is_ipv4_shaped, is_port, is_scheme,
        url_decode,
    },
};

/// A Target for a HTTP Request
/// See RFC 9112 - 3.2. Request Target
/// ABNF: request-target = origin-form / absolute-form / authority-form / asterisk-form
///
/// Targets are matched on raw bytes, only the `decoded_*` accessors require UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTarget {
    /// An Origin request as an URI
    Origin(OriginForm),
    /// An absolute URL
    Absolute(AbsoluteForm),
    /// An Authority form using URI-host:port format
    Authority(AuthorityForm),
    /// Asterisk Form of a Request Target
    /// See RFC 9112 - 3.2.4. asterisk-form
    /// ABNF: asterisk-form = "*"
    Asterisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTargetParseError;

impl std::fmt::Display for RequestTargetParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid request target")
    }
}

impl std::error::Error for RequestTargetParseError {}

impl RequestTarget {
    /// Classifies `target`, the forms are tried in order and the first match wins.
    ///
    /// The asterisk form is only accepted for `OPTIONS` requests.
    pub fn parse(target: &[u8], method: Method) -> Result<Self, RequestTargetParseError> {
        if has_whitespace(target) {
            return Err(RequestTargetParseError);
        }

        if let Some(origin) = OriginForm::parse(target) {
            return Ok(Self::Origin(origin));
        }
        if let Some(absolute) = AbsoluteForm::parse(target) {
            return Ok(Self::Absolute(absolute));
        }
        if let Some(authority) = AuthorityForm::parse(target) {
            return Ok(Self::Authority(authority));
        }
        if target == b"*" && method == Method::OPTIONS {
            return Ok(Self::Asterisk);
        }
        Err(RequestTargetParseError)
    }

    /// The target as it appeared on the wire
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Origin(origin) => origin.as_bytes(),
            Self::Absolute(absolute) => absolute.as_bytes(),
            Self::Authority(authority) => authority.as_str().as_bytes(),
            Self::Asterisk => b"*",
        }
    }

    /// The target as text, invalid UTF-8 is replaced with U+FFFD
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

impl std::fmt::Display for RequestTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}

/// Origin Form for a Request Target
/// See RFC 9112 - 3.2.1. origin-form
/// ABNF: origin-form = absolute-path [ "?" query ]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginForm {
    data: Bytes,
    /// The index of the question mark starting the query.
    /// The form starts with a slash, so it is never at index 0
    query: Option<NonZeroUsize>,
}

impl OriginForm {
    fn parse(bytes: &[u8]) -> Option<Self> {
        if !bytes.starts_with(b"/") {
            return None;
        }
        Some(Self {
            data: Bytes::copy_from_slice(bytes),
            query: memchr(b'?', bytes).and_then(NonZeroUsize::new),
        })
    }

    /// The path, still percent-encoded
    pub fn path(&self) -> &[u8] {
        match self.query {
            Some(query) => &self.data[..query.get()],
            None => &self.data,
        }
    }

    /// The query without its question mark, still percent-encoded
    pub fn query(&self) -> Option<&[u8]> {
        self.query.map(|query| &self.data[query.get() + 1..])
    }

    pub fn decoded_path(&self) -> Result<String, UrlDecodeError> {
        url_decode(self.path())
    }

    pub fn decoded_query(&self) -> Result<Option<String>, UrlDecodeError> {
        self.query().map(url_decode).transpose()
    }

    /// The raw target, this function does not decode anything
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Absolute Form of a Request Target
/// See RFC 9112 - 3.2.2. absolute-form
/// ABNF: absolute-form  = absolute-URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsoluteForm {
    data: Bytes,
    /// Always ASCII, copied out of `data`
    scheme: String,
}

impl AbsoluteForm {
    const SEPARATOR: &'static [u8] = b"://";

    fn parse(bytes: &[u8]) -> Option<Self> {
        let separator = memmem::find(bytes, Self::SEPARATOR)?;
        let (scheme, rest) = (&bytes[..separator], &bytes[separator + Self::SEPARATOR.len()..]);
        if !is_scheme(scheme) || rest.is_empty() {
            return None;
        }
        Some(Self {
            data: Bytes::copy_from_slice(bytes),
            scheme: std::str::from_utf8(scheme).ok()?.to_owned(),
        })
    }

    /// Schemes are case-insensitive
    pub fn scheme(&self) -> UniCase<&str> {
        UniCase::new(&self.scheme)
    }

    /// Everything after `://`
    pub fn remainder(&self) -> &[u8] {
        &self.data[self.scheme.len() + Self::SEPARATOR.len()..]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Authority Form of a Request Target
/// See RFC 9112 - 3.2.3. authority-form
/// ABNF: authority-form = uri-host ":" port
///
/// The host and port grammars only admit ASCII, so this form is kept as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityForm {
    data: String,
    /// Index of the colon between host and port
    colon: usize,
}

impl AuthorityForm {
    fn parse(bytes: &[u8]) -> Option<Self> {
        let colon = memchr(b':', bytes)?;
        let (host, port) = (&bytes[..colon], &bytes[colon + 1..]);
        if !(is_hostname(host) || is_ipv4_shaped(host)) || !is_port(port) {
            return None;
        }
        Some(Self {
            data: std::str::from_utf8(bytes).ok()?.to_owned(),
            colon,
        })
    }

    pub fn host(&self) -> UriHost {
        UriHost::from_validated(self.host_str())
    }

    pub fn host_str(&self) -> &str {
        &self.data[..self.colon]
    }

    /// The port digits as sent, these may not fit a `u16`
    pub fn port_str(&self) -> &str {
        &self.data[self.colon + 1..]
    }

    /// The port, `None` when it is out of range
    pub fn port(&self) -> Option<u16> {
        self.port_str().parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }
}
