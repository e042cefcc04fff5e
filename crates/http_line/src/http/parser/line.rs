use std::str::FromStr;

use memchr::memchr_iter;

use crate::http::{
    HttpVersion, Method,
    parser::{ParseErrorKind, RequestLineError},
    request::{RequestLine, RequestTarget},
};

/// The three tokens of a request line, not yet validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokens<'a> {
    pub method: &'a [u8],
    pub target: &'a [u8],
    pub version: &'a [u8],
    target_at: usize,
    version_at: usize,
}

/// Splits a request line on single spaces.
///
/// Consecutive spaces are not collapsed, so anything but exactly two spaces is malformed.
pub fn tokenize(line: &[u8]) -> Result<Tokens<'_>, RequestLineError> {
    let mut spaces = memchr_iter(b' ', line);
    let (Some(first), Some(second), None) = (spaces.next(), spaces.next(), spaces.next()) else {
        return Err(RequestLineError::new(
            ParseErrorKind::MalformedRequestLine,
            0,
        ));
    };

    Ok(Tokens {
        method: &line[..first],
        target: &line[first + 1..second],
        version: &line[second + 1..],
        target_at: first + 1,
        version_at: second + 1,
    })
}

/// ABNF: HTTP-version = HTTP-name "/" DIGIT "." DIGIT
///
/// Only the first two `/` separated segments are looked at, anything after a second `/` is
/// ignored.
fn parse_version(token: &[u8]) -> Option<HttpVersion> {
    let mut segments = token.split(|&b| b == b'/');
    let (Some(name), Some(number)) = (segments.next(), segments.next()) else {
        return None;
    };
    if name != b"HTTP" || number.is_empty() {
        return None;
    }
    HttpVersion::from_number(std::str::from_utf8(number).ok()?).filter(HttpVersion::is_supported)
}

impl RequestLine {
    /// Validates a single line, without its line terminator
    pub fn parse(line: &[u8]) -> Result<Self, RequestLineError> {
        let tokens = tokenize(line)?;

        let method = Method::from_bytes(tokens.method)
            .ok_or(RequestLineError::new(ParseErrorKind::InvalidMethod, 0))?;

        let invalid_target = RequestLineError::new(ParseErrorKind::InvalidTarget, tokens.target_at);
        if tokens.target.is_empty() {
            return Err(invalid_target);
        }
        let target = RequestTarget::parse(tokens.target, method).map_err(|_| invalid_target)?;

        let version = parse_version(tokens.version).ok_or(RequestLineError::new(
            ParseErrorKind::InvalidHttpVersion,
            tokens.version_at,
        ))?;

        Ok(Self {
            method,
            target,
            version,
        })
    }
}

impl FromStr for RequestLine {
    type Err = RequestLineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.as_bytes())
    }
}
