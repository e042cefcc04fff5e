use std::{net::Ipv4Addr, string::FromUtf8Error};

/// Longest DNS label, RFC 1035 2.3.4
const MAX_LABEL_LEN: usize = 63;

/// Matches `\s`: HT, LF, FF, CR and SP
pub fn has_whitespace(bytes: &[u8]) -> bool {
    bytes.iter().any(u8::is_ascii_whitespace)
}

/// ABNF: scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
pub fn is_scheme(bytes: &[u8]) -> bool {
    match bytes.split_first() {
        Some((first, rest)) => {
            first.is_ascii_alphabetic()
                && rest
                    .iter()
                    .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
        }
        None => false,
    }
}

/// Dot separated labels of 1 to 63 letters, digits and hyphens,
/// a label never starts or ends with a hyphen
pub fn is_hostname(bytes: &[u8]) -> bool {
    bytes.split(|&b| b == b'.').all(is_label)
}

fn is_label(label: &[u8]) -> bool {
    match (label.first(), label.last()) {
        (Some(first), Some(last)) => {
            label.len() <= MAX_LABEL_LEN
                && first.is_ascii_alphanumeric()
                && last.is_ascii_alphanumeric()
                && label.iter().all(|&b| b.is_ascii_alphanumeric() || b == b'-')
        }
        _ => false,
    }
}

/// Four dot separated groups of 1 to 3 digits, the octet values are not checked
pub fn is_ipv4_shaped(bytes: &[u8]) -> bool {
    let mut groups = 0;
    for group in bytes.split(|&b| b == b'.') {
        groups += 1;
        if group.is_empty() || group.len() > 3 || !group.iter().all(u8::is_ascii_digit) {
            return false;
        }
    }
    groups == 4
}

/// ABNF: port = 1*DIGIT
pub fn is_port(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(u8::is_ascii_digit)
}

/// The host of an authority
/// See RFC 3986 3.2.2 Host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriHost {
    Ipv4(Ipv4Addr),
    RegName(String),
}

impl UriHost {
    /// Reads a host that already matched [`is_hostname`] or [`is_ipv4_shaped`]
    pub(crate) fn from_validated(host: &str) -> Self {
        // Dotted quads with out of range octets (or leading zeros) stay names
        match host.parse::<Ipv4Addr>() {
            Ok(addr) if is_ipv4_shaped(host.as_bytes()) => Self::Ipv4(addr),
            _ => Self::RegName(host.to_string()),
        }
    }
}

impl std::fmt::Display for UriHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ipv4(addr) => std::fmt::Display::fmt(addr, f),
            Self::RegName(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UrlDecodeError {
    #[error("malformed encoding")]
    MalformedEncoding, // e.g., `%G1`, `%A`
    #[error(transparent)]
    InvalidUtf8(#[from] FromUtf8Error), // e.g., `%FF` if expecting String output
}

/// Percent-decodes a URI component, `+` is left alone
pub fn url_decode(input: &[u8]) -> Result<String, UrlDecodeError> {
    let mut decoded = Vec::with_capacity(input.len());
    let mut rest = input;
    while let Some((&byte, tail)) = rest.split_first() {
        if byte == b'%' {
            let [high, low, ..] = tail else {
                return Err(UrlDecodeError::MalformedEncoding);
            };
            decoded.push((hex_to_digit(*high)? << 4) | hex_to_digit(*low)?);
            rest = &tail[2..];
        } else {
            decoded.push(byte);
            rest = tail;
        }
    }
    Ok(String::from_utf8(decoded)?)
}

fn hex_to_digit(c: u8) -> Result<u8, UrlDecodeError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(UrlDecodeError::MalformedEncoding),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace() {
        assert!(!has_whitespace(b"/path?query"));
        for ws in [&b"a b"[..], b"a\tb", b"a\rb", b"a\nb", b"a\x0cb"] {
            assert!(has_whitespace(ws));
        }
        // Not part of `\s`
        assert!(!has_whitespace(b"a\x0bb"));
    }

    #[test]
    fn test_scheme() {
        assert!(is_scheme(b"http"));
        assert!(is_scheme(b"svn+ssh"));
        assert!(is_scheme(b"coap.tcp-x"));
        assert!(!is_scheme(b""));
        assert!(!is_scheme(b"1http"));
        assert!(!is_scheme(b"ht_tp"));
    }

    #[test]
    fn test_hostname() {
        assert!(is_hostname(b"localhost"));
        assert!(is_hostname(b"api.service.internal"));
        assert!(is_hostname(b"a-b.c0"));
        assert!(is_hostname(&[b'a'; 63]));
        assert!(!is_hostname(&[b'a'; 64]));
        assert!(!is_hostname(b""));
        assert!(!is_hostname(b"-lead.com"));
        assert!(!is_hostname(b"trail-.com"));
        assert!(!is_hostname(b"double..dot"));
        assert!(!is_hostname(b"trailing.dot."));
        assert!(!is_hostname(b"under_score"));
    }

    #[test]
    fn test_ipv4_shaped() {
        assert!(is_ipv4_shaped(b"127.0.0.1"));
        assert!(is_ipv4_shaped(b"999.999.999.999"));
        assert!(!is_ipv4_shaped(b"1.2.3"));
        assert!(!is_ipv4_shaped(b"1.2.3.4.5"));
        assert!(!is_ipv4_shaped(b"1.2.3.1000"));
        assert!(!is_ipv4_shaped(b"1..3.4"));
    }

    #[test]
    fn test_port() {
        assert!(is_port(b"8080"));
        assert!(is_port(b"99999999"));
        assert!(!is_port(b""));
        assert!(!is_port(b"80a"));
    }

    #[test]
    fn test_uri_host() {
        assert_eq!(
            UriHost::from_validated("127.0.0.1"),
            UriHost::Ipv4(Ipv4Addr::LOCALHOST)
        );
        assert_eq!(
            UriHost::from_validated("999.1.1.1"),
            UriHost::RegName("999.1.1.1".to_string())
        );
        assert_eq!(
            UriHost::from_validated("example.com"),
            UriHost::RegName("example.com".to_string())
        );
    }

    #[test]
    fn test_urldecode_basic() {
        assert_eq!(url_decode(b"hello%20world").unwrap(), "hello world");
        assert_eq!(url_decode(b"foo%2Fbar").unwrap(), "foo/bar");
        assert_eq!(url_decode(b"~_.-").unwrap(), "~_.-");
        assert_eq!(url_decode(b"").unwrap(), "");
        assert_eq!(url_decode(b"%C3%A9").unwrap(), "é");
        assert_eq!(url_decode(b"a+b").unwrap(), "a+b");
    }

    #[test]
    fn test_urldecode_malformed() {
        assert!(url_decode(b"%").is_err());
        assert!(url_decode(b"%A").is_err());
        assert!(url_decode(b"%GG").is_err());
        assert!(url_decode(b"foo%G1").is_err());
        assert!(matches!(
            url_decode(b"%FF"),
            Err(UrlDecodeError::InvalidUtf8(_))
        ));
    }
}
