use std::{net::Ipv4Addr, sync::Arc, time::Duration};

use carbon_http_line::{
    HttpServer, LineConfig, ServerConfig,
    http::{
        Method,
        parser::{CompletedLines, LineAssembler, LineError, ParseErrorKind, RequestError},
        request::RequestTarget,
        request_from_reader,
    },
    service::PrintLines,
};
use carbon_http_test_suite::{ChannelReader, ChunkedReader};
use tokio::{
    io::AsyncWriteExt,
    net::TcpStream,
    sync::Mutex,
    time::{sleep, timeout},
};

const HEADERS: &str = "\r\nHost: localhost:42069\r\nUser-Agent: curl/7.81.0\r\nAccept: */*\r\n\r\n";

struct Case {
    name: &'static str,
    line: &'static str,
    expected: Result<(&'static str, &'static str, &'static str), Option<ParseErrorKind>>,
}

const fn ok(
    name: &'static str,
    line: &'static str,
    method: &'static str,
    target: &'static str,
) -> Case {
    Case {
        name,
        line,
        expected: Ok((method, target, "1.1")),
    }
}

const fn err(name: &'static str, line: &'static str, kind: ParseErrorKind) -> Case {
    Case {
        name,
        line,
        expected: Err(Some(kind)),
    }
}

const CASES: &[Case] = &[
    ok("good GET request line", "GET / HTTP/1.1", "GET", "/"),
    ok("good GET request line with path", "GET /coffee HTTP/1.1", "GET", "/coffee"),
    err(
        "invalid number of parts in request line",
        "/coffee HTTP/1.1",
        ParseErrorKind::MalformedRequestLine,
    ),
    err(
        "invalid method",
        "SOMETHING /coffee HTTP/1.1",
        ParseErrorKind::InvalidMethod,
    ),
    err(
        "invalid http version",
        "GET /coffee HTTP/1.2",
        ParseErrorKind::InvalidHttpVersion,
    ),
    ok("good OPTIONS request with * as target", "OPTIONS * HTTP/1.1", "OPTIONS", "*"),
    err(
        "invalid GET request with * as target",
        "GET * HTTP/1.1",
        ParseErrorKind::InvalidTarget,
    ),
    ok(
        "good GET request with origin form as target",
        "GET /api/v1/users?filter=active&sort=name HTTP/1.1",
        "GET",
        "/api/v1/users?filter=active&sort=name",
    ),
    ok(
        "good GET request with absolute form as target",
        "GET https://www.example.com:8080/path?query=value HTTP/1.1",
        "GET",
        "https://www.example.com:8080/path?query=value",
    ),
    ok(
        "good GET request with authority form as target",
        "GET api.service.internal:9000 HTTP/1.1",
        "GET",
        "api.service.internal:9000",
    ),
    err(
        "invalid GET request by missing port for authority form",
        "GET example.com HTTP/1.1",
        ParseErrorKind::InvalidTarget,
    ),
    ok(
        "good GET request with trailing version segments",
        "GET /coffee HTTP/1.1/extra",
        "GET",
        "/coffee",
    ),
    err(
        "invalid CONNECT request with unsupported version",
        "CONNECT api.service.internal:9000 HTTP/1.0",
        ParseErrorKind::InvalidHttpVersion,
    ),
];

#[tokio::test]
async fn request_from_reader_any_chunk_size() {
    for case in CASES {
        let data = format!("{}{HEADERS}", case.line);
        for size in [1, 3, 8, data.len()] {
            let config = LineConfig::default().with_read_chunk_size(size);
            let result = request_from_reader(ChunkedReader::new(data.as_bytes(), size), &config).await;
            match (&result, &case.expected) {
                (Ok(request), Ok((method, target, version))) => {
                    assert_eq!(request.line.method_str(), *method, "{}", case.name);
                    assert_eq!(request.line.target_str(), *target, "{}", case.name);
                    assert_eq!(request.line.version_str(), *version, "{}", case.name);
                }
                (Err(err), Err(kind)) => assert_eq!(err.parse_kind(), *kind, "{}", case.name),
                _ => panic!("{} (chunk size {size}): got {result:?}", case.name),
            }
        }
    }
}

#[tokio::test]
async fn request_from_slow_reader() {
    let reader = ChannelReader::spawn(
        b"CONNECT 127.0.0.1:8443 HTTP/1.1\r\nHost: x\r\n\r\n",
        2,
        Duration::from_millis(1),
    );
    let request = request_from_reader(reader, &LineConfig::default().with_read_chunk_size(8))
        .await
        .unwrap();
    assert_eq!(request.method(), Method::CONNECT);
    let RequestTarget::Authority(authority) = request.target() else {
        panic!("expected authority-form, got {:?}", request.target());
    };
    assert_eq!(authority.port(), Some(8443));
}

#[tokio::test]
async fn request_from_stream_without_lines() {
    let err = request_from_reader(ChunkedReader::new(Vec::<u8>::new(), 8), &LineConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RequestError::UnexpectedEof));
}

#[tokio::test]
async fn request_with_non_utf8_target() {
    let data = b"GET /caf\xe9?x=1 HTTP/1.1\r\nHost: localhost:42069\r\n\r\n";
    for size in [1, 3, 8, data.len()] {
        let request = request_from_reader(ChunkedReader::new(&data[..], size), &LineConfig::default())
            .await
            .unwrap();
        let RequestTarget::Origin(origin) = request.target() else {
            panic!("expected origin-form, got {:?}", request.target());
        };
        assert_eq!(origin.path(), b"/caf\xe9");
        assert_eq!(origin.query(), Some(&b"x=1"[..]));
    }
}

#[test]
fn assembler_lines_before_too_long_any_chunk_size() {
    const DATA: &[u8] = b"ok\ntoolong\n";
    let mut outputs = Vec::new();
    for size in [1, DATA.len()] {
        let mut assembler = LineAssembler::with_max_line_len(Some(4));
        let mut lines = CompletedLines::new();
        let mut result = Ok(());
        for chunk in DATA.chunks(size) {
            result = assembler.feed(chunk, &mut lines);
            if result.is_err() {
                break;
            }
        }
        outputs.push((lines.into_vec(), result));
    }
    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0].0, vec![&b"ok"[..]]);
    assert_eq!(outputs[0].1, Err(LineError::TooLong { limit: 4 }));
}

#[test]
fn assembler_newline_count() {
    let mut assembler = LineAssembler::new();
    let mut lines = CompletedLines::new();
    assembler.feed(b"a\nb\n\nc\nrest", &mut lines).unwrap();
    assert_eq!(lines.len(), 4);
    assert_eq!(assembler.flush().as_deref(), Some(&b"rest"[..]));
}

#[tokio::test]
async fn server_prints_lines_per_connection() {
    let out = Arc::new(Mutex::new(Vec::<u8>::new()));
    let config = ServerConfig::new((Ipv4Addr::LOCALHOST, 0))
        .with_line(LineConfig::default().with_read_chunk_size(8));
    let server = HttpServer::new(config, PrintLines::shared(out.clone()));
    let listener = server.bind().unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { server.serve_on(listener).await });

    let mut stream = TcpStream::connect(addr).await.unwrap();
    for chunk in [&b"first li"[..], b"ne\nsecond\nthi", b"rd"] {
        stream.write_all(chunk).await.unwrap();
        stream.flush().await.unwrap();
        sleep(Duration::from_millis(10)).await;
    }
    stream.shutdown().await.unwrap();
    drop(stream);

    const EXPECTED: &[u8] = b"first line\nsecond\nthird\n";
    timeout(Duration::from_secs(5), async {
        while out.lock().await.as_slice() != EXPECTED {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| {
        panic!("server printed {:?}", String::from_utf8_lossy(&out.try_lock().unwrap()));
    });
}
